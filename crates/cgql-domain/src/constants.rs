//! Domain layer constants
//!
//! Names of the markers and annotations that components and collaborators
//! carry in the container registry.

// ============================================================================
// REGISTRY MARKERS
// ============================================================================

/// Marker carried by every component that exposes GraphQL operations
pub const GRAPHQL_API_MARKER: &str = "GraphQLApi";

/// Name of the container's default qualifier mechanism
pub const DEFAULT_QUALIFIER: &str = "Qualifier";

// ============================================================================
// CAPABILITY KINDS
// ============================================================================

/// Capability kind shared by every resolver builder
pub const RESOLVER_BUILDER_KIND: &str = "ResolverBuilder";

/// Resolver builder exposing methods annotated as operations
pub const ANNOTATED_RESOLVER_BUILDER_KIND: &str = "AnnotatedResolverBuilder";

/// Resolver builder exposing every public method
pub const PUBLIC_RESOLVER_BUILDER_KIND: &str = "PublicResolverBuilder";

// ============================================================================
// FAILURE KINDS
// ============================================================================

/// Failure kind reported for panics raised inside an operation
pub const PANIC_FAILURE_KIND: &str = "Panic";

/// Failure kind reported for arguments that cannot be read as the expected type
pub const INVALID_ARGUMENT_KIND: &str = "InvalidArgument";

/// Failure kind reported when an operation target cannot be resolved
pub const TARGET_RESOLUTION_KIND: &str = "TargetResolutionError";
