//! Bean Registration Slices
//!
//! Auto-registration system for container beans.
//! Components and providers register themselves via
//! `#[linkme::distributed_slice(..)]` and the container imports every entry
//! when it is built.

use cgql_domain::value_objects::BeanDefinition;

/// Registry entry for one container bean
///
/// The definition is produced on demand so every container gets its own
/// registration and its own instances.
pub struct BeanRegistration {
    /// Unique bean name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Produces the registration
    pub definition: fn() -> BeanDefinition,
}

/// Components marked as exposing GraphQL operations
#[linkme::distributed_slice]
pub static API_COMPONENTS: [BeanRegistration] = [..];

/// Collaborators of the schema pipeline (resolver builders and the like)
#[linkme::distributed_slice]
pub static SUPPORT_BEANS: [BeanRegistration] = [..];

/// Definitions of every registered bean: support beans first, then components
pub fn registered_definitions() -> Vec<BeanDefinition> {
    SUPPORT_BEANS
        .iter()
        .chain(API_COMPONENTS.iter())
        .map(|entry| (entry.definition)())
        .collect()
}

/// List all registered beans
///
/// Returns (name, description) tuples. Useful for CLI output and startup logs.
pub fn list_registrations() -> Vec<(&'static str, &'static str)> {
    SUPPORT_BEANS
        .iter()
        .chain(API_COMPONENTS.iter())
        .map(|e| (e.name, e.description))
        .collect()
}
