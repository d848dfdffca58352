//! Schema construction
//!
//! Extractor → Resolver → Assembler, with the invocation adapter threaded
//! into every resolver builder that accepts one.

pub mod assembler;
pub mod descriptor;
pub mod extractor;
pub mod factory;
pub mod injector;
pub mod invocation;
pub mod model;
pub mod resolver;

pub use assembler::{BuildContext, SchemaAssembler};
pub use descriptor::ComponentDescriptor;
pub use extractor::ComponentDescriptorExtractor;
pub use factory::SchemaFactory;
pub use injector::RequestHeaderInjector;
pub use invocation::{FixedMethodInvoker, MethodInvoker, ProxyAwareInvokerFactory};
pub use model::{InjectedParameter, OperationDefinition, Schema};
pub use resolver::{CollaboratorResolver, ResolutionSnapshot, ResolutionStats};
