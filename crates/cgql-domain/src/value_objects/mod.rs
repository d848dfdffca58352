//! Domain Value Objects
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeDescriptor`] | Shape of a component type: methods and requested collaborators |
//! | [`CollaboratorCriterion`] | How to locate one collaborator in the container |
//! | [`ComponentScope`] | Lifecycle of a component as seen by the schema pipeline |
//! | [`InstanceSupplier`] | Lazy accessor to a component instance |
//! | [`BeanDefinition`] | One container registration |
//! | [`OperationArguments`] | Named operation arguments with typed accessors |
//! | [`RequestContext`] | Request headers visible to argument injectors |

/// Live instances and registrations
pub mod bean;
/// Qualifiers and collaborator criteria
pub mod criterion;
/// Type, method and parameter descriptors
pub mod descriptor;
/// Operation arguments
pub mod arguments;
/// Request-scoped data
pub mod request;
/// Lifecycle scopes
pub mod scope;
/// Lazy instance accessor
pub mod supplier;

pub use arguments::OperationArguments;
pub use bean::{Bean, BeanDefinition, BeanFactory, BeanSource, FactoryMethodMetadata};
pub use criterion::{CollaboratorCriterion, QualifierAnnotation, QualifierKind};
pub use descriptor::{
    MethodDescriptor, OperationAnnotation, OperationKind, ParameterAnnotation,
    ParameterDescriptor, ScalarType, TypeDescriptor, Visibility,
};
pub use request::RequestContext;
pub use scope::{BeanScope, ComponentScope};
pub use supplier::{ComponentFactory, InstanceSupplier};
