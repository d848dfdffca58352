//! # City GraphQL Domain
//!
//! Core types and boundary contracts for assembling a GraphQL schema out of
//! components registered in a dependency-injection container.
//!
//! ## Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Descriptors for types, methods, parameters, qualifiers and bean definitions |
//! | [`ports`] | Traits implemented by components, collaborators and the container |
//! | [`error`] | Build-time error taxonomy |
//! | [`failure`] | Runtime operation failures and the application error type |
//! | [`constants`] | Marker and annotation names shared across layers |
//!
//! ## Dependencies
//!
//! Pure library crate: no I/O, no async runtime, no logging backend.

pub mod constants;
pub mod error;
pub mod failure;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use failure::{CityError, OperationFailure};
