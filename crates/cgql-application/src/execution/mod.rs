//! Request execution
//!
//! [`GraphQlSource`] pairs a schema with its exception resolvers and runs
//! request documents against it.

pub mod document;
pub mod engine;
pub mod error_mapping;
pub mod source;

pub use engine::{GraphQlRequest, GraphQlResponse};
pub use error_mapping::{
    BadRequestExceptionResolver, ErrorClassification, ExceptionResolver, GraphQlError,
};
pub use source::{GraphQlSource, GraphQlSourceFactory};
