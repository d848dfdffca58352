//! Application Layer - City GraphQL
//!
//! Builds one immutable GraphQL [`Schema`](schema::Schema) out of the API
//! components registered in a container and executes requests against it.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Component Descriptor Extractor | [`schema::extractor`] |
//! | Collaborator Resolver | [`schema::resolver`] |
//! | Proxy-Aware Invocation Adapter | [`schema::invocation`] |
//! | Schema Assembler | [`schema::assembler`] |
//! | Error-Mapping Wrapper | [`execution::error_mapping`] |
//!
//! [`schema::SchemaFactory`] runs the whole pipeline and yields a fresh schema
//! on every call. [`execution::GraphQlSourceFactory`] wraps a schema with the
//! error-mapping wrapper, and [`execution::GraphQlSource::execute`] runs
//! request documents against it.
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `cgql-domain`: descriptors, ports and errors
//! - `linkme`: registration slices filled by components and providers

pub mod execution;
pub mod registry;
pub mod schema;

pub use execution::{GraphQlRequest, GraphQlResponse, GraphQlSource, GraphQlSourceFactory};
pub use schema::{Schema, SchemaFactory};
