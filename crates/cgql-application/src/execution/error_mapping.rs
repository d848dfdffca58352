//! Error-Mapping Wrapper
//!
//! Operation failures never leave the engine as raw errors: each one is
//! turned into exactly one classified [`GraphQlError`].

use std::panic::{AssertUnwindSafe, catch_unwind};

use cgql_domain::OperationFailure;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification reported under `extensions.classification`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorClassification {
    BadRequest,
    InvalidSyntax,
    ValidationError,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtensions {
    pub classification: ErrorClassification,
}

/// One entry of the response `errors` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    pub extensions: ErrorExtensions,
}

impl GraphQlError {
    pub fn new<S: Into<String>>(message: S, classification: ErrorClassification) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            extensions: ErrorExtensions { classification },
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: Vec<Value>) -> Self {
        self.path = path;
        self
    }

    pub fn classification(&self) -> ErrorClassification {
        self.extensions.classification
    }
}

/// Field being resolved when a failure occurred
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub field_name: &'a str,
    pub path: &'a [Value],
}

/// Converts an operation failure into response errors
///
/// Returns `None` to let the next resolver try.
pub trait ExceptionResolver: Send + Sync {
    fn resolve(&self, failure: &OperationFailure, field: &FieldContext<'_>) -> Option<Vec<GraphQlError>>;
}

/// Maps every failure to one `BAD_REQUEST` error reading `[Kind] message`
#[derive(Debug, Default, Clone, Copy)]
pub struct BadRequestExceptionResolver;

impl ExceptionResolver for BadRequestExceptionResolver {
    fn resolve(&self, failure: &OperationFailure, field: &FieldContext<'_>) -> Option<Vec<GraphQlError>> {
        Some(vec![
            GraphQlError::new(
                format!("[{}] {}", failure.kind(), failure.message()),
                ErrorClassification::BadRequest,
            )
            .with_path(field.path.to_vec()),
        ])
    }
}

/// Errors for `failure` from the first resolver that handles it
pub fn map_failure(
    resolvers: &[std::sync::Arc<dyn ExceptionResolver>],
    failure: &OperationFailure,
    field: &FieldContext<'_>,
) -> Vec<GraphQlError> {
    resolvers
        .iter()
        .find_map(|r| r.resolve(failure, field))
        .unwrap_or_else(|| {
            vec![
                GraphQlError::new(
                    format!("INTERNAL_ERROR for {}", field.field_name),
                    ErrorClassification::InternalError,
                )
                .with_path(field.path.to_vec()),
            ]
        })
}

/// Run `call`, turning a panic into a failure
pub fn guarded<F>(call: F) -> Result<Value, OperationFailure>
where
    F: FnOnce() -> Result<Value, OperationFailure>,
{
    catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|payload| Err(OperationFailure::from_panic(payload.as_ref())))
}
