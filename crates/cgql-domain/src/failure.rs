//! Runtime operation failures
//!
//! Failures raised while an operation is being invoked are never domain
//! [`Error`](crate::Error)s: they are carried as [`OperationFailure`] values
//! so the execution layer can classify them without knowing the concrete
//! error type that produced them.

use std::any::Any;
use std::fmt;

use crate::constants::{INVALID_ARGUMENT_KIND, PANIC_FAILURE_KIND};

/// A failure raised by a business method while serving an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    kind: String,
    message: String,
}

impl OperationFailure {
    /// Create a failure with an explicit kind name
    pub fn new<K: Into<String>, M: Into<String>>(kind: K, message: M) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a failure named after the short type name of `error`
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self::new(short_type_name::<E>(), error.to_string())
    }

    /// Create an argument failure
    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        Self::new(INVALID_ARGUMENT_KIND, message)
    }

    /// Convert a caught panic payload into a failure
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "operation panicked".to_owned());
        Self::new(PANIC_FAILURE_KIND, message)
    }

    /// Kind name of the failure
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Failure message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for OperationFailure {}

/// Short type name of `T`: generic arguments and module path stripped
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Application-level error raised by business components
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CityError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CityError {
    /// Create an error with a message
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error with a message and a cause
    pub fn with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an error from a cause, reusing its message
    pub fn from_source<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an error from an slf4j-style pattern where each `{}` takes the
    /// next argument
    ///
    /// Placeholders without a matching argument are kept verbatim and extra
    /// arguments are ignored. `\{}` escapes a placeholder.
    pub fn formatted(pattern: &str, args: &[&dyn fmt::Display]) -> Self {
        Self::new(format_pattern(pattern, args))
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CityError> for OperationFailure {
    fn from(error: CityError) -> Self {
        Self::from_error(&error)
    }
}

fn format_pattern(pattern: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut args = args.iter();
    let mut rest = pattern;

    while let Some(pos) = rest.find("{}") {
        let (head, tail) = rest.split_at(pos);
        if let Some(stripped) = head.strip_suffix('\\') {
            out.push_str(stripped);
            out.push_str("{}");
        } else {
            out.push_str(head);
            match args.next() {
                Some(arg) => out.push_str(&arg.to_string()),
                None => out.push_str("{}"),
            }
        }
        rest = &tail[2..];
    }
    out.push_str(rest);
    out
}
