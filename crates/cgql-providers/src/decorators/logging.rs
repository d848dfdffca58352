//! Logging decorator

use std::sync::Arc;
use std::time::Instant;

use cgql_domain::OperationFailure;
use cgql_domain::ports::ApiComponent;
use cgql_domain::value_objects::{MethodDescriptor, OperationArguments, TypeDescriptor};
use serde_json::Value;
use tracing::{debug, warn};

/// Logs every call with its duration and outcome
pub struct LoggingDecorator {
    inner: Arc<dyn ApiComponent>,
}

impl LoggingDecorator {
    pub fn new(inner: Arc<dyn ApiComponent>) -> Self {
        Self { inner }
    }
}

impl ApiComponent for LoggingDecorator {
    fn target_type(&self) -> Arc<TypeDescriptor> {
        self.inner.target_type()
    }

    fn invoke(
        &self,
        method: &MethodDescriptor,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure> {
        let started = Instant::now();
        let result = self.inner.invoke(method, args);
        let elapsed_us = started.elapsed().as_micros();
        match &result {
            Ok(_) => debug!(
                component = %self.inner.target_type().name,
                method = %method.name,
                elapsed_us,
                "Operation completed"
            ),
            Err(failure) => warn!(
                component = %self.inner.target_type().name,
                method = %method.name,
                elapsed_us,
                kind = failure.kind(),
                "Operation failed: {}",
                failure.message()
            ),
        }
        result
    }
}
