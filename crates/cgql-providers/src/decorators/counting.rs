//! Counting decorator

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cgql_domain::OperationFailure;
use cgql_domain::ports::ApiComponent;
use cgql_domain::value_objects::{MethodDescriptor, OperationArguments, TypeDescriptor};
use serde_json::Value;

/// Counts calls reaching the wrapped component
pub struct CountingDecorator {
    inner: Arc<dyn ApiComponent>,
    calls: Arc<AtomicU64>,
}

impl CountingDecorator {
    pub fn new(inner: Arc<dyn ApiComponent>) -> Self {
        Self::with_counter(inner, Arc::new(AtomicU64::new(0)))
    }

    /// Share `calls` with the caller, e.g. across prototype instances
    pub fn with_counter(inner: Arc<dyn ApiComponent>, calls: Arc<AtomicU64>) -> Self {
        Self { inner, calls }
    }

    pub fn counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ApiComponent for CountingDecorator {
    fn target_type(&self) -> Arc<TypeDescriptor> {
        self.inner.target_type()
    }

    fn invoke(
        &self,
        method: &MethodDescriptor,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.invoke(method, args)
    }
}
