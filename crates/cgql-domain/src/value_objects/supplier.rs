//! Lazy accessor to a component instance

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::ports::ApiComponent;

/// Produces a component instance
pub type ComponentFactory = Arc<dyn Fn() -> Result<Arc<dyn ApiComponent>> + Send + Sync>;

/// Lazy accessor to the live or a fresh component instance
///
/// A shared supplier calls its factory at most once, on first use, and hands
/// out the same instance afterwards. A per-call supplier calls its factory on
/// every [`get`](Self::get).
#[derive(Clone)]
pub struct InstanceSupplier {
    factory: ComponentFactory,
    cache: Option<Arc<OnceCell<Arc<dyn ApiComponent>>>>,
}

impl InstanceSupplier {
    pub fn shared(factory: ComponentFactory) -> Self {
        Self {
            factory,
            cache: Some(Arc::new(OnceCell::new())),
        }
    }

    pub fn per_call(factory: ComponentFactory) -> Self {
        Self {
            factory,
            cache: None,
        }
    }

    /// Shared supplier over an existing instance
    pub fn fixed(instance: Arc<dyn ApiComponent>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(Arc::clone(&instance));
        Self {
            factory: Arc::new(move || Ok(Arc::clone(&instance))),
            cache: Some(Arc::new(cell)),
        }
    }

    pub fn get(&self) -> Result<Arc<dyn ApiComponent>> {
        match &self.cache {
            Some(cell) => cell.get_or_try_init(|| (self.factory)()).cloned(),
            None => (self.factory)(),
        }
    }

    pub fn is_shared(&self) -> bool {
        self.cache.is_some()
    }
}

impl fmt::Debug for InstanceSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceSupplier")
            .field("shared", &self.is_shared())
            .field(
                "initialized",
                &self.cache.as_ref().is_some_and(|c| c.get().is_some()),
            )
            .finish()
    }
}
