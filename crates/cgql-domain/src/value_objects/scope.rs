//! Lifecycle scopes

use serde::{Deserialize, Serialize};

/// Scope of a component as seen by the schema pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentScope {
    /// One shared instance
    Singleton,
    /// Fresh instance per resolution
    Prototype,
    /// Scope cannot be determined from registry metadata
    Unknown,
}

impl ComponentScope {
    /// Derive the scope from the container's singleton and prototype answers
    pub fn from_flags(singleton: bool, prototype: bool) -> Self {
        if singleton {
            Self::Singleton
        } else if prototype {
            Self::Prototype
        } else {
            Self::Unknown
        }
    }
}

/// Scope declared on a container registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BeanScope {
    /// Created once and cached by the container
    #[default]
    Singleton,
    /// Created on every lookup
    Prototype,
    /// Any other named scope; created on every lookup
    Custom(String),
}

impl BeanScope {
    /// Whether the container caches the instance
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Singleton)
    }

    /// Whether the container creates a fresh instance per lookup
    pub fn is_prototype(&self) -> bool {
        matches!(self, Self::Prototype)
    }
}
