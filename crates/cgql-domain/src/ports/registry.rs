//! Bean Registry Port
//!
//! Read-only view of the container used while a schema is built. Every
//! method is a registry read; implementations must be safe to call from
//! several threads at once.

use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::{Bean, BeanDefinition, QualifierKind, TypeDescriptor};

pub trait BeanRegistry: Send + Sync {
    /// Names of registrations carrying `marker`, in registration order
    fn bean_names_for_marker(&self, marker: &str) -> Vec<String>;

    /// Every registration name, in registration order
    fn bean_definition_names(&self) -> Vec<String>;

    fn bean_definition(&self, name: &str) -> Result<&BeanDefinition>;

    fn is_singleton(&self, name: &str) -> bool;

    fn is_prototype(&self, name: &str) -> bool;

    /// Instance of the named registration, honoring its scope
    fn get_bean(&self, name: &str) -> Result<Bean>;

    /// The single registration providing `kind`
    ///
    /// Fails with `BeanNotFound` for no candidate and `NoUniqueBean` for
    /// several.
    fn bean_of_kind(&self, kind: &str) -> Result<Bean>;

    /// The single registration providing `kind` whose default qualifier
    /// value, or name, equals `qualifier`
    fn qualified_bean_of_kind(&self, kind: &str, qualifier: &str) -> Result<Bean>;

    /// Names of registrations carrying a qualifier annotation of `kind`
    fn bean_names_for_qualifier(&self, kind: &QualifierKind) -> Vec<String>;

    /// Whether the named registration provides `kind`
    fn is_type_match(&self, name: &str, kind: &str) -> bool;

    /// Concrete type of the named registration
    ///
    /// Uses the declared type when known and otherwise unwraps the live
    /// instance.
    fn bean_type(&self, name: &str) -> Result<Arc<TypeDescriptor>>;

    /// Concrete type of the live instance behind any wrappers
    fn target_type(&self, name: &str) -> Result<Arc<TypeDescriptor>> {
        Ok(self.get_bean(name)?.into_component(name)?.target_type())
    }
}
