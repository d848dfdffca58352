//! Bean container
//!
//! The definition table is fixed once the context is built. Singletons are
//! created on first lookup and cached in a `DashMap`; prototype and
//! custom-scoped beans are created on every lookup.

use std::collections::HashMap;
use std::sync::Arc;

use cgql_application::registry;
use cgql_domain::error::{Error, Result};
use cgql_domain::ports::BeanRegistry;
use cgql_domain::value_objects::{Bean, BeanDefinition, QualifierKind, TypeDescriptor};
use dashmap::DashMap;
use tracing::debug;

/// Container implementing the read-only [`BeanRegistry`] port
pub struct ApplicationContext {
    definitions: Vec<BeanDefinition>,
    index: HashMap<String, usize>,
    singletons: DashMap<String, Bean>,
}

impl ApplicationContext {
    /// Number of registrations
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Typed lookup of a plain value bean
    pub fn value<T: std::any::Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.get_bean(name)?.into_value::<T>(name)
    }

    fn definition(&self, name: &str) -> Option<&BeanDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    fn instantiate(&self, definition: &BeanDefinition) -> Result<Bean> {
        definition.create(self).map_err(|e| match e {
            Error::BeanCreation { .. } => e,
            other => Error::bean_creation(definition.name(), other.to_string()),
        })
    }

    fn single<'a, I>(&self, kind: &str, candidates: I) -> Result<Bean>
    where
        I: Iterator<Item = &'a BeanDefinition>,
    {
        let names: Vec<String> = candidates.map(|d| d.name().to_owned()).collect();
        match names.as_slice() {
            [] => Err(Error::bean_not_found(kind)),
            [name] => self.get_bean(name),
            _ => Err(Error::no_unique_bean(kind, names)),
        }
    }
}

impl BeanRegistry for ApplicationContext {
    fn bean_names_for_marker(&self, marker: &str) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|d| d.has_marker(marker))
            .map(|d| d.name().to_owned())
            .collect()
    }

    fn bean_definition_names(&self) -> Vec<String> {
        self.definitions.iter().map(|d| d.name().to_owned()).collect()
    }

    fn bean_definition(&self, name: &str) -> Result<&BeanDefinition> {
        self.definition(name).ok_or_else(|| Error::bean_not_found(name))
    }

    fn is_singleton(&self, name: &str) -> bool {
        self.definition(name)
            .is_some_and(|d| d.bean_scope().is_singleton())
    }

    fn is_prototype(&self, name: &str) -> bool {
        self.definition(name)
            .is_some_and(|d| d.bean_scope().is_prototype())
    }

    fn get_bean(&self, name: &str) -> Result<Bean> {
        let definition = self.bean_definition(name)?;
        if !definition.bean_scope().is_singleton() {
            return self.instantiate(definition);
        }
        if let Some(cached) = self.singletons.get(name) {
            return Ok(cached.value().clone());
        }

        // Factories may look up other beans, so no shard lock is held while
        // creating. A concurrent creator may win; its instance is kept.
        let created = self.instantiate(definition)?;
        let stored = self
            .singletons
            .entry(name.to_owned())
            .or_insert(created)
            .value()
            .clone();
        debug!(bean = name, "Singleton created");
        Ok(stored)
    }

    fn bean_of_kind(&self, kind: &str) -> Result<Bean> {
        self.single(
            kind,
            self.definitions.iter().filter(|d| d.provides_kind(kind)),
        )
    }

    fn qualified_bean_of_kind(&self, kind: &str, qualifier: &str) -> Result<Bean> {
        let lookup = format!("{kind} qualified '{qualifier}'");
        self.single(
            &lookup,
            self.definitions.iter().filter(|d| {
                d.provides_kind(kind)
                    && (d.name() == qualifier
                        || d.qualifiers().iter().any(|q| {
                            q.kind.is_default() && q.value.as_deref() == Some(qualifier)
                        }))
            }),
        )
    }

    fn bean_names_for_qualifier(&self, kind: &QualifierKind) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|d| d.qualifiers().iter().any(|q| &q.kind == kind))
            .map(|d| d.name().to_owned())
            .collect()
    }

    fn is_type_match(&self, name: &str, kind: &str) -> bool {
        self.definition(name).is_some_and(|d| d.provides_kind(kind))
    }

    fn bean_type(&self, name: &str) -> Result<Arc<TypeDescriptor>> {
        match self.bean_definition(name)?.declared_type() {
            Some(declared) => Ok(Arc::clone(declared)),
            None => self.target_type(name),
        }
    }
}

/// Collects registrations and builds an [`ApplicationContext`]
#[derive(Default)]
pub struct ContextBuilder {
    definitions: Vec<BeanDefinition>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, definition: BeanDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Import every bean registered through the linkme slices
    #[must_use]
    pub fn with_registered_beans(mut self) -> Self {
        self.definitions.extend(registry::registered_definitions());
        self
    }

    /// Freeze the definition table
    ///
    /// Fails when two registrations share a name.
    pub fn build(self) -> Result<Arc<ApplicationContext>> {
        let mut index = HashMap::with_capacity(self.definitions.len());
        for (position, definition) in self.definitions.iter().enumerate() {
            if index.insert(definition.name().to_owned(), position).is_some() {
                return Err(Error::configuration(format!(
                    "Duplicate bean definition name '{}'",
                    definition.name()
                )));
            }
        }
        debug!(beans = self.definitions.len(), "Application context built");
        Ok(Arc::new(ApplicationContext {
            definitions: self.definitions,
            index,
            singletons: DashMap::new(),
        }))
    }
}
