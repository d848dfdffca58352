//! Container registrations and live instances

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::criterion::{CollaboratorCriterion, QualifierAnnotation, QualifierKind};
use super::descriptor::TypeDescriptor;
use super::scope::BeanScope;
use crate::error::{Error, Result};
use crate::ports::{ApiComponent, ArgumentInjector, BeanRegistry, ResolverBuilder};

/// A live, type-erased instance handed out by the container
#[derive(Clone)]
pub enum Bean {
    Component(Arc<dyn ApiComponent>),
    ResolverBuilder(Arc<dyn ResolverBuilder>),
    Injector(Arc<dyn ArgumentInjector>),
    Value(Arc<dyn Any + Send + Sync>),
}

impl Bean {
    /// Shape name used in diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Component(_) => "ApiComponent",
            Self::ResolverBuilder(_) => "ResolverBuilder",
            Self::Injector(_) => "ArgumentInjector",
            Self::Value(_) => "Value",
        }
    }

    pub fn into_component(self, name: &str) -> Result<Arc<dyn ApiComponent>> {
        match self {
            Self::Component(c) => Ok(c),
            _ => Err(Error::bean_type_mismatch(name, "ApiComponent")),
        }
    }

    pub fn into_resolver_builder(self, name: &str) -> Result<Arc<dyn ResolverBuilder>> {
        match self {
            Self::ResolverBuilder(b) => Ok(b),
            _ => Err(Error::bean_type_mismatch(name, "ResolverBuilder")),
        }
    }

    pub fn into_injector(self, name: &str) -> Result<Arc<dyn ArgumentInjector>> {
        match self {
            Self::Injector(i) => Ok(i),
            _ => Err(Error::bean_type_mismatch(name, "ArgumentInjector")),
        }
    }

    /// Downcast a plain value bean
    pub fn into_value<T: Any + Send + Sync>(self, name: &str) -> Result<Arc<T>> {
        match self {
            Self::Value(v) => v
                .downcast::<T>()
                .map_err(|_| Error::bean_type_mismatch(name, std::any::type_name::<T>())),
            _ => Err(Error::bean_type_mismatch(name, std::any::type_name::<T>())),
        }
    }

    /// Whether both beans point at the same instance
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Component(a), Self::Component(b)) => Arc::ptr_eq(a, b),
            (Self::ResolverBuilder(a), Self::ResolverBuilder(b)) => Arc::ptr_eq(a, b),
            (Self::Injector(a), Self::Injector(b)) => Arc::ptr_eq(a, b),
            (Self::Value(a), Self::Value(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bean::{}", self.shape())
    }
}

/// Creates the instance of a registration; may look up other beans
pub type BeanFactory = Arc<dyn Fn(&dyn BeanRegistry) -> Result<Bean> + Send + Sync>;

/// Metadata of a registration produced by a factory method
#[derive(Debug, Clone)]
pub struct FactoryMethodMetadata {
    pub method_name: String,
    /// Annotated return type of the factory method
    pub return_type: Arc<TypeDescriptor>,
    /// Qualifier annotations on the factory method
    pub qualifiers: Vec<QualifierAnnotation>,
    /// Collaborators requested on the factory method
    pub resolver_builders: Vec<CollaboratorCriterion>,
}

impl FactoryMethodMetadata {
    pub fn new<S: Into<String>>(method_name: S, return_type: Arc<TypeDescriptor>) -> Self {
        Self {
            method_name: method_name.into(),
            return_type,
            qualifiers: Vec::new(),
            resolver_builders: Vec::new(),
        }
    }

    /// Same as a type with only a name, for collaborator registrations
    pub fn returning<S: Into<String>, T: Into<String>>(method_name: S, type_name: T) -> Self {
        Self::new(method_name, Arc::new(TypeDescriptor::new(type_name)))
    }

    #[must_use]
    pub fn qualifier(mut self, qualifier: QualifierAnnotation) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    #[must_use]
    pub fn resolver_builder(mut self, criterion: CollaboratorCriterion) -> Self {
        self.resolver_builders.push(criterion);
        self
    }

    pub fn return_type_name(&self) -> &str {
        &self.return_type.name
    }

    /// Qualifier annotations of the given kind
    pub fn qualifiers_of_kind<'a>(
        &'a self,
        kind: &'a QualifierKind,
    ) -> impl Iterator<Item = &'a QualifierAnnotation> + 'a {
        self.qualifiers.iter().filter(move |q| &q.kind == kind)
    }
}

/// Where a registration came from
#[derive(Debug, Clone, Default)]
pub enum BeanSource {
    /// Registered directly from a type
    #[default]
    Class,
    /// Produced by a factory method
    FactoryMethod(FactoryMethodMetadata),
}

/// One registration in the container
#[derive(Clone)]
pub struct BeanDefinition {
    name: String,
    scope: BeanScope,
    markers: Vec<String>,
    bean_type: Option<Arc<TypeDescriptor>>,
    provides: Vec<String>,
    qualifiers: Vec<QualifierAnnotation>,
    source: BeanSource,
    originating: Option<Box<BeanDefinition>>,
    factory: BeanFactory,
}

impl BeanDefinition {
    /// Singleton registration with no type information
    pub fn new<S, F>(name: S, factory: F) -> Self
    where
        S: Into<String>,
        F: Fn(&dyn BeanRegistry) -> Result<Bean> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            scope: BeanScope::Singleton,
            markers: Vec::new(),
            bean_type: None,
            provides: Vec::new(),
            qualifiers: Vec::new(),
            source: BeanSource::Class,
            originating: None,
            factory: Arc::new(factory),
        }
    }

    /// Registration of an API component of a known type
    pub fn component<S, F>(name: S, bean_type: Arc<TypeDescriptor>, factory: F) -> Self
    where
        S: Into<String>,
        F: Fn(&dyn BeanRegistry) -> Result<Arc<dyn ApiComponent>> + Send + Sync + 'static,
    {
        Self::new(name, move |registry| factory(registry).map(Bean::Component))
            .marker(crate::constants::GRAPHQL_API_MARKER)
            .bean_type(bean_type)
    }

    /// Registration of a resolver builder providing `kinds`
    pub fn resolver_builder<S>(name: S, kinds: &[&str], builder: Arc<dyn ResolverBuilder>) -> Self
    where
        S: Into<String>,
    {
        let mut def = Self::new(name, move |_| Ok(Bean::ResolverBuilder(Arc::clone(&builder))))
            .provides(crate::constants::RESOLVER_BUILDER_KIND);
        for kind in kinds {
            def = def.provides(*kind);
        }
        def
    }

    #[must_use]
    pub fn scope(mut self, scope: BeanScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.markers.push(marker.into());
        self
    }

    #[must_use]
    pub fn bean_type(mut self, bean_type: Arc<TypeDescriptor>) -> Self {
        self.bean_type = Some(bean_type);
        self
    }

    /// Drop the declared type, leaving it to be discovered from the instance
    #[must_use]
    pub fn untyped(mut self) -> Self {
        self.bean_type = None;
        self
    }

    #[must_use]
    pub fn provides<S: Into<String>>(mut self, kind: S) -> Self {
        self.provides.push(kind.into());
        self
    }

    #[must_use]
    pub fn qualifier(mut self, qualifier: QualifierAnnotation) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    #[must_use]
    pub fn factory_method(mut self, metadata: FactoryMethodMetadata) -> Self {
        self.source = BeanSource::FactoryMethod(metadata);
        self
    }

    /// Record the registration this one was derived from
    #[must_use]
    pub fn originating(mut self, origin: BeanDefinition) -> Self {
        self.originating = Some(Box::new(origin));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bean_scope(&self) -> &BeanScope {
        &self.scope
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    pub fn declared_type(&self) -> Option<&Arc<TypeDescriptor>> {
        self.bean_type.as_ref()
    }

    pub fn provided_kinds(&self) -> &[String] {
        &self.provides
    }

    /// Whether this registration satisfies a lookup for `kind`
    pub fn provides_kind(&self, kind: &str) -> bool {
        self.provides.iter().any(|p| p == kind)
            || self.bean_type.as_ref().is_some_and(|t| t.name == kind)
    }

    pub fn qualifiers(&self) -> &[QualifierAnnotation] {
        &self.qualifiers
    }

    pub fn source(&self) -> &BeanSource {
        &self.source
    }

    pub fn origin(&self) -> Option<&BeanDefinition> {
        self.originating.as_deref()
    }

    /// Last registration in the originating chain
    pub fn root_definition(&self) -> &BeanDefinition {
        let mut current = self;
        while let Some(origin) = current.origin() {
            current = origin;
        }
        current
    }

    /// Run the factory
    pub fn create(&self, registry: &dyn BeanRegistry) -> Result<Bean> {
        (self.factory)(registry)
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("markers", &self.markers)
            .field("bean_type", &self.bean_type.as_ref().map(|t| &t.name))
            .field("provides", &self.provides)
            .field("qualifiers", &self.qualifiers)
            .field("source", &self.source)
            .field("originating", &self.originating)
            .finish_non_exhaustive()
    }
}
