//! Unit tests for container registrations

use std::sync::Arc;

use cgql_domain::value_objects::{
    Bean, BeanDefinition, BeanScope, FactoryMethodMetadata, QualifierAnnotation, TypeDescriptor,
};

fn value_definition(name: &str) -> BeanDefinition {
    BeanDefinition::new(name, |_| Ok(Bean::Value(Arc::new(42_u32))))
}

#[test]
fn test_root_definition_walks_origin_chain() {
    let root = value_definition("root").bean_type(Arc::new(TypeDescriptor::new("Root")));
    let middle = value_definition("middle").originating(root);
    let leaf = value_definition("leaf").originating(middle);

    assert_eq!(leaf.root_definition().name(), "root");
    assert_eq!(
        leaf.root_definition().declared_type().map(|t| t.name.as_str()),
        Some("Root")
    );
    assert_eq!(value_definition("alone").root_definition().name(), "alone");
}

#[test]
fn test_provides_kind_checks_kinds_and_type_name() {
    let def = value_definition("svc")
        .provides("Counter")
        .bean_type(Arc::new(TypeDescriptor::new("CounterImpl")));
    assert!(def.provides_kind("Counter"));
    assert!(def.provides_kind("CounterImpl"));
    assert!(!def.provides_kind("Other"));
}

#[test]
fn test_factory_method_metadata() {
    let meta = FactoryMethodMetadata::returning("customBuilder", "AnnotatedResolverBuilder")
        .qualifier(QualifierAnnotation::named("custom"));
    let def = value_definition("customBuilder").factory_method(meta.clone());
    assert_eq!(meta.return_type_name(), "AnnotatedResolverBuilder");
    assert!(matches!(def.source(), cgql_domain::value_objects::BeanSource::FactoryMethod(_)));
    assert_eq!(*def.bean_scope(), BeanScope::Singleton);
}

#[test]
fn test_value_bean_downcast() {
    let def = value_definition("answer");
    let bean = def.create(&NoRegistryView).expect("create");
    assert_eq!(*bean.clone().into_value::<u32>("answer").expect("u32"), 42);
    assert!(bean.clone().into_value::<String>("answer").is_err());
    assert!(bean.into_component("answer").is_err());
}

struct NoRegistryView;

impl cgql_domain::ports::BeanRegistry for NoRegistryView {
    fn bean_names_for_marker(&self, _marker: &str) -> Vec<String> {
        Vec::new()
    }
    fn bean_definition_names(&self) -> Vec<String> {
        Vec::new()
    }
    fn bean_definition(&self, name: &str) -> cgql_domain::Result<&BeanDefinition> {
        Err(cgql_domain::Error::bean_not_found(name))
    }
    fn is_singleton(&self, _name: &str) -> bool {
        false
    }
    fn is_prototype(&self, _name: &str) -> bool {
        false
    }
    fn get_bean(&self, name: &str) -> cgql_domain::Result<Bean> {
        Err(cgql_domain::Error::bean_not_found(name))
    }
    fn bean_of_kind(&self, kind: &str) -> cgql_domain::Result<Bean> {
        Err(cgql_domain::Error::bean_not_found(kind))
    }
    fn qualified_bean_of_kind(&self, kind: &str, _qualifier: &str) -> cgql_domain::Result<Bean> {
        Err(cgql_domain::Error::bean_not_found(kind))
    }
    fn bean_names_for_qualifier(
        &self,
        _kind: &cgql_domain::value_objects::QualifierKind,
    ) -> Vec<String> {
        Vec::new()
    }
    fn is_type_match(&self, _name: &str, _kind: &str) -> bool {
        false
    }
    fn bean_type(&self, name: &str) -> cgql_domain::Result<Arc<TypeDescriptor>> {
        Err(cgql_domain::Error::bean_not_found(name))
    }
}
