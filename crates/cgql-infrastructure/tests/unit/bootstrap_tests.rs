//! Composition root tests

use std::sync::Arc;

use cgql_application::GraphQlRequest;
use cgql_domain::failure::OperationFailure;
use cgql_domain::ports::ApiComponent;
use cgql_domain::value_objects::{
    BeanDefinition, MethodDescriptor, OperationArguments, ParameterDescriptor, RequestContext,
    ScalarType, TypeDescriptor,
};
use cgql_infrastructure::config::AppConfig;
use cgql_infrastructure::di::{ContextBuilder, init_app_with};
use cgql_providers::AnnotatedResolverBuilder;
use serde_json::{Value, json};

struct Doubler;

fn doubler_type() -> Arc<TypeDescriptor> {
    Arc::new(
        TypeDescriptor::new("Doubler").method(
            MethodDescriptor::query("double")
                .param(ParameterDescriptor::new("n", ScalarType::Int))
                .returns(ScalarType::Int),
        ),
    )
}

impl ApiComponent for Doubler {
    fn target_type(&self) -> Arc<TypeDescriptor> {
        doubler_type()
    }

    fn invoke(
        &self,
        _method: &MethodDescriptor,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure> {
        Ok(Value::from(args.i64("n")? * 2))
    }
}

#[test]
fn test_app_context_serves_registered_component() {
    let builder = ContextBuilder::new()
        .register(AnnotatedResolverBuilder::definition())
        .register(BeanDefinition::component("doubler", doubler_type(), |_| {
            Ok(Arc::new(Doubler) as Arc<dyn ApiComponent>)
        }));
    let app = init_app_with(AppConfig::default(), builder).expect("init");

    let source = app.graphql_source().expect("source");
    let response = source.execute(
        &GraphQlRequest::new("{ double(n: 21) }"),
        &RequestContext::default(),
    );
    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(response.data, Some(json!({ "double": 42 })));
    assert_eq!(app.context().len(), 2);
    assert!(!app.schema_factory().is_singleton());
}

#[test]
fn test_missing_resolver_builder_fails_schema_build() {
    let builder = ContextBuilder::new().register(BeanDefinition::component(
        "doubler",
        doubler_type(),
        |_| Ok(Arc::new(Doubler) as Arc<dyn ApiComponent>),
    ));
    let app = init_app_with(AppConfig::default(), builder).expect("init");
    let err = app.graphql_source().err().expect("no builder registered");
    assert!(err.to_string().contains("No matching AnnotatedResolverBuilder bean found"));
}
