//! Proxy-aware invocation tests

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use cgql_application::schema::SchemaFactory;
use cgql_domain::constants::TARGET_RESOLUTION_KIND;
use cgql_domain::ports::{ApiComponent, Executable};
use cgql_domain::value_objects::{
    BeanDefinition, BeanScope, FactoryMethodMetadata, MethodDescriptor, OperationArguments,
    ParameterDescriptor, RequestContext, ScalarType, TypeDescriptor,
};
use cgql_domain::Error;
use cgql_providers::{AnnotatedResolverBuilder, CountingDecorator};
use serde_json::Value;

use crate::fixtures::{Calculator, calculator_definition, calculator_type, context_with, registry};

fn square_args(input: i64) -> OperationArguments {
    OperationArguments::new().with("input", input)
}

#[test]
fn test_decorator_runs_once_per_call() {
    let calls = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&calls);
    let def = BeanDefinition::component("calculator", calculator_type(), move |_| {
        Ok(Arc::new(CountingDecorator::with_counter(Calculator::shared(), Arc::clone(&counter)))
            as Arc<dyn ApiComponent>)
    });
    let schema = SchemaFactory::new(registry(&context_with(vec![def])))
        .get_object()
        .expect("schema");

    let square = schema.query("getSquare").expect("getSquare");
    for i in 1..=3 {
        let value = square
            .invoke(&RequestContext::new(), &square_args(i))
            .expect("square");
        assert_eq!(value, Value::from(i * i));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_singleton_is_resolved_lazily_and_once() {
    let created = Arc::new(AtomicUsize::new(0));
    let schema = SchemaFactory::new(registry(&context_with(vec![calculator_definition(
        "calculator",
        &created,
    )])))
    .get_object()
    .expect("schema");
    assert_eq!(created.load(Ordering::SeqCst), 0);

    let square = schema.query("getSquare").expect("getSquare");
    square.invoke(&RequestContext::new(), &square_args(2)).expect("call");
    square.invoke(&RequestContext::new(), &square_args(3)).expect("call");
    assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[test]
fn test_prototype_gets_a_fresh_instance_per_call() {
    let created = Arc::new(AtomicUsize::new(0));
    let def = calculator_definition("calculator", &created).scope(BeanScope::Prototype);
    let schema = SchemaFactory::new(registry(&context_with(vec![def])))
        .get_object()
        .expect("schema");

    let square = schema.query("getSquare").expect("getSquare");
    for i in 0..4 {
        square.invoke(&RequestContext::new(), &square_args(i)).expect("call");
    }
    assert_eq!(created.load(Ordering::SeqCst), 4);
}

#[test]
fn test_invoked_method_comes_from_exposed_type() {
    // declared API annotates the method; the concrete type exposes it plainly
    let api = Arc::new(
        TypeDescriptor::new("CalculatorApi").method(
            MethodDescriptor::query("square")
                .named("getSquare")
                .param(ParameterDescriptor::new("input", ScalarType::Int))
                .returns(ScalarType::Int),
        ),
    );
    let exposed_square = MethodDescriptor::new("square")
        .param(ParameterDescriptor::new("input", ScalarType::Int))
        .returns(ScalarType::Int);
    let concrete = Arc::new(TypeDescriptor::new("Calculator").method(exposed_square.clone()));

    let def = BeanDefinition::component("calculator", concrete, |_| Ok(Calculator::shared()))
        .factory_method(FactoryMethodMetadata::new("calculator", api));
    let schema = SchemaFactory::new(registry(&context_with(vec![def])))
        .get_object()
        .expect("schema");

    let square = schema.query("getSquare").expect("getSquare");
    assert_eq!(square.executable.method(), &exposed_square);
    assert_eq!(
        square.invoke(&RequestContext::new(), &square_args(5)).expect("call"),
        Value::from(25)
    );
}

#[test]
fn test_target_creation_failure_is_an_operation_failure() {
    let def = BeanDefinition::component("calculator", calculator_type(), |_| {
        Err(Error::internal("connection refused"))
    });
    let schema = SchemaFactory::new(registry(&context_with(vec![def])))
        .get_object()
        .expect("schema builds without touching the instance");

    let failure = schema
        .query("getSquare")
        .expect("getSquare")
        .invoke(&RequestContext::new(), &square_args(1))
        .expect_err("no instance");
    assert_eq!(failure.kind(), TARGET_RESOLUTION_KIND);
    assert!(failure.message().contains("connection refused"));
}

#[test]
fn test_builders_are_configured_copies() {
    let original = AnnotatedResolverBuilder::new();
    let configured = cgql_domain::ports::ResolverBuilder::with_method_invoker_factory(
        &original,
        Arc::new(cgql_application::schema::ProxyAwareInvokerFactory),
    );
    assert!(configured.is_some());
    assert_eq!(original.invoker_factory_name(), "direct");
}
