//! Request execution and error mapping tests

use std::sync::Arc;

use cgql_application::execution::ErrorClassification;
use cgql_application::{GraphQlRequest, GraphQlSource, GraphQlSourceFactory, SchemaFactory};
use cgql_domain::value_objects::RequestContext;
use serde_json::{Map, json};

use crate::fixtures::{context_with, plain_calculator, registry};

fn source() -> GraphQlSource {
    let schema = SchemaFactory::new(registry(&context_with(vec![plain_calculator("calculator")])))
        .get_object()
        .expect("schema");
    let factory = GraphQlSourceFactory::new(Arc::new(schema));
    assert!(!factory.is_singleton());
    factory.get_object()
}

fn run(query: &str) -> cgql_application::GraphQlResponse {
    source().execute(&GraphQlRequest::new(query), &RequestContext::new())
}

#[test]
fn test_query_returns_data() {
    let response = run("query { getSquare(input: 4) }");
    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(response.data, Some(json!({ "getSquare": 16 })));
}

#[test]
fn test_mutation_with_variables_and_alias() {
    let mut variables = Map::new();
    variables.insert("x".into(), json!(2));
    let request = GraphQlRequest::new("mutation Sum($x: Int!, $y: Int = 5) { total: add(a: $x, b: $y) }")
        .with_variables(variables);
    let response = source().execute(&request, &RequestContext::new());
    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(response.data, Some(json!({ "total": 7 })));
}

#[test]
fn test_failing_field_yields_one_bad_request_error() {
    let response = run("{ getSquare(input: 3) divide(a: 1, b: 0) }");

    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert_eq!(error.message, "[DivideByZero] cannot divide by zero");
    assert_eq!(error.classification(), ErrorClassification::BadRequest);
    assert_eq!(error.path, vec![json!("divide")]);
    assert_eq!(response.data, Some(json!({ "getSquare": 9, "divide": null })));
}

#[test]
fn test_argument_type_failure_is_bad_request() {
    let response = run("{ getSquare(input: \"four\") }");
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.starts_with("[InvalidArgument] "));
    assert_eq!(response.errors[0].classification(), ErrorClassification::BadRequest);
}

#[test]
fn test_panic_is_contained() {
    let response = run("{ explode getSquare(input: 2) }");
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "[Panic] calculator exploded");
    assert_eq!(response.data, Some(json!({ "explode": null, "getSquare": 4 })));
}

#[test]
fn test_header_is_injected_from_request() {
    let context = RequestContext::new().with_header("X-User", "ada");
    let response = source().execute(&GraphQlRequest::new("{ whoAmI }"), &context);
    assert_eq!(response.data, Some(json!({ "whoAmI": "ada" })));

    let response = run("{ whoAmI }");
    assert_eq!(response.data, Some(json!({ "whoAmI": "anonymous" })));
}

#[test]
fn test_syntax_error_has_no_data() {
    let response = run("{ getSquare(input: 4) ");
    assert!(response.data.is_none());
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].classification(), ErrorClassification::InvalidSyntax);
}

#[test]
fn test_deeply_nested_argument_is_a_syntax_error() {
    let query = format!(
        "{{ getSquare(input: {}{}) }}",
        "[".repeat(100_000),
        "]".repeat(100_000)
    );
    let response = run(&query);
    assert!(response.data.is_none());
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].classification(), ErrorClassification::InvalidSyntax);
    assert!(response.errors[0].message.contains("maximum nesting depth exceeded"));
}

#[test]
fn test_validation_errors_have_no_data() {
    let response = run("{ getCube(input: 2) }");
    assert!(response.data.is_none());
    assert_eq!(
        response.errors[0].message,
        "Validation error (FieldUndefined@[getCube]) : Field 'getCube' in type 'Query' is undefined"
    );

    let response = run("mutation { add(a: 1) }");
    assert!(response.data.is_none());
    assert_eq!(response.errors[0].classification(), ErrorClassification::ValidationError);
    assert!(response.errors[0].message.contains("MissingFieldArgument"));

    let response = run("{ getSquare(size: 2) }");
    assert!(response.errors[0].message.contains("UnknownArgument"));
}

#[test]
fn test_typename_is_answered() {
    let response = run("{ __typename }");
    assert_eq!(response.data, Some(json!({ "__typename": "Query" })));
}

#[test]
fn test_response_serializes_like_graphql() {
    let response = run("{ divide(a: 1, b: 0) }");
    let body = serde_json::to_value(&response).expect("serialize");
    assert_eq!(body["data"], json!({ "divide": null }));
    assert_eq!(body["errors"][0]["extensions"]["classification"], "BAD_REQUEST");

    let ok = serde_json::to_value(run("{ getSquare(input: 1) }")).expect("serialize");
    assert!(ok.get("errors").is_none());
}
