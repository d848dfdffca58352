//! Demo application tests: the registered controller served end to end

use cgql::application::GraphQlRequest;
use cgql::application::registry::list_registrations;
use cgql::demo::{DEMO_CONTROLLER_BEAN, GraphQlDemoServerController};
use cgql::domain::value_objects::RequestContext;
use cgql::infrastructure::config::AppConfig;
use cgql::infrastructure::init_app;
use cgql::server::create_rocket;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{Value, json};

fn run(query: &str) -> cgql::application::GraphQlResponse {
    let app = init_app(AppConfig::default()).expect("init");
    app.graphql_source()
        .expect("source")
        .execute(&GraphQlRequest::new(query), &RequestContext::default())
}

#[test]
fn test_controller_is_registered() {
    assert!(
        list_registrations()
            .iter()
            .any(|(name, _)| *name == DEMO_CONTROLLER_BEAN)
    );
}

#[test]
fn test_get_square() {
    let response = run("{ getSquare(input: 4) }");
    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(response.data, Some(json!({ "getSquare": 16 })));
}

#[test]
fn test_get_square_without_input_is_null() {
    let response = run("{ getSquare }");
    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(response.data, Some(json!({ "getSquare": null })));
}

#[test]
fn test_throwing_npe_yields_one_error() {
    let response = run("{ throwingNPE(input: 1) }");
    assert_eq!(response.data, Some(json!({ "throwingNPE": null })));
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "[MissingValueError] no value present");
}

#[test]
fn test_square_overflow_is_invalid_argument() {
    let err = GraphQlDemoServerController
        .get_square(Some(i64::MAX))
        .expect_err("overflow");
    assert_eq!(err.kind(), "InvalidArgument");
}

#[rocket::async_test]
async fn test_served_over_http() {
    let app = init_app(AppConfig::default()).expect("init");
    let client = Client::tracked(create_rocket(&app).expect("rocket"))
        .await
        .expect("valid rocket instance");

    let response = client
        .post("/graphql")
        .header(ContentType::JSON)
        .body(json!({ "query": "{ getSquare(input: 9) }" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["data"]["getSquare"], 81);

    let schema = client
        .get("/graphql/schema")
        .dispatch()
        .await
        .into_string()
        .await
        .expect("schema");
    assert!(schema.contains("getSquare(input: Int): Int"), "{schema}");
}
