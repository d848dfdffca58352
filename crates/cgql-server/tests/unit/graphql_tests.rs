//! GraphQL endpoint tests

use cgql_infrastructure::config::AppConfig;
use rocket::http::{ContentType, Header, Status};
use serde_json::{Value, json};

use crate::fixtures::{client, config_with};

fn body(query: &str) -> String {
    json!({ "query": query }).to_string()
}

#[rocket::async_test]
async fn test_post_executes_query() {
    let client = client(AppConfig::default()).await;
    let response = client
        .post("/graphql")
        .header(ContentType::JSON)
        .body(body(r#"{ echo(text: "hello") }"#))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let json: Value = response.into_json().await.expect("json body");
    assert_eq!(json, json!({ "data": { "echo": "hello" } }));
}

#[rocket::async_test]
async fn test_post_passes_variables() {
    let client = client(AppConfig::default()).await;
    let response = client
        .post("/graphql")
        .header(ContentType::JSON)
        .body(
            json!({
                "query": "query Say($t: String!) { echo(text: $t) }",
                "variables": { "t": "from variable" },
                "operationName": "Say"
            })
            .to_string(),
        )
        .dispatch()
        .await;

    let json: Value = response.into_json().await.expect("json body");
    assert_eq!(json["data"]["echo"], "from variable");
}

#[rocket::async_test]
async fn test_request_headers_reach_injected_parameters() {
    let client = client(AppConfig::default()).await;
    let response = client
        .post("/graphql")
        .header(ContentType::JSON)
        .header(Header::new("X-User", "alice"))
        .body(body("{ caller }"))
        .dispatch()
        .await;

    let json: Value = response.into_json().await.expect("json body");
    assert_eq!(json["data"]["caller"], "alice");
}

#[rocket::async_test]
async fn test_failure_maps_to_bad_request_error() {
    let client = client(AppConfig::default()).await;
    let response = client
        .post("/graphql")
        .header(ContentType::JSON)
        .body(body(r#"{ fail echo(text: "still here") }"#))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let json: Value = response.into_json().await.expect("json body");
    assert_eq!(json["data"]["fail"], Value::Null);
    assert_eq!(json["data"]["echo"], "still here");
    let errors = json["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "[MissingValue] no value present");
    assert_eq!(errors[0]["path"], json!(["fail"]));
    assert_eq!(errors[0]["extensions"]["classification"], "BAD_REQUEST");
}

#[rocket::async_test]
async fn test_syntax_error_has_no_data() {
    let client = client(AppConfig::default()).await;
    let response = client
        .post("/graphql")
        .header(ContentType::JSON)
        .body(body("{ echo("))
        .dispatch()
        .await;

    let json: Value = response.into_json().await.expect("json body");
    assert!(json.get("data").is_none());
    assert_eq!(json["errors"][0]["extensions"]["classification"], "INVALID_SYNTAX");
}

#[rocket::async_test]
async fn test_get_is_rejected() {
    let client = client(AppConfig::default()).await;
    let response = client.get("/graphql?query=%7Becho%7D").dispatch().await;

    assert_eq!(response.status(), Status::MethodNotAllowed);
    assert_eq!(response.headers().get_one("Allow"), Some("POST"));
}

#[rocket::async_test]
async fn test_schema_printer() {
    let client = client(AppConfig::default()).await;
    let response = client.get("/graphql/schema").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    let text = response.into_string().await.expect("schema text");
    assert!(text.starts_with("type Query {"), "{text}");
    assert!(text.contains("  echo(text: String!): String\n"), "{text}");
    assert!(text.contains("  caller: String\n"), "{text}");
}

#[rocket::async_test]
async fn test_schema_printer_disabled() {
    let client = client(config_with(|c| c.graphql.schema.printer.enabled = false)).await;
    let response = client.get("/graphql/schema").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn test_routes_follow_context_path() {
    let client = client(config_with(|c| c.server.context_path = "/api".into())).await;

    let response = client
        .post("/api/graphql")
        .header(ContentType::JSON)
        .body(body(r#"{ echo(text: "ctx") }"#))
        .dispatch()
        .await;
    let json: Value = response.into_json().await.expect("json body");
    assert_eq!(json["data"]["echo"], "ctx");

    let response = client
        .post("/graphql")
        .header(ContentType::JSON)
        .body(body(r#"{ echo(text: "ctx") }"#))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}
