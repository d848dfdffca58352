//! GraphiQL route tests

use cgql_infrastructure::config::AppConfig;
use rocket::http::{ContentType, Header, Status};

use crate::fixtures::{client, config_with};

#[rocket::async_test]
async fn test_redirect_adds_graphql_path() {
    let client = client(AppConfig::default()).await;
    let response = client.get("/graphiql").dispatch().await;

    assert_eq!(response.status(), Status::TemporaryRedirect);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("/graphiql?path=/graphql")
    );
}

#[rocket::async_test]
async fn test_redirect_keeps_existing_query() {
    let client = client(AppConfig::default()).await;
    let response = client.get("/graphiql?theme=dark").dispatch().await;

    assert_eq!(
        response.headers().get_one("Location"),
        Some("/graphiql?theme=dark&path=/graphql")
    );
}

#[rocket::async_test]
async fn test_redirect_under_context_path_with_websocket() {
    let client = client(config_with(|c| {
        c.server.context_path = "/api".into();
        c.graphql.websocket.path = Some("/subscriptions".into());
    }))
    .await;
    let response = client.get("/api/graphiql").dispatch().await;

    assert_eq!(
        response.headers().get_one("Location"),
        Some("/api/graphiql?path=/api/graphql&WsPath=/api/subscriptions")
    );
}

#[rocket::async_test]
async fn test_forwarded_redirect() {
    let client = client(AppConfig::default()).await;
    let response = client
        .get("/graphiql")
        .header(Header::new("X-Forwarded-Proto", "https"))
        .header(Header::new("X-Forwarded-Prefix", "/gateway"))
        .header(Header::new("X-Forwarded-Host", "api.example.org:8443"))
        .header(Header::new("X-Forwarded-Port", "443"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::TemporaryRedirect);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("https://api.example.org:443/gateway/graphiql?path=/gateway/graphql")
    );
}

#[rocket::async_test]
async fn test_forwarded_prefix_is_percent_encoded() {
    let client = client(AppConfig::default()).await;
    let response = client
        .get("/graphiql")
        .header(Header::new("X-Forwarded-Proto", "https"))
        .header(Header::new("X-Forwarded-Prefix", "/my gateway"))
        .header(Header::new("X-Forwarded-Host", "api.example.org"))
        .header(Header::new("X-Forwarded-Port", "443"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::TemporaryRedirect);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("https://api.example.org:443/my%20gateway/graphiql?path=/my%20gateway/graphql")
    );
}

#[rocket::async_test]
async fn test_malformed_forwarded_headers_are_ignored() {
    let client = client(AppConfig::default()).await;
    let response = client
        .get("/graphiql")
        .header(Header::new("X-Forwarded-Proto", "javascript"))
        .header(Header::new("X-Forwarded-Prefix", "/gateway"))
        .header(Header::new("X-Forwarded-Host", "api.example.org/evil"))
        .header(Header::new("X-Forwarded-Port", "443"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::TemporaryRedirect);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("/graphiql?path=/graphql")
    );
}

#[rocket::async_test]
async fn test_partial_forwarded_headers_are_ignored() {
    let client = client(AppConfig::default()).await;
    let response = client
        .get("/graphiql")
        .header(Header::new("X-Forwarded-Proto", "https"))
        .header(Header::new("X-Forwarded-Host", "api.example.org"))
        .dispatch()
        .await;

    assert_eq!(
        response.headers().get_one("Location"),
        Some("/graphiql?path=/graphql")
    );
}

#[rocket::async_test]
async fn test_page_served_when_path_present() {
    let client = client(AppConfig::default()).await;
    let response = client.get("/graphiql?path=/graphql").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::HTML));
    let html = response.into_string().await.expect("page");
    assert!(html.contains("GraphiQL"));
}

#[rocket::async_test]
async fn test_graphiql_disabled() {
    let client = client(config_with(|c| c.graphql.graphiql.enabled = false)).await;
    let response = client.get("/graphiql").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}
