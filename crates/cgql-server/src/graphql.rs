//! GraphQL HTTP endpoint

use std::sync::Arc;

use cgql_application::{GraphQlRequest, GraphQlResponse, GraphQlSource};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{Responder, State, get, post};
use tracing::{debug, error};

use crate::headers::RequestHeaders;

/// Managed state of the GraphQL routes
pub struct GraphQlEndpoint {
    source: Arc<GraphQlSource>,
    schema_text: Option<String>,
}

impl GraphQlEndpoint {
    /// Endpoint over `source`; `print_schema` also serves the printed schema
    pub fn new(source: Arc<GraphQlSource>, print_schema: bool) -> Self {
        let schema_text = print_schema.then(|| source.schema().print());
        Self {
            source,
            schema_text,
        }
    }
}

#[derive(Responder)]
#[response(status = 405, content_type = "plain")]
pub struct MethodNotAllowed {
    message: &'static str,
    allow: Header<'static>,
}

/// Execute a GraphQL request
///
/// Operations run on the blocking pool: resolvers are synchronous and may
/// take arbitrary time.
#[post("/", format = "json", data = "<request>")]
pub async fn execute(
    endpoint: &State<GraphQlEndpoint>,
    headers: RequestHeaders,
    request: Json<GraphQlRequest>,
) -> Result<Json<GraphQlResponse>, Status> {
    let source = Arc::clone(&endpoint.source);
    let request = request.into_inner();
    let context = headers.into_inner();
    debug!(operation = ?request.operation_name, "Executing GraphQL request");

    rocket::tokio::task::spawn_blocking(move || source.execute(&request, &context))
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "GraphQL execution task failed");
            Status::InternalServerError
        })
}

/// Queries are only accepted over POST
#[get("/")]
pub fn reject_get() -> MethodNotAllowed {
    MethodNotAllowed {
        message: "GraphQL requests must use POST",
        allow: Header::new("Allow", "POST"),
    }
}

/// Printed schema
#[get("/schema")]
pub fn schema(endpoint: &State<GraphQlEndpoint>) -> Option<String> {
    endpoint.schema_text.clone()
}
