//! GraphiQL page
//!
//! `GET {graphiql.path}?path=...` serves the page. Without `path` the request
//! is redirected to itself with `path` set to the GraphQL endpoint, and
//! `WsPath` when a websocket path is configured. Both values keep whatever
//! prefix sits in front of the GraphiQL path in the request, so the page
//! works under a context path.
//!
//! Behind a proxy that sends all four `X-Forwarded-*` headers the redirect
//! is absolute, targets the forwarded origin, and both values also carry the
//! forwarded prefix. The forwarded prefix and the configured paths are
//! percent-encoded segment by segment.

use once_cell::sync::Lazy;
use regex::Regex;
use rocket::http::RawStr;
use rocket::http::uri::Origin;
use rocket::response::Redirect;
use rocket::response::content::RawHtml;
use rocket::{Responder, State, get};
use tracing::debug;

use crate::constants::{PATH_PARAM, WS_PATH_PARAM};
use crate::headers::{Forwarded, ForwardedHeaders};

const GRAPHIQL_PAGE: &str = include_str!("templates/graphiql.html");

static TRAILING_PORT: Lazy<Regex> = Lazy::new(|| Regex::new(r":\d+$").expect("Invalid regex"));

/// Managed state of the GraphiQL route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphiqlHandler {
    graphql_path: String,
    ws_path: Option<String>,
    mount_path: String,
}

impl GraphiqlHandler {
    /// `mount_path` is the GraphiQL path without any context path
    pub fn new<G, M>(graphql_path: G, ws_path: Option<String>, mount_path: M) -> Self
    where
        G: Into<String>,
        M: Into<String>,
    {
        Self {
            graphql_path: graphql_path.into(),
            ws_path,
            mount_path: mount_path.into(),
        }
    }

    /// Target of the redirect for a request without `path`
    pub fn redirect_url(
        &self,
        request_path: &str,
        query: Option<&str>,
        forwarded: Option<&Forwarded>,
    ) -> String {
        let mut path_value = self.apply_path_prefix(request_path, &encode_path(&self.graphql_path));
        let mut ws_value = self
            .ws_path
            .as_deref()
            .map(|ws| self.apply_path_prefix(request_path, &encode_path(ws)));

        let base = match forwarded {
            Some(f) => {
                let prefix = encode_path(&f.prefix);
                path_value = format!("{prefix}{path_value}");
                ws_value = ws_value.map(|ws| format!("{prefix}{ws}"));
                let host = TRAILING_PORT.replace(&f.host, "");
                let base = format!(
                    "{}://{host}:{}{}{request_path}",
                    f.proto,
                    f.port,
                    prefix.trim_end_matches('/')
                );
                debug!("Forwarded request detected to '{base}'");
                base
            }
            None => request_path.to_owned(),
        };

        let mut params: Vec<String> = query
            .filter(|q| !q.is_empty())
            .map(|q| vec![q.to_owned()])
            .unwrap_or_default();
        params.push(format!("{PATH_PARAM}={path_value}"));
        if let Some(ws) = ws_value {
            params.push(format!("{WS_PATH_PARAM}={ws}"));
        }
        format!("{base}?{}", params.join("&"))
    }

    /// `path` preceded by whatever comes before the GraphiQL path in the
    /// request path
    fn apply_path_prefix(&self, request_path: &str, path: &str) -> String {
        match request_path.find(&self.mount_path) {
            Some(index) => format!("{}{path}", &request_path[..index]),
            None => path.to_owned(),
        }
    }
}

/// Percent-encode every segment of `path`, keeping the `/` separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| RawStr::new(segment).percent_encode().as_str().to_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Responder)]
pub enum GraphiqlResponse {
    Redirect(Redirect),
    Page(RawHtml<&'static str>),
}

#[get("/?<path>")]
pub fn page(
    path: Option<&str>,
    handler: &State<GraphiqlHandler>,
    origin: &Origin<'_>,
    forwarded: ForwardedHeaders,
) -> GraphiqlResponse {
    if path.is_some() {
        return GraphiqlResponse::Page(RawHtml(GRAPHIQL_PAGE));
    }
    let target = handler.redirect_url(
        origin.path().as_str(),
        origin.query().map(|q| q.as_str()),
        forwarded.get(),
    );
    debug!("Redirecting '{origin}' to '{target}'");
    GraphiqlResponse::Redirect(Redirect::temporary(target))
}
