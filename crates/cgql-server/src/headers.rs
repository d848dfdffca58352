//! Request guards over HTTP headers

use std::convert::Infallible;

use cgql_domain::value_objects::RequestContext;
use once_cell::sync::Lazy;
use regex::Regex;
use rocket::request::{FromRequest, Outcome, Request};
use tracing::warn;

use crate::constants::{X_FORWARDED_HOST, X_FORWARDED_PORT, X_FORWARDED_PREFIX, X_FORWARDED_PROTO};

/// Every header of the request, for argument injectors
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders(pub RequestContext);

impl RequestHeaders {
    pub fn into_inner(self) -> RequestContext {
        self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RequestHeaders {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(Self(
            request
                .headers()
                .iter()
                .map(|h| (h.name().to_string(), h.value().to_string()))
                .collect(),
        ))
    }
}

/// Host name, IPv4 address or bracketed IPv6 literal, with an optional port
static FORWARDED_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\[[0-9A-Fa-f:.]+\]|[A-Za-z0-9.-]+)(:\d+)?$").expect("Invalid regex")
});

/// Origin seen by the client when a proxy sits in front of the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarded {
    pub proto: String,
    pub prefix: String,
    pub host: String,
    pub port: String,
}

impl Forwarded {
    /// An `http`/`https` scheme, a valid host and a numeric port; the prefix
    /// is free text and gets percent-encoded where it is used
    pub fn is_well_formed(&self) -> bool {
        (self.proto.eq_ignore_ascii_case("http") || self.proto.eq_ignore_ascii_case("https"))
            && !self.port.is_empty()
            && self.port.bytes().all(|b| b.is_ascii_digit())
            && FORWARDED_HOST.is_match(&self.host)
    }
}

/// The four `X-Forwarded-*` headers, present only when all of them are and
/// they are well formed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders(pub Option<Forwarded>);

impl ForwardedHeaders {
    pub fn get(&self) -> Option<&Forwarded> {
        self.0.as_ref()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ForwardedHeaders {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let headers = request.headers();
        let forwarded = match (
            headers.get_one(X_FORWARDED_PROTO),
            headers.get_one(X_FORWARDED_PREFIX),
            headers.get_one(X_FORWARDED_HOST),
            headers.get_one(X_FORWARDED_PORT),
        ) {
            (Some(proto), Some(prefix), Some(host), Some(port)) => Some(Forwarded {
                proto: proto.to_owned(),
                prefix: prefix.to_owned(),
                host: host.to_owned(),
                port: port.to_owned(),
            }),
            _ => None,
        };
        let forwarded = forwarded.filter(|f| {
            let usable = f.is_well_formed();
            if !usable {
                warn!(proto = %f.proto, host = %f.host, port = %f.port, "Ignoring malformed forwarded headers");
            }
            usable
        });
        Outcome::Success(Self(forwarded))
    }
}
