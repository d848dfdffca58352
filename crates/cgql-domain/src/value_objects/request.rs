//! Request-scoped data visible to argument injectors

use std::collections::HashMap;

/// Headers of the request being served; names are case-insensitive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    headers: HashMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header; a repeated name keeps the first value
    #[must_use]
    pub fn with_header<N: AsRef<str>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.insert_header(name, value);
        self
    }

    pub fn insert_header<N: AsRef<str>, V: Into<String>>(&mut self, name: N, value: V) {
        self.headers
            .entry(name.as_ref().to_ascii_lowercase())
            .or_insert_with(|| value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for RequestContext {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut ctx = Self::new();
        for (name, value) in iter {
            ctx.insert_header(name, value);
        }
        ctx
    }
}
