use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// The parts of an HTTP request the validator looks at.
///
/// The hosting service owns the real request object; it fills one of these in
/// (directly, via [`Request::from_uri`], or from an `http::Request`).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Parsed query parameters; `name[]` keys collect into arrays
    pub query_params: HashMap<String, Value>,
    /// Raw body bytes, decoded only when the operation declares a body parameter
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Request {
            method,
            path: path.into(),
            query_params: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Build from a method and a path that may carry a query string.
    #[must_use]
    pub fn from_uri(method: Method, uri: &str) -> Self {
        let (path, query) = split_uri(uri);
        let mut req = Request::new(method, path);
        if let Some(query) = query {
            req.query_params = parse_query_params(query);
        }
        req
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .insert(name.into(), Value::String(value.into()));
        self
    }

    #[must_use]
    pub fn with_query_array<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| Value::String(v.into()))
            .collect();
        self.query_params.insert(name.into(), Value::Array(values));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_json_body(self, body: &Value) -> Self {
        let bytes = body.to_string().into_bytes();
        self.with_body(bytes)
    }

    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&Value> {
        self.query_params.get(name)
    }
}

impl<B: AsRef<[u8]>> From<&http::Request<B>> for Request {
    fn from(req: &http::Request<B>) -> Self {
        let uri = req.uri();
        let mut out = Request::new(req.method().clone(), uri.path());
        if let Some(query) = uri.query() {
            out.query_params = parse_query_params(query);
        }
        out.body = req.body().as_ref().to_vec();
        out
    }
}

/// Split `path?query` into its two halves.
#[must_use]
pub fn split_uri(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    }
}

/// Parse a form-urlencoded query string.
///
/// Plain keys map to strings (last occurrence wins). Keys ending in `[]`
/// collect every occurrence into an array under the bare name, so
/// `ids[]=1&ids[]=2` yields `ids: ["1", "2"]`.
#[must_use]
pub fn parse_query_params(query: &str) -> HashMap<String, Value> {
    let mut params: HashMap<String, Value> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.strip_suffix("[]") {
            Some(base) => {
                let entry = params
                    .entry(base.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match entry {
                    Value::Array(items) => items.push(Value::String(value.into_owned())),
                    other => *other = Value::Array(vec![Value::String(value.into_owned())]),
                }
            }
            None => {
                params.insert(key.into_owned(), Value::String(value.into_owned()));
            }
        }
    }
    debug!(param_count = params.len(), "Query params parsed");
    params
}
