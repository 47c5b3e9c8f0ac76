use std::collections::HashMap;
use tracing::debug;

use crate::resolver::ParamVec;

/// Parsed HTTP request data handed to middleware and handlers.
///
/// The embedding HTTP listener constructs one of these per inbound request
/// from its own wire-level types; this core never sees raw sockets. The query
/// string is split off the request target before route matching but stays
/// available to middleware and handlers here.
#[derive(Debug, Default)]
pub struct Request {
    /// HTTP method, normalized to lower case.
    method: String,
    /// Request path with the query string removed.
    path: String,
    /// Raw query string (without the leading `?`), possibly empty.
    query_string: String,
    /// Decoded query string parameters.
    query_params: HashMap<String, String>,
    /// HTTP headers (lowercase keys).
    headers: HashMap<String, String>,
    /// Request body parsed as JSON by the external body-parsing middleware.
    body: Option<serde_json::Value>,
    /// Path variables captured by the matched route; filled by the dispatcher.
    path_params: ParamVec,
}

/// Parse query string parameters from a request target.
///
/// Extracts everything after the `?` and URL-decodes names and values.
#[must_use]
pub fn parse_query_params(target: &str) -> HashMap<String, String> {
    if let Some(pos) = target.find('?') {
        let query_str = &target[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}

impl Request {
    /// Build a request from a method token and a raw request target
    /// (path plus optional query string).
    #[must_use]
    pub fn new(method: &str, target: &str) -> Self {
        let path = target.split('?').next().unwrap_or("/").to_string();
        let query_string = target
            .find('?')
            .map(|pos| target[pos + 1..].to_string())
            .unwrap_or_default();
        let query_params = parse_query_params(target);

        debug!(
            method = %method,
            path = %path,
            query_params = query_params.len(),
            "request parsed"
        );

        Self {
            method: method.to_ascii_lowercase(),
            path,
            query_string,
            query_params,
            headers: HashMap::new(),
            body: None,
            path_params: ParamVec::new(),
        }
    }

    /// Lowercased HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path, query string excluded.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string without the leading `?`; empty if none was sent.
    #[must_use]
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Decoded query parameters.
    #[must_use]
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    /// Set a header. Names are stored lowercased per RFC 7230 matching rules.
    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Get a header by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The JSON body, if the external body-parsing middleware attached one.
    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: Option<serde_json::Value>) {
        self.body = body;
    }

    /// Get a captured path variable by name. Last occurrence wins if the
    /// matched pattern repeats a name at different depths.
    #[inline]
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// All captured path variables in occurrence order.
    #[must_use]
    pub fn path_params(&self) -> &ParamVec {
        &self.path_params
    }

    /// Convert path variables to a map. Allocates; prefer
    /// [`Request::path_param`] on the hot path.
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    pub(crate) fn set_path_params(&mut self, params: ParamVec) {
        self.path_params = params;
    }
}
