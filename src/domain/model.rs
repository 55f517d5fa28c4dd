use std::collections::HashMap;

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub diet: Option<String>,
}

/// Outcome of a single upstream call that completed at the HTTP level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamResponse {
    Success { body: String },
    Failure { status: u16, body: String },
}

/// Inbound request, independent of the hosting platform.
#[derive(Debug, Clone, Default)]
pub struct ProxyRequest {
    pub method: String,
    pub query_params: HashMap<String, String>,
}

impl ProxyRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            query_params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Returns the parameter only when it is present and non-empty.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ProxyResponse {
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: cors_headers(),
            body: String::new(),
        }
    }

    pub fn json(status: u16, body: String) -> Self {
        let mut headers = cors_headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }).to_string())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn cors_headers() -> Vec<(String, String)> {
    CORS_HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
