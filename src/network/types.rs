use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// HTTP verb used by a request. Only the two verbs the bridge exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// The four operations the screen can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    GetWithParams,
    Post,
    PostWithParams,
}

impl RequestKind {
    pub const ALL: [RequestKind; 4] = [
        RequestKind::Get,
        RequestKind::GetWithParams,
        RequestKind::Post,
        RequestKind::PostWithParams,
    ];

    pub fn method(&self) -> Method {
        match self {
            RequestKind::Get | RequestKind::GetWithParams => Method::Get,
            RequestKind::Post | RequestKind::PostWithParams => Method::Post,
        }
    }

    /// True for the variants that read the parameter field.
    pub fn takes_params(&self) -> bool {
        matches!(self, RequestKind::GetWithParams | RequestKind::PostWithParams)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Get => "GET",
            RequestKind::GetWithParams => "GET+params",
            RequestKind::Post => "POST",
            RequestKind::PostWithParams => "POST+params",
        }
    }
}

/// A single flat parameter value.
///
/// Nested objects and arrays are deliberately unrepresentable; the parser in
/// `core::params` rejects them before a request is ever built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl ParamValue {
    /// Text form used when the value is appended to a query string.
    /// `Null` becomes an empty value, so the key is still sent as `k=`.
    pub fn as_query_value(&self) -> String {
        match self {
            ParamValue::String(s) => s.clone(),
            ParamValue::Number(n) => n.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Null => String::new(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value.into())
    }
}

/// Flat key/value mapping sent with the "with params" operations.
/// Keys are kept sorted so query strings and bodies are deterministic.
pub type Params = BTreeMap<String, ParamValue>;

/// A pending HTTP call as specified by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub url: String,
    pub kind: RequestKind,
    pub params: Option<Params>,
}

impl RequestDescriptor {
    pub fn method(&self) -> Method {
        self.kind.method()
    }
}

/// Result of a successful HTTP exchange. `data` is the raw body, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub data: String,
    pub status_code: u16,
}

impl Response {
    /// Pretty-printed JSON form shown on screen and printed by one-shot commands.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}
