use std::fmt;

use async_trait::async_trait;

use super::types::{Params, Response};

/// Error code reported for every failed request, whatever the cause.
pub const REQUEST_ERROR: &str = "REQUEST_ERROR";

/// Errors that can occur while performing a request.
///
/// All variants share the code [`REQUEST_ERROR`]. Rust callers can match on the
/// variant; callers that only look at [`RequestError::code`] see one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The URL could not be parsed. No network call was made.
    InvalidUrl(String),
    /// No response was received (DNS, connection refused/reset, client timeout).
    Transport(String),
    /// A response arrived with a non-success status.
    UnexpectedStatus { status: u16 },
    /// The response body could not be read.
    Body(String),
    /// The request body could not be serialized.
    Serialization(String),
}

impl RequestError {
    pub fn code(&self) -> &'static str {
        REQUEST_ERROR
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
            RequestError::Transport(msg) => write!(f, "Network error: {msg}"),
            RequestError::UnexpectedStatus { status } => {
                write!(f, "Unexpected response: {status}")
            }
            RequestError::Body(msg) => write!(f, "Failed to read response body: {msg}"),
            RequestError::Serialization(msg) => {
                write!(f, "Failed to serialize request body: {msg}")
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Capability the request service depends on: one HTTP exchange per call,
/// resolving exactly once to an envelope or an error.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Name the adapter is registered under.
    fn name(&self) -> &str;

    /// GET with no body.
    async fn get_request(&self, url: &str) -> Result<Response, RequestError>;

    /// GET with every parameter appended to the query string.
    async fn get_request_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError>;

    /// POST with an empty JSON body.
    async fn post_request(&self, url: &str) -> Result<Response, RequestError>;

    /// POST with the parameters serialized as a JSON object body.
    async fn post_request_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError>;
}
