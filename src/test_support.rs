//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::network::{HttpClient, Params, RequestError, Response};
use crate::service::RequestService;

/// One recorded adapter invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Get(String),
    GetWithParams(String, Params),
    Post(String),
    PostWithParams(String, Params),
}

/// Adapter that records calls and replays scripted outcomes in order.
/// When the script runs out it answers `200` with an empty body.
#[derive(Default)]
pub struct MockHttpClient {
    outcomes: Mutex<VecDeque<Result<Response, RequestError>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_outcome(&self, outcome: Result<Response, RequestError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MockCall) -> Result<Response, RequestError> {
        self.calls.lock().unwrap().push(call);
        self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(Response {
            data: String::new(),
            status_code: 200,
        }))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_request(&self, url: &str) -> Result<Response, RequestError> {
        self.record(MockCall::Get(url.to_string()))
    }

    async fn get_request_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError> {
        self.record(MockCall::GetWithParams(url.to_string(), params.clone()))
    }

    async fn post_request(&self, url: &str) -> Result<Response, RequestError> {
        self.record(MockCall::Post(url.to_string()))
    }

    async fn post_request_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError> {
        self.record(MockCall::PostWithParams(url.to_string(), params.clone()))
    }
}

/// Creates a test App backed by a fresh MockHttpClient.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(RequestService::new(Arc::new(MockHttpClient::new())))
}
