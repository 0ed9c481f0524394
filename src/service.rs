//! # Request Service
//!
//! Thin async layer between the screen and the HTTP adapter. Each function
//! forwards to the adapter, passes the envelope through unchanged, and on
//! failure logs the error and hands the same `RequestError` back.

use std::sync::Arc;

use log::{debug, error};

use crate::network::{HttpClient, Params, RequestDescriptor, RequestError, RequestKind, Response};

#[derive(Clone)]
pub struct RequestService {
    client: Arc<dyn HttpClient>,
}

impl RequestService {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Name of the adapter this service talks to.
    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    pub async fn get(&self, url: &str) -> Result<Response, RequestError> {
        self.client.get_request(url).await.inspect_err(|e| {
            error!("GET request error: {}", e);
        })
    }

    pub async fn get_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError> {
        self.client
            .get_request_with_params(url, params)
            .await
            .inspect_err(|e| {
                error!("GET request with params error: {}", e);
            })
    }

    pub async fn post(&self, url: &str) -> Result<Response, RequestError> {
        self.client.post_request(url).await.inspect_err(|e| {
            error!("POST request error: {}", e);
        })
    }

    pub async fn post_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError> {
        self.client
            .post_request_with_params(url, params)
            .await
            .inspect_err(|e| {
                error!("POST request with params error: {}", e);
            })
    }

    /// Route a descriptor to the matching operation. A with-params kind that
    /// carries no params sends an empty mapping.
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<Response, RequestError> {
        let empty = Params::new();
        let params = descriptor.params.as_ref().unwrap_or(&empty);
        debug!(
            "Sending {} {} as {}",
            descriptor.method().as_str(),
            descriptor.url,
            descriptor.kind.label()
        );
        match descriptor.kind {
            RequestKind::Get => self.get(&descriptor.url).await,
            RequestKind::GetWithParams => self.get_with_params(&descriptor.url, params).await,
            RequestKind::Post => self.post(&descriptor.url).await,
            RequestKind::PostWithParams => self.post_with_params(&descriptor.url, params).await,
        }
    }
}
