//! reqwest-backed implementation of the `HttpClient` capability.
//!
//! One `reqwest::Client` is built per `NativeHttpClient` and reused for every
//! call, so connection pooling is whatever reqwest does by default. There is
//! no retry and no timeout override.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;

use crate::network::{HttpClient, Method, Params, RequestError, Response};

/// Content type sent with every POST.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Name the adapter is registered under.
pub const MODULE_NAME: &str = "NetworkModule";

// ============================================================================
// Helpers
// ============================================================================

fn parse_url(url: &str) -> Result<Url, RequestError> {
    Url::parse(url).map_err(|e| {
        warn!("Rejecting invalid URL {:?}: {}", url, e);
        RequestError::InvalidUrl(url.to_string())
    })
}

/// Appends every parameter to the URL's query string, keeping any pairs the
/// URL already carried.
fn url_with_query(url: &str, params: &Params) -> Result<Url, RequestError> {
    let mut parsed = parse_url(url)?;
    if !params.is_empty() {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, &value.as_query_value());
        }
    }
    Ok(parsed)
}

fn json_body(params: &Params) -> Result<String, RequestError> {
    serde_json::to_string(params).map_err(|e| RequestError::Serialization(e.to_string()))
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Adapter issuing real HTTP calls.
#[derive(Clone, Default)]
pub struct NativeHttpClient {
    client: reqwest::Client,
}

impl NativeHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Sends the request and turns the exchange into a single outcome.
    async fn execute(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, RequestError> {
        let response = request.send().await.map_err(|e| {
            warn!("{} transport failure: {}", operation, e);
            RequestError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!("{} response status: {}", operation, status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!("{} unexpected status: {}", operation, status);
            debug!("{} error body: {}", operation, err_body);
            return Err(RequestError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let data = response.text().await.map_err(|e| {
            warn!("{} body read failure: {}", operation, e);
            RequestError::Body(e.to_string())
        })?;

        debug!("{} received {} body bytes", operation, data.len());
        Ok(Response {
            data,
            status_code: status.as_u16(),
        })
    }
}

#[async_trait]
impl HttpClient for NativeHttpClient {
    fn name(&self) -> &str {
        MODULE_NAME
    }

    async fn get_request(&self, url: &str) -> Result<Response, RequestError> {
        let url = parse_url(url)?;
        info!("{} {}", Method::Get.as_str(), url);
        self.execute("getRequest", self.client.get(url)).await
    }

    async fn get_request_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError> {
        let url = url_with_query(url, params)?;
        info!("{} {} ({} params)", Method::Get.as_str(), url, params.len());
        self.execute("getRequestWithParams", self.client.get(url))
            .await
    }

    async fn post_request(&self, url: &str) -> Result<Response, RequestError> {
        let url = parse_url(url)?;
        info!("{} {} (empty body)", Method::Post.as_str(), url);
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(String::new());
        self.execute("postRequest", request).await
    }

    async fn post_request_with_params(
        &self,
        url: &str,
        params: &Params,
    ) -> Result<Response, RequestError> {
        let url = parse_url(url)?;
        let body = json_body(params)?;
        info!("{} {} ({} body bytes)", Method::Post.as_str(), url, body.len());
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.execute("postRequestWithParams", request).await
    }
}
