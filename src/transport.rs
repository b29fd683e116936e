//! Network seam of the executor.
//!
//! [`Api`](crate::Api) hands every attempt to a [`Transport`] as a fully
//! resolved [`TransportRequest`]. Two reqwest-backed implementations are
//! provided: [`SessionTransport`] reuses a caller-supplied pooled client,
//! [`OneShotTransport`] builds a fresh client for each call.

use std::future::Future;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::{request::StringMap, NovuError, Result};

/// Everything one network call needs.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: StringMap,
    pub json: Option<JsonValue>,
    pub params: Option<StringMap>,
    pub timeout: Duration,
}

/// Raw status and body of a completed call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP call.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// Sends every call through a shared, connection-pooling `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct SessionTransport {
    client: reqwest::Client,
}

impl SessionTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Transport for SessionTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        dispatch(&self.client, request).await
    }
}

/// Builds a throwaway client for each call, so no connection outlives it.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneShotTransport;

impl Transport for OneShotTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(NovuError::Transport)?;
        dispatch(&client, request).await
    }
}

async fn dispatch(client: &reqwest::Client, request: TransportRequest) -> Result<TransportResponse> {
    let mut builder = client
        .request(request.method, &request.url)
        .timeout(request.timeout);

    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(json) = &request.json {
        builder = builder.json(json);
    }
    if let Some(params) = &request.params {
        builder = builder.query(params);
    }

    let response = builder.send().await.map_err(NovuError::Transport)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(NovuError::Transport)?;
    Ok(TransportResponse { status, body })
}
