use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::{
    decode::{decode_failure, decode_success},
    request::{merge_headers, StringMap},
    transport::{OneShotTransport, SessionTransport, Transport, TransportRequest},
    ApiRequest, ClientOptions, NovuConfig, NovuError, Paginator, Result, RetryPolicy,
};

/// Header carrying the idempotency marker of a retried operation.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

#[derive(Clone)]
/// Request executor for the Novu API.
///
/// Signs every request with the configured API key, applies the timeout and
/// retries failures according to the [`RetryPolicy`] in its options.
pub struct Api<T = OneShotTransport> {
    transport: T,
    config: NovuConfig,
    options: ClientOptions,
}

impl<T> fmt::Debug for Api<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("config", &self.config)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Api<OneShotTransport> {
    /// Creates an executor that opens a fresh connection for every call.
    pub fn new(config: NovuConfig) -> Self {
        Self::with_transport(config, OneShotTransport)
    }

    /// Creates an executor from `NOVU_*` environment variables.
    ///
    /// See [`NovuConfig::from_env`] and [`ClientOptions::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(NovuConfig::from_env()?).with_options(ClientOptions::from_env()?))
    }
}

impl Api<SessionTransport> {
    /// Creates an executor that sends every call through `session`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use novu_http::{Api, NovuConfig};
    ///
    /// let session = reqwest::Client::new();
    /// let api = Api::with_session(NovuConfig::new("https://api.novu.co", "key"), session);
    /// ```
    pub fn with_session(config: NovuConfig, session: reqwest::Client) -> Self {
        Self::with_transport(config, SessionTransport::new(session))
    }
}

impl<T: Transport> Api<T> {
    /// Creates an executor over any [`Transport`].
    pub fn with_transport(config: NovuConfig, transport: T) -> Self {
        Self {
            transport,
            config,
            options: ClientOptions::default(),
        }
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn config(&self) -> &NovuConfig {
        &self.config
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` and returns the decoded JSON body.
    ///
    /// Without a retry policy a failing response yields
    /// [`NovuError::Http`]. With one, the identical request is re-sent until
    /// it succeeds or `retry_max` attempts have been made, in which case
    /// [`NovuError::RetryExhausted`] wraps the last failure. A request that
    /// cannot be built (invalid header name or value) is never re-sent.
    pub async fn execute(&self, request: ApiRequest) -> Result<JsonValue> {
        let outgoing = self.prepare(request);

        let Some(policy) = self.options.retry else {
            return self.attempt(outgoing).await;
        };

        let max_attempts = policy.max_attempts();
        let mut attempt = 1u32;
        loop {
            match self.attempt(outgoing.clone()).await {
                Ok(body) => return Ok(body),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt < max_attempts => {
                    self.wait_before_retry(&policy, attempt, &err).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(NovuError::RetryExhausted {
                        attempts: attempt,
                        last: Box::new(err),
                    })
                }
            }
        }
    }

    pub async fn get(&self, url: impl Into<String>) -> Result<JsonValue> {
        self.execute(ApiRequest::get(url)).await
    }

    pub async fn post(&self, url: impl Into<String>, body: JsonValue) -> Result<JsonValue> {
        self.execute(ApiRequest::post(url).json(body)).await
    }

    pub async fn put(&self, url: impl Into<String>, body: JsonValue) -> Result<JsonValue> {
        self.execute(ApiRequest::put(url).json(body)).await
    }

    pub async fn patch(&self, url: impl Into<String>, body: JsonValue) -> Result<JsonValue> {
        self.execute(ApiRequest::patch(url).json(body)).await
    }

    pub async fn delete(&self, url: impl Into<String>) -> Result<JsonValue> {
        self.execute(ApiRequest::delete(url)).await
    }

    /// Iterates over a paginated list endpoint, decoding items as `I`.
    pub fn paginate<I: DeserializeOwned>(&self, url: impl Into<String>) -> Paginator<'_, I, T> {
        Paginator::new(self, url)
    }

    /// Resolves headers and timeout once per logical operation, so every
    /// retry of it goes out byte-for-byte the same.
    fn prepare(&self, request: ApiRequest) -> TransportRequest {
        let mut base = StringMap::from([("Authorization".to_owned(), self.config.authorization())]);
        if self.options.retry.is_some() && request.header_value(IDEMPOTENCY_KEY_HEADER).is_none() {
            base.insert(
                IDEMPOTENCY_KEY_HEADER.to_owned(),
                Uuid::new_v4().to_string(),
            );
        }

        TransportRequest {
            headers: merge_headers(base, request.headers.as_ref()),
            method: request.method,
            url: request.url,
            json: request.body,
            params: request.params,
            timeout: self.options.timeout(),
        }
    }

    async fn attempt(&self, request: TransportRequest) -> Result<JsonValue> {
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(decode_success(&response));
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            status = response.status,
            body = %response.body,
            "novu request failed"
        );

        Err(decode_failure(&response))
    }

    async fn wait_before_retry(&self, policy: &RetryPolicy, attempt: u32, err: &NovuError) {
        let delay = policy.delay_after(attempt);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt,
            ?delay,
            error = %err,
            "retrying novu request"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = err;

        tokio::time::sleep(delay).await;
    }
}
