//! `novu-http` is the async request layer of a Novu API client.
//!
//! Every call goes through [`Api::execute`], which:
//! - signs the request with `Authorization: ApiKey <key>`
//! - applies the configured timeout
//! - retries failures per [`RetryPolicy`] with exponential backoff
//!
//! Resource-specific wrappers build an [`ApiRequest`] and hand it over.

mod client;
mod config;
mod decode;
mod error;
mod options;
mod pagination;
mod request;
mod retry;
pub mod transport;

pub use client::{Api, IDEMPOTENCY_KEY_HEADER};
pub use config::{NovuConfig, DEFAULT_BASE_URL};
pub use error::NovuError;
pub use options::{ClientOptions, DEFAULT_TIMEOUT_MS};
pub use pagination::{Paginator, DEFAULT_PAGE_LIMIT};
pub use request::{ApiRequest, StringMap};
pub use retry::RetryPolicy;
pub use transport::{
    OneShotTransport, SessionTransport, Transport, TransportRequest, TransportResponse,
};

pub use reqwest::Method;

pub type Result<T> = std::result::Result<T, NovuError>;
