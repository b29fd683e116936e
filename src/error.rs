/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum NovuError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code.
    ///
    /// The display form is exactly `detail`, which is taken from the
    /// response body when it carries one.
    #[error("{detail}")]
    Http {
        /// HTTP status code of the failed response.
        status: u16,
        /// Detail extracted from the body, or a generic fallback.
        detail: String,
    },
    /// Every attempt allowed by the retry policy failed.
    #[error("request failed after {attempts} attempts: {last}")]
    RetryExhausted {
        /// Number of attempts that were sent.
        attempts: u32,
        /// Failure of the final attempt.
        last: Box<NovuError>,
    },
    /// Response decoding or shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl NovuError {
    /// Returns the HTTP status of the failure, looking through retry exhaustion.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::RetryExhausted { last, .. } => last.status(),
            _ => None,
        }
    }

    /// Whether sending the same request again could succeed.
    ///
    /// Only requests that reqwest refuses to build are final.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Transport(err) if err.is_builder())
    }

    /// Whether this error came out of an exhausted retry loop.
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self, Self::RetryExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use crate::NovuError;

    #[test]
    fn http_error_displays_detail_only() {
        let err = NovuError::Http {
            status: 500,
            detail: "my-detail".to_owned(),
        };
        assert_eq!(err.to_string(), "my-detail");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn retry_exhausted_exposes_last_status() {
        let err = NovuError::RetryExhausted {
            attempts: 3,
            last: Box::new(NovuError::Http {
                status: 503,
                detail: "unavailable".to_owned(),
            }),
        };
        assert!(err.is_retry_exhausted());
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "request failed after 3 attempts: unavailable"
        );
    }
}
