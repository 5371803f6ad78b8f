//! HttpTransport port - 外部 review endpoint への GET
//!
//! リトライはしない（スケジューラ側の責務）。

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Raw response: status code and body text, nothing interpreted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("http error: {0}")]
    Other(String),

    #[error("run cancelled while waiting for the review endpoint")]
    Cancelled,
}

impl TransportError {
    /// リクエストがプロセスの外に出たかどうか。URL が組めなかった場合だけ false
    pub fn request_left_process(&self) -> bool {
        !matches!(self, TransportError::InvalidUrl(_))
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;
}
