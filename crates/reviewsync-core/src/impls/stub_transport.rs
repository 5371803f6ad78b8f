//! StubTransport - テスト用の HttpTransport
//!
//! 事前に決めた応答を返し、要求された URL をすべて記録する。

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::ports::{HttpResponse, HttpTransport, TransportError};

enum Behaviour {
    Respond(Result<HttpResponse, TransportError>),
    Hang,
}

pub struct StubTransport {
    behaviour: Behaviour,
    delay: Option<Duration>,
    /// 要求された URL の記録
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    /// Always answer with `response`.
    pub fn responding(response: HttpResponse) -> Self {
        Self::new(Behaviour::Respond(Ok(response)))
    }

    /// Always answer `200` with the given JSON body.
    pub fn json(body: &str) -> Self {
        Self::responding(HttpResponse::ok(body))
    }

    /// Always fail with `err`.
    pub fn failing(err: TransportError) -> Self {
        Self::new(Behaviour::Respond(Err(err)))
    }

    /// 応答しない（timeout と cancel のテスト用）
    pub fn hanging() -> Self {
        Self::new(Behaviour::Hang)
    }

    /// 応答前に sleep する
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behaviour {
            Behaviour::Respond(r) => r.clone(),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}
