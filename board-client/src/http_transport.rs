use std::time::Duration;

use async_trait::async_trait;
use board_core::{ApiError, ApiResult, Method, RawResponse, Transport};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{BoardClientError, BoardClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Таймауты HTTP-клиента.
pub struct Timeouts {
    /// Таймаут установки соединения.
    pub connect: Duration,
    /// Таймаут запроса целиком.
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            request: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-транспорт до API доски на `reqwest`.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Создаёт транспорт с базовым URL сервера и таймаутами по умолчанию.
    pub fn new(base_url: impl Into<String>) -> BoardClientResult<Self> {
        Self::with_timeouts(base_url, Timeouts::default())
    }

    /// Создаёт транспорт с заданными таймаутами.
    pub fn with_timeouts(base_url: impl Into<String>, timeouts: Timeouts) -> BoardClientResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(BoardClientError::InvalidBaseUrl(base_url));
        }

        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Базовый URL сервера.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ApiResult<RawResponse> {
        let url = self.endpoint(path);
        debug!(method = method.as_str(), %url, "sending request");

        let mut request = self.client.request(reqwest_method(method), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        debug!(method = method.as_str(), path, status, "response received");
        Ok(RawResponse { status, body })
    }
}
