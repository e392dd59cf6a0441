use async_trait::async_trait;
use board_core::{ApiError, ApiResult, Method, RawResponse, Transport};
use gloo_net::http::RequestBuilder;
use serde_json::Value;

use crate::markup::endpoint;

/// Транспорт до API через `fetch` браузера.
pub(crate) struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

fn fetch_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ApiResult<RawResponse> {
        let mut builder =
            RequestBuilder::new(&endpoint(&self.base_url, path)).method(fetch_method(method));
        if let Some(token) = token {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|err| ApiError::Network(err.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
