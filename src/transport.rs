//! Sending request descriptors over the wire.

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, StatusCode};
use serde_json::Value;
use std::{collections::BTreeMap, time::Duration};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    options::FetchOptions,
    request::{RequestContext, RequestDescriptor},
};

const MAX_BACKOFF_MS: u64 = 30_000;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the decoded JSON payload.
    async fn send(&self, ctx: &RequestContext, options: &FetchOptions) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("stackfetch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, ctx: &RequestContext, options: &FetchOptions) -> Result<Value> {
        let request = &ctx.request;
        let max_retries = options.max_retries();
        let headers = merged_headers(request, options);
        let mut attempt = 0;

        loop {
            let mut req = self
                .http
                .request(request.method.clone(), &request.url)
                .timeout(options.timeout())
                .json(&request.body);

            for (name, value) in &headers {
                req = req.header(name.as_str(), value.as_str());
            }

            debug!(url = %request.url, attempt, "sending request");
            let response = match req.send().await {
                Ok(response) => response,
                Err(err) if (err.is_timeout() || err.is_connect()) && attempt < max_retries => {
                    attempt += 1;
                    let wait = backoff_delay(attempt, options.base_delay(), None);
                    warn!(url = %request.url, attempt, ?wait, error = %err, "request failed, retrying");
                    tokio::time::sleep(wait).await;
                    continue;
                }
                Err(err) => return Err(Error::Transport(err)),
            };

            let status = response.status();
            if status.is_success() {
                if status == StatusCode::NO_CONTENT {
                    return Ok(serde_json::json!({}));
                }
                return Ok(response.json::<Value>().await?);
            }

            if is_retryable(status) && attempt < max_retries {
                attempt += 1;
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                let wait = backoff_delay(attempt, options.base_delay(), retry_after);
                warn!(url = %request.url, %status, attempt, ?wait, "retrying request");
                tokio::time::sleep(wait).await;
                continue;
            }

            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<empty>"));
            return Err(api_error(status, &text));
        }
    }
}

/// Per-call headers replace stack headers of the same name.
fn merged_headers(request: &RequestDescriptor, options: &FetchOptions) -> BTreeMap<String, String> {
    let mut headers = request.headers.clone();
    headers.extend(
        options
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    headers
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// `Retry-After` when the server sent one, else `base * 2^(attempt-1)`.
/// Both are capped at 30s.
fn backoff_delay(attempt: u32, base: Duration, retry_after: Option<Duration>) -> Duration {
    let cap = Duration::from_millis(MAX_BACKOFF_MS);
    if let Some(wait) = retry_after {
        return wait.min(cap);
    }
    let factor = 1_u64 << attempt.saturating_sub(1).min(16);
    let ms = (base.as_millis() as u64).saturating_mul(factor);
    Duration::from_millis(ms).min(cap)
}

/// The platform reports failures as `{"error_message": .., "error_code": ..}`.
fn api_error(status: StatusCode, body: &str) -> Error {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("error_message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());
    let error_code = parsed
        .as_ref()
        .and_then(|v| v.get("error_code"))
        .and_then(Value::as_i64);

    Error::Api {
        status,
        message,
        error_code,
    }
}
