use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use m365sec_core::adapter::{body_or_none, check_status, parse_json_root};
use m365sec_core::auth::AuthenticationProvider;
use m365sec_core::odata::ErrorMapping;
use m365sec_core::{GraphError, HttpMethod, RequestAdapter, RequestInformation, Result};
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde_json::Value;
use tracing::{debug, warn};

pub const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";
const MAX_RETRIES: u32 = 5;
const MAX_BACKOFF_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct GraphClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub user_agent: String,
}

impl Default for GraphClientOptions {
    fn default() -> Self {
        Self {
            base_url: GRAPH_BASE.to_string(),
            timeout: Duration::from_secs(120),
            max_retries: MAX_RETRIES,
            user_agent: concat!("m365sec/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Request adapter that talks to Graph over reqwest.
#[derive(Clone)]
pub struct GraphClient {
    auth: Arc<dyn AuthenticationProvider>,
    http: reqwest::Client,
    options: GraphClientOptions,
}

impl GraphClient {
    pub fn new(auth: Arc<dyn AuthenticationProvider>) -> Result<Self> {
        Self::with_options(auth, GraphClientOptions::default())
    }

    pub fn with_options(
        auth: Arc<dyn AuthenticationProvider>,
        mut options: GraphClientOptions,
    ) -> Result<Self> {
        options.base_url = options.base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| GraphError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            auth,
            http,
            options,
        })
    }

    pub fn options(&self) -> &GraphClientOptions {
        &self.options
    }

    /// Send `info`, retrying throttled attempts. Returns the final status and body.
    async fn execute(&self, mut info: RequestInformation) -> Result<(u16, Bytes)> {
        info.set_base_url(&self.options.base_url);
        let url = info.url()?;
        let max_retries = info.max_retries().unwrap_or(self.options.max_retries);
        let client_request_id = uuid::Uuid::new_v4().to_string();
        info.headers.try_add("client-request-id", client_request_id.clone());

        let mut retries = 0;
        loop {
            let mut attempt = info.clone();
            self.auth.authenticate_request(&mut attempt).await?;

            let mut req = self.http.request(method(attempt.method), url.clone());
            for (name, value) in attempt.headers.iter() {
                req = req.header(name, value);
            }
            if let Some(timeout) = attempt.timeout() {
                req = req.timeout(timeout);
            }
            if let Some(content) = attempt.content.clone() {
                req = req.body(content);
            }

            debug!(method = %attempt.method, url = %url, client_request_id, "request");
            let resp = req.send().await.map_err(|e| {
                GraphError::Transport(format!("{} {url} failed: {e}", attempt.method))
            })?;
            let status = resp.status();

            if is_throttled(status) && retries < max_retries {
                retries += 1;
                let retry_after = resp
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or_else(|| 2u64.saturating_pow(retries))
                    .min(MAX_BACKOFF_SECS);
                warn!(
                    url = %url,
                    status = status.as_u16(),
                    retry_after,
                    retries,
                    "throttled, backing off"
                );
                tokio::time::sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            let body = resp.bytes().await.map_err(|e| {
                GraphError::Transport(format!("failed to read response from {url}: {e}"))
            })?;
            debug!(url = %url, status = status.as_u16(), bytes = body.len(), "response");
            return Ok((status.as_u16(), body));
        }
    }
}

fn is_throttled(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl RequestAdapter for GraphClient {
    fn base_url(&self) -> &str {
        &self.options.base_url
    }

    async fn send(&self, info: RequestInformation, errors: &ErrorMapping) -> Result<Option<Value>> {
        let (status, body) = self.execute(info).await?;
        check_status(status, &body, errors)?;
        parse_json_root(status, body)
    }

    async fn send_no_content(&self, info: RequestInformation, errors: &ErrorMapping) -> Result<()> {
        let (status, body) = self.execute(info).await?;
        check_status(status, &body, errors)
    }

    async fn send_primitive(
        &self,
        info: RequestInformation,
        errors: &ErrorMapping,
    ) -> Result<Option<Bytes>> {
        let (status, body) = self.execute(info).await?;
        check_status(status, &body, errors)?;
        Ok(body_or_none(status, body))
    }
}
