use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use m365sec_core::auth::{AccessTokenProvider, AllowedHosts, BaseBearerTokenAuthenticationProvider};
use m365sec_core::{GraphError, Result};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Graph hosts across the public and national clouds.
pub const GRAPH_HOSTS: &[&str] = &[
    "graph.microsoft.com",
    "graph.microsoft.us",
    "dod-graph.microsoft.us",
    "graph.microsoft.de",
    "microsoftgraph.chinacloudapi.cn",
    "canary.graph.microsoft.com",
];

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// OAuth2 client-credentials flow against the Microsoft identity platform.
#[derive(Clone)]
pub struct ClientCredentialsProvider {
    credentials: ClientCredentials,
    authority_host: String,
    scope: String,
    allowed_hosts: AllowedHosts,
    http: reqwest::Client,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl ClientCredentialsProvider {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            scope: GRAPH_SCOPE.to_string(),
            allowed_hosts: AllowedHosts::new(GRAPH_HOSTS),
            http: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Use a different login endpoint, e.g. for a national cloud.
    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_allowed_hosts(mut self, allowed_hosts: AllowedHosts) -> Self {
        self.allowed_hosts = allowed_hosts;
        self
    }

    /// Target the Graph deployment at `base_url`. Tokens are only sent to
    /// its host, and a national-cloud host gets its own `/.default` scope.
    pub fn with_graph_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| GraphError::InvalidUrl(format!("{base_url}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| GraphError::InvalidUrl(format!("{base_url}: missing host")))?
            .to_ascii_lowercase();
        if GRAPH_HOSTS.contains(&host.as_str()) {
            self.scope = format!("https://{host}/.default");
        }
        self.allowed_hosts = AllowedHosts::new([host]);
        Ok(self)
    }

    /// Wrap as a bearer-token authentication provider.
    pub fn into_authentication_provider(self) -> BaseBearerTokenAuthenticationProvider<Self> {
        BaseBearerTokenAuthenticationProvider::new(self)
    }

    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.expires_at > Instant::now() + EXPIRY_MARGIN
            {
                return Ok(cached.access_token.clone());
            }
        }

        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host, self.credentials.tenant_id
        );
        debug!(url = %url, "requesting token");
        let resp = self
            .http
            .post(&url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("scope", self.scope.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| GraphError::Auth(format!("token request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GraphError::Auth(format!(
                "token request failed ({status}): {body}"
            )));
        }

        let token_resp: TokenResponse = resp
            .json()
            .await
            .map_err(|e| GraphError::Auth(format!("failed to parse token response: {e}")))?;
        info!(
            tenant = %self.credentials.tenant_id,
            expires_in = token_resp.expires_in,
            "acquired access token"
        );
        let cached = CachedToken {
            access_token: token_resp.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(token_resp.expires_in),
        };

        let mut cache = self.cache.write().await;
        *cache = Some(cached);

        Ok(token_resp.access_token)
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsProvider {
    async fn get_authorization_token(&self, url: &Url) -> Result<String> {
        if !self.allowed_hosts.should_authenticate(url)? {
            return Ok(String::new());
        }
        self.get_token().await
    }

    fn allowed_hosts(&self) -> &AllowedHosts {
        &self.allowed_hosts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ClientCredentialsProvider {
        ClientCredentialsProvider::new(ClientCredentials {
            client_id: "app".into(),
            client_secret: "secret".into(),
            tenant_id: "tenant".into(),
        })
    }

    #[test]
    fn national_cloud_base_url_sets_scope_and_hosts() {
        let us = provider()
            .with_graph_base_url("https://graph.microsoft.us/v1.0")
            .unwrap();
        assert_eq!(us.scope, "https://graph.microsoft.us/.default");
        assert!(us.allowed_hosts.is_url_host_valid(&Url::parse("https://graph.microsoft.us/v1.0/security").unwrap()));
        assert!(!us.allowed_hosts.is_url_host_valid(&Url::parse("https://graph.microsoft.com/v1.0/security").unwrap()));

        let china = provider()
            .with_graph_base_url("https://microsoftgraph.chinacloudapi.cn/beta")
            .unwrap();
        assert_eq!(china.scope, "https://microsoftgraph.chinacloudapi.cn/.default");
    }

    #[test]
    fn commercial_and_custom_hosts_keep_default_scope() {
        assert_eq!(provider().scope, GRAPH_SCOPE);
        let commercial = provider()
            .with_graph_base_url("https://graph.microsoft.com/v1.0")
            .unwrap();
        assert_eq!(commercial.scope, GRAPH_SCOPE);

        let proxy = provider()
            .with_graph_base_url("http://127.0.0.1:8080/v1.0")
            .unwrap();
        assert_eq!(proxy.scope, GRAPH_SCOPE);
        assert!(proxy.allowed_hosts.is_url_host_valid(&Url::parse("http://127.0.0.1:8080/security").unwrap()));
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let err = provider().with_graph_base_url("not a url").err().unwrap();
        assert!(matches!(err, GraphError::InvalidUrl(_)));
    }
}
