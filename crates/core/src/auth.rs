use std::collections::HashSet;

use async_trait::async_trait;
use url::Url;

use crate::error::{GraphError, Result};
use crate::request::RequestInformation;

/// Authenticates an outgoing request, typically by adding an `Authorization` header.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    async fn authenticate_request(&self, info: &mut RequestInformation) -> Result<()>;
}

/// Leaves requests untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAuthenticationProvider;

#[async_trait]
impl AuthenticationProvider for AnonymousAuthenticationProvider {
    async fn authenticate_request(&self, _info: &mut RequestInformation) -> Result<()> {
        Ok(())
    }
}

/// Supplies bearer tokens for a target URL. An empty token means "send none".
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn get_authorization_token(&self, url: &Url) -> Result<String>;
    fn allowed_hosts(&self) -> &AllowedHosts;
}

/// Hosts a token may be sent to. An empty set allows every host.
#[derive(Debug, Clone, Default)]
pub struct AllowedHosts {
    hosts: HashSet<String>,
}

impl AllowedHosts {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn is_url_host_valid(&self, url: &Url) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        url.host_str()
            .is_some_and(|h| self.hosts.contains(&h.to_ascii_lowercase()))
    }

    /// Whether a token should be attached for `url`. Errors for plain-HTTP
    /// URLs outside localhost.
    pub fn should_authenticate(&self, url: &Url) -> Result<bool> {
        if !self.is_url_host_valid(url) {
            return Ok(false);
        }
        let local = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
        if url.scheme() != "https" && !local {
            return Err(GraphError::Auth(format!(
                "refusing to send a token over {} to {}",
                url.scheme(),
                url.host_str().unwrap_or("unknown host")
            )));
        }
        Ok(true)
    }
}

/// Adds `Authorization: Bearer <token>` from an [`AccessTokenProvider`].
#[derive(Debug, Clone)]
pub struct BaseBearerTokenAuthenticationProvider<P> {
    provider: P,
}

impl<P> BaseBearerTokenAuthenticationProvider<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn access_token_provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: AccessTokenProvider> AuthenticationProvider for BaseBearerTokenAuthenticationProvider<P> {
    async fn authenticate_request(&self, info: &mut RequestInformation) -> Result<()> {
        if info.headers.contains("authorization") {
            return Ok(());
        }
        let url = info.url()?;
        let token = self.provider.get_authorization_token(&url).await?;
        if !token.is_empty() {
            info.headers.add("Authorization", format!("Bearer {token}"));
        }
        Ok(())
    }
}

/// A token acquired elsewhere.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
    allowed_hosts: AllowedHosts,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>, allowed_hosts: AllowedHosts) -> Self {
        Self {
            token: token.into(),
            allowed_hosts,
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn get_authorization_token(&self, url: &Url) -> Result<String> {
        if !self.allowed_hosts.should_authenticate(url)? {
            return Ok(String::new());
        }
        Ok(self.token.clone())
    }

    fn allowed_hosts(&self) -> &AllowedHosts {
        &self.allowed_hosts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;

    fn request(url: &str) -> RequestInformation {
        RequestInformation::from_raw_url(HttpMethod::Get, url)
    }

    fn provider(hosts: &[&str]) -> BaseBearerTokenAuthenticationProvider<StaticTokenProvider> {
        BaseBearerTokenAuthenticationProvider::new(StaticTokenProvider::new(
            "tok",
            AllowedHosts::new(hosts),
        ))
    }

    #[tokio::test]
    async fn adds_bearer_header_for_allowed_host() {
        let mut info = request("https://graph.microsoft.com/v1.0/security");
        provider(&["graph.microsoft.com"])
            .authenticate_request(&mut info)
            .await
            .unwrap();
        assert_eq!(
            info.headers.get("Authorization"),
            Some(&["Bearer tok".to_string()][..])
        );
    }

    #[tokio::test]
    async fn skips_other_hosts() {
        let mut info = request("https://example.com/file");
        provider(&["graph.microsoft.com"])
            .authenticate_request(&mut info)
            .await
            .unwrap();
        assert!(!info.headers.contains("authorization"));
    }

    #[tokio::test]
    async fn keeps_existing_authorization() {
        let mut info = request("https://graph.microsoft.com/v1.0/security");
        info.headers.add("Authorization", "Bearer mine");
        provider(&[]).authenticate_request(&mut info).await.unwrap();
        assert_eq!(
            info.headers.get("authorization"),
            Some(&["Bearer mine".to_string()][..])
        );
    }

    #[tokio::test]
    async fn rejects_plain_http_outside_localhost() {
        let mut info = request("http://graph.microsoft.com/v1.0/security");
        let err = provider(&[]).authenticate_request(&mut info).await.unwrap_err();
        assert!(matches!(err, GraphError::Auth(_)));

        let mut local = request("http://localhost:8080/v1.0/security");
        provider(&[]).authenticate_request(&mut local).await.unwrap();
        assert!(local.headers.contains("authorization"));
    }
}
