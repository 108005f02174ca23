use std::sync::Arc;

use m365sec_core::auth::AuthenticationProvider;
use m365sec_core::request::PathParameters;
use m365sec_core::{BaseRequestBuilder, CollectionResponse, Parsable, RequestAdapter, Result};

use crate::auth::{ClientCredentials, ClientCredentialsProvider};
use crate::client::{GraphClient, GraphClientOptions};
use crate::paging::PageIterator;
use crate::security::SecurityRequestBuilder;

/// Entry point: the root of every request builder chain.
#[derive(Clone)]
pub struct GraphServiceClient {
    adapter: Arc<dyn RequestAdapter>,
}

impl GraphServiceClient {
    pub fn new(adapter: Arc<dyn RequestAdapter>) -> Self {
        Self { adapter }
    }

    /// Reqwest adapter authenticated with `auth`.
    pub fn with_auth(
        auth: Arc<dyn AuthenticationProvider>,
        options: GraphClientOptions,
    ) -> Result<Self> {
        let client = GraphClient::with_options(auth, options)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Reqwest adapter using the client-credentials flow. The token scope
    /// and allowed hosts follow `options.base_url`.
    pub fn with_client_credentials(
        credentials: ClientCredentials,
        authority_host: Option<&str>,
        options: GraphClientOptions,
    ) -> Result<Self> {
        let mut provider =
            ClientCredentialsProvider::new(credentials).with_graph_base_url(&options.base_url)?;
        if let Some(host) = authority_host {
            provider = provider.with_authority_host(host);
        }
        Self::with_auth(Arc::new(provider.into_authentication_provider()), options)
    }

    pub fn adapter(&self) -> &Arc<dyn RequestAdapter> {
        &self.adapter
    }

    pub fn security(&self) -> SecurityRequestBuilder {
        SecurityRequestBuilder::new(BaseRequestBuilder::new(
            self.adapter.clone(),
            SecurityRequestBuilder::URL_TEMPLATE,
            PathParameters::new(),
        ))
    }

    /// Walk the pages that follow `first_page`.
    pub fn page_iterator<T: Parsable>(&self, first_page: CollectionResponse<T>) -> PageIterator<T> {
        PageIterator::new(self.adapter.clone(), first_page)
    }
}
