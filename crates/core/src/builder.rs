use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::adapter::RequestAdapter;
use crate::error::{GraphError, Result};
use crate::model::{CollectionResponse, Parsable, Primitive};
use crate::odata::ErrorMapping;
use crate::query::{CollectionQuery, CountQuery, NoQuery, QueryParameters, RequestConfiguration};
use crate::request::{HttpMethod, PathParameters, RAW_URL_KEY, RequestInformation};

/// State shared by every request builder: the adapter, the URL template of the
/// builder's path segment and the path parameters collected so far.
#[derive(Clone)]
pub struct BaseRequestBuilder {
    adapter: Arc<dyn RequestAdapter>,
    url_template: String,
    path_parameters: PathParameters,
}

impl BaseRequestBuilder {
    pub fn new(
        adapter: Arc<dyn RequestAdapter>,
        url_template: impl Into<String>,
        path_parameters: PathParameters,
    ) -> Self {
        Self {
            adapter,
            url_template: url_template.into(),
            path_parameters,
        }
    }

    /// Builder that targets `raw_url` verbatim.
    pub fn with_raw_url(
        adapter: Arc<dyn RequestAdapter>,
        url_template: impl Into<String>,
        raw_url: impl Into<String>,
    ) -> Self {
        let mut path_parameters = PathParameters::new();
        path_parameters.insert(RAW_URL_KEY.to_string(), raw_url.into());
        Self::new(adapter, url_template, path_parameters)
    }

    pub fn adapter(&self) -> &Arc<dyn RequestAdapter> {
        &self.adapter
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn path_parameters(&self) -> &PathParameters {
        &self.path_parameters
    }

    /// Base for a child segment: same adapter and parameters, new template.
    pub fn child(&self, url_template: &str) -> BaseRequestBuilder {
        let mut params = self.path_parameters.clone();
        params.remove(RAW_URL_KEY);
        BaseRequestBuilder::new(self.adapter.clone(), url_template, params)
    }

    /// Base for an item segment: the child parameters plus `key = id`.
    pub fn child_with_id(&self, url_template: &str, key: &str, id: &str) -> BaseRequestBuilder {
        let mut child = self.child(url_template);
        child.path_parameters.insert(key.to_string(), id.to_string());
        child
    }

    pub fn to_request_information<Q: QueryParameters>(
        &self,
        method: HttpMethod,
        config: Option<RequestConfiguration<Q>>,
    ) -> RequestInformation {
        let mut info =
            RequestInformation::new(method, self.url_template.clone(), self.path_parameters.clone());
        if let Some(config) = config {
            info.configure(config);
        }
        info.headers.try_add("Accept", "application/json");
        info
    }

    /// Request carrying `body` as JSON content.
    pub fn to_request_information_with_body<B: Parsable, Q: QueryParameters>(
        &self,
        method: HttpMethod,
        body: &B,
        config: Option<RequestConfiguration<Q>>,
    ) -> Result<RequestInformation> {
        let mut info = self.to_request_information(method, config);
        info.set_content_from_parsable(body)?;
        Ok(info)
    }

    /// Send and build `T` from the response root.
    pub async fn send<T: Parsable>(&self, info: RequestInformation) -> Result<Option<T>> {
        debug!(method = %info.method, template = %self.url_template, "sending request");
        let node = self.adapter.send(info, &ErrorMapping::odata()).await?;
        node.map(T::create_from_discriminator_value).transpose()
    }

    pub async fn send_no_content(&self, info: RequestInformation) -> Result<()> {
        debug!(method = %info.method, template = %self.url_template, "sending request");
        self.adapter
            .send_no_content(info, &ErrorMapping::odata())
            .await
    }

    pub async fn send_primitive<T: Primitive>(&self, info: RequestInformation) -> Result<Option<T>> {
        debug!(method = %info.method, template = %self.url_template, "sending request");
        let body = self
            .adapter
            .send_primitive(info, &ErrorMapping::odata())
            .await?;
        body.map(|b| T::from_body(&b)).transpose()
    }

    pub async fn get<T: Parsable, Q: QueryParameters>(
        &self,
        config: Option<RequestConfiguration<Q>>,
    ) -> Result<Option<T>> {
        self.send(self.to_request_information(HttpMethod::Get, config))
            .await
    }

    /// GET a single entity; an empty response is an error.
    pub async fn get_entity<T: Parsable, Q: QueryParameters>(
        &self,
        config: Option<RequestConfiguration<Q>>,
    ) -> Result<T> {
        self.get(config)
            .await?
            .ok_or_else(|| GraphError::MissingBody(self.url_template.clone()))
    }

    /// GET one page of a collection; an empty response is an empty page.
    pub async fn get_collection<T: Parsable>(
        &self,
        config: Option<RequestConfiguration<CollectionQuery>>,
    ) -> Result<CollectionResponse<T>> {
        Ok(self.get(config).await?.unwrap_or_default())
    }

    pub async fn post<B: Parsable, T: Parsable>(
        &self,
        body: &B,
        config: Option<RequestConfiguration>,
    ) -> Result<Option<T>> {
        self.send(self.to_request_information_with_body(HttpMethod::Post, body, config)?)
            .await
    }

    pub async fn patch<B: Parsable, T: Parsable>(
        &self,
        body: &B,
        config: Option<RequestConfiguration>,
    ) -> Result<Option<T>> {
        self.send(self.to_request_information_with_body(HttpMethod::Patch, body, config)?)
            .await
    }

    pub async fn delete(&self, config: Option<RequestConfiguration>) -> Result<()> {
        self.send_no_content(self.to_request_information::<NoQuery>(HttpMethod::Delete, config))
            .await
    }

    /// POST `body` and ignore the response.
    pub async fn post_no_content<B: Parsable>(
        &self,
        body: &B,
        config: Option<RequestConfiguration>,
    ) -> Result<()> {
        self.send_no_content(self.to_request_information_with_body(HttpMethod::Post, body, config)?)
            .await
    }
}

/// `$count` segment of a collection.
#[derive(Clone)]
pub struct CountRequestBuilder {
    base: BaseRequestBuilder,
}

impl CountRequestBuilder {
    pub fn new(base: BaseRequestBuilder) -> Self {
        Self { base }
    }

    pub async fn get(&self, config: Option<RequestConfiguration<CountQuery>>) -> Result<i64> {
        let info = self.to_get_request_information(config);
        Ok(self.base.send_primitive::<i64>(info).await?.unwrap_or(0))
    }

    pub fn to_get_request_information(
        &self,
        config: Option<RequestConfiguration<CountQuery>>,
    ) -> RequestInformation {
        let mut info = self.base.to_request_information(HttpMethod::Get, config);
        info.headers.remove("accept");
        info.headers.add("Accept", "text/plain;q=0.9");
        info
    }
}

/// Parameterless bound action such as `close` or `release`.
#[derive(Clone)]
pub struct ActionRequestBuilder {
    base: BaseRequestBuilder,
}

impl ActionRequestBuilder {
    pub fn new(base: BaseRequestBuilder) -> Self {
        Self { base }
    }

    pub async fn post(&self, config: Option<RequestConfiguration>) -> Result<()> {
        self.base
            .send_no_content(self.to_post_request_information(config))
            .await
    }

    pub fn to_post_request_information(&self, config: Option<RequestConfiguration>) -> RequestInformation {
        self.base.to_request_information(HttpMethod::Post, config)
    }
}

/// Bound action that POSTs a typed body and returns no content.
pub struct BodyActionRequestBuilder<B> {
    base: BaseRequestBuilder,
    body: PhantomData<fn(&B)>,
}

impl<B> Clone for BodyActionRequestBuilder<B> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            body: PhantomData,
        }
    }
}

impl<B: Parsable> BodyActionRequestBuilder<B> {
    pub fn new(base: BaseRequestBuilder) -> Self {
        Self {
            base,
            body: PhantomData,
        }
    }

    pub async fn post(&self, body: &B, config: Option<RequestConfiguration>) -> Result<()> {
        self.base.post_no_content(body, config).await
    }

    pub fn to_post_request_information(
        &self,
        body: &B,
        config: Option<RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.base
            .to_request_information_with_body(HttpMethod::Post, body, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        requests: Mutex<Vec<(HttpMethod, String, Option<Bytes>)>>,
        reply: Option<Value>,
        text: Option<&'static str>,
    }

    #[async_trait]
    impl RequestAdapter for Recorder {
        fn base_url(&self) -> &str {
            "https://graph.microsoft.com/v1.0"
        }

        async fn send(&self, mut info: RequestInformation, _: &ErrorMapping) -> Result<Option<Value>> {
            info.set_base_url(self.base_url());
            self.requests.lock().unwrap().push((
                info.method,
                info.url()?.to_string(),
                info.content.clone(),
            ));
            Ok(self.reply.clone())
        }

        async fn send_no_content(&self, info: RequestInformation, e: &ErrorMapping) -> Result<()> {
            self.send(info, e).await.map(|_| ())
        }

        async fn send_primitive(
            &self,
            info: RequestInformation,
            e: &ErrorMapping,
        ) -> Result<Option<Bytes>> {
            self.send(info, e).await?;
            Ok(self.text.map(|t| Bytes::from_static(t.as_bytes())))
        }
    }

    const COLLECTION: &str =
        "{+baseurl}/security/incidents{?%24count,%24filter,%24top}";
    const ITEM: &str = "{+baseurl}/security/incidents/{incident%2Did}";

    fn base(adapter: Arc<Recorder>) -> BaseRequestBuilder {
        BaseRequestBuilder::new(adapter, COLLECTION, PathParameters::new())
    }

    #[tokio::test]
    async fn get_collection_with_query() {
        let adapter = Arc::new(Recorder {
            reply: Some(json!({"value": [{"id": "1"}]})),
            ..Default::default()
        });
        let page: CollectionResponse<Value> = base(adapter.clone())
            .get(Some(RequestConfiguration::with_query(
                crate::query::CollectionQuery::new().top(1),
            )))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.value.len(), 1);
        let requests = adapter.requests.lock().unwrap();
        assert_eq!(
            requests[0].1,
            "https://graph.microsoft.com/v1.0/security/incidents?%24top=1"
        );
    }

    #[tokio::test]
    async fn child_with_id_targets_item() {
        let adapter = Arc::new(Recorder::default());
        let item = base(adapter.clone()).child_with_id(ITEM, "incident%2Did", "7");
        item.patch::<_, Value>(&json!({"status": "resolved"}), None)
            .await
            .unwrap();
        item.delete(None).await.unwrap();

        let requests = adapter.requests.lock().unwrap();
        assert_eq!(requests[0].0, HttpMethod::Patch);
        assert_eq!(
            requests[0].1,
            "https://graph.microsoft.com/v1.0/security/incidents/7"
        );
        assert_eq!(
            requests[0].2.as_deref(),
            Some(br#"{"status":"resolved"}"#.as_slice())
        );
        assert_eq!(requests[1].0, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn raw_url_is_not_inherited_by_children() {
        let adapter = Arc::new(Recorder::default());
        let raw = BaseRequestBuilder::with_raw_url(adapter.clone(), COLLECTION, "https://x/next");
        let child = raw.child_with_id(ITEM, "incident%2Did", "9");
        assert!(!child.path_parameters().contains_key(RAW_URL_KEY));
    }

    #[tokio::test]
    async fn count_parses_text_body() {
        let adapter = Arc::new(Recorder {
            text: Some("17"),
            ..Default::default()
        });
        let count = CountRequestBuilder::new(base(adapter.clone()).child(
            "{+baseurl}/security/incidents/$count{?%24filter,%24search}",
        ))
        .get(None)
        .await
        .unwrap();
        assert_eq!(count, 17);
    }

    #[tokio::test]
    async fn action_posts_without_body() {
        let adapter = Arc::new(Recorder::default());
        ActionRequestBuilder::new(base(adapter.clone()).child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/microsoft.graph.security.close",
        ))
        .post(None)
        .await
        .unwrap();
        let requests = adapter.requests.lock().unwrap();
        assert_eq!(requests[0].0, HttpMethod::Post);
        assert!(requests[0].2.is_none());
    }

    #[tokio::test]
    async fn body_action_posts_typed_body() {
        let adapter = Arc::new(Recorder::default());
        let action: BodyActionRequestBuilder<Value> = BodyActionRequestBuilder::new(base(adapter.clone()).child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/custodians/microsoft.graph.security.applyHold",
        ));
        let info = action
            .to_post_request_information(&json!({"ids": ["a"]}), None)
            .unwrap();
        assert_eq!(info.headers.get("content-type").unwrap(), ["application/json"]);

        action.post(&json!({"ids": ["a"]}), None).await.unwrap();
        let requests = adapter.requests.lock().unwrap();
        assert_eq!(requests[0].2.as_deref(), Some(br#"{"ids":["a"]}"#.as_slice()));
    }

    #[tokio::test]
    async fn cloned_body_action_keeps_its_url() {
        let adapter = Arc::new(Recorder::default());
        let action: BodyActionRequestBuilder<Value> = BodyActionRequestBuilder::new(base(adapter.clone()).child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/custodians/microsoft.graph.security.applyHold",
        ));
        let copy = action.clone();
        drop(action);

        copy.post(&json!({"ids": ["b"]}), None).await.unwrap();
        let requests = adapter.requests.lock().unwrap();
        assert_eq!(requests[0].0, HttpMethod::Post);
        assert!(requests[0].1.ends_with("/custodians/microsoft.graph.security.applyHold"));
        assert_eq!(requests[0].2.as_deref(), Some(br#"{"ids":["b"]}"#.as_slice()));
    }
}
