use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::error::Result;
use crate::model::Parsable;
use crate::query::{QueryParameters, RequestConfiguration};
use crate::template::{self, TemplateValue};

/// Path parameter holding the adapter's base URL.
pub const BASE_URL_KEY: &str = "baseurl";
/// Path parameter that, when present, is used verbatim instead of the template.
pub const RAW_URL_KEY: &str = "request-raw-url";

pub type PathParameters = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, multi-valued header map. Names are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    inner: BTreeMap<String, Vec<String>>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        self.inner
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Add only when no value exists for `name`. Returns whether it was added.
    pub fn try_add(&mut self, name: &str, value: impl Into<String>) -> bool {
        let key = name.to_ascii_lowercase();
        if self.inner.contains_key(&key) {
            return false;
        }
        self.inner.insert(key, vec![value.into()]);
        true
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.inner.remove(&name.to_ascii_lowercase())
    }

    pub fn extend(&mut self, other: &RequestHeaders) {
        for (name, values) in &other.inner {
            self.inner
                .entry(name.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Options consumed by the adapter rather than sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// Override the adapter's throttling retry budget.
    MaxRetries(u32),
    /// Override the adapter's per-attempt timeout.
    Timeout(Duration),
}

/// Everything an adapter needs to execute one call.
#[derive(Debug, Clone)]
pub struct RequestInformation {
    pub method: HttpMethod,
    pub url_template: String,
    pub path_parameters: PathParameters,
    pub query_parameters: BTreeMap<String, TemplateValue>,
    pub headers: RequestHeaders,
    pub content: Option<Bytes>,
    pub options: Vec<RequestOption>,
}

impl RequestInformation {
    pub fn new(
        method: HttpMethod,
        url_template: impl Into<String>,
        path_parameters: PathParameters,
    ) -> Self {
        Self {
            method,
            url_template: url_template.into(),
            path_parameters,
            query_parameters: BTreeMap::new(),
            headers: RequestHeaders::new(),
            content: None,
            options: Vec::new(),
        }
    }

    /// Request against a fully formed URL, e.g. an `@odata.nextLink`.
    pub fn from_raw_url(method: HttpMethod, raw_url: impl Into<String>) -> Self {
        let mut params = PathParameters::new();
        params.insert(RAW_URL_KEY.to_string(), raw_url.into());
        Self::new(method, String::new(), params)
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.path_parameters
            .insert(BASE_URL_KEY.to_string(), base_url.trim_end_matches('/').to_string());
    }

    /// Resolve the final URL: the raw URL when set, else the expanded template.
    pub fn url(&self) -> Result<Url> {
        if let Some(raw) = self.path_parameters.get(RAW_URL_KEY) {
            return Ok(Url::parse(raw)?);
        }
        let mut vars: BTreeMap<String, TemplateValue> = self
            .path_parameters
            .iter()
            .map(|(k, v)| (k.clone(), TemplateValue::String(v.clone())))
            .collect();
        vars.extend(
            self.query_parameters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        let expanded = template::expand(&self.url_template, &vars)?;
        Ok(Url::parse(&expanded)?)
    }

    pub fn add_query_parameters<Q: QueryParameters>(&mut self, query: &Q) {
        for (name, value) in query.to_query() {
            self.query_parameters.insert(name.to_string(), value);
        }
    }

    pub fn configure<Q: QueryParameters>(&mut self, config: RequestConfiguration<Q>) {
        self.headers.extend(&config.headers);
        self.options.extend(config.options);
        if let Some(ref query) = config.query {
            self.add_query_parameters(query);
        }
    }

    /// Serialize `body` as JSON request content.
    pub fn set_content_from_parsable<T: Parsable>(&mut self, body: &T) -> Result<()> {
        let node = body.serialize_content()?;
        self.content = Some(Bytes::from(serde_json::to_vec(&node)?));
        self.headers.remove("content-type");
        self.headers.add("Content-Type", "application/json");
        Ok(())
    }

    pub fn set_stream_content(&mut self, content: Bytes, content_type: &str) {
        self.content = Some(content);
        self.headers.remove("content-type");
        self.headers.add("Content-Type", content_type);
    }

    pub fn max_retries(&self) -> Option<u32> {
        self.options.iter().rev().find_map(|o| match o {
            RequestOption::MaxRetries(n) => Some(*n),
            _ => None,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.options.iter().rev().find_map(|o| match o {
            RequestOption::Timeout(t) => Some(*t),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{CollectionQuery, ItemQuery};
    use serde_json::json;

    const TEMPLATE: &str =
        "{+baseurl}/security/incidents/{incident%2Did}{?%24expand,%24select}";

    fn info() -> RequestInformation {
        let mut params = PathParameters::new();
        params.insert("incident%2Did".into(), "42".into());
        let mut info = RequestInformation::new(HttpMethod::Get, TEMPLATE, params);
        info.set_base_url("https://graph.microsoft.com/v1.0/");
        info
    }

    #[test]
    fn url_expands_template_with_base_url() {
        let url = info().url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://graph.microsoft.com/v1.0/security/incidents/42"
        );
    }

    #[test]
    fn configure_adds_query_headers_and_options() {
        let mut info = info();
        info.configure(
            RequestConfiguration::with_query(ItemQuery::default().select(["id", "status"]))
                .header("ConsistencyLevel", "eventual")
                .option(RequestOption::MaxRetries(2)),
        );
        assert_eq!(
            info.url().unwrap().as_str(),
            "https://graph.microsoft.com/v1.0/security/incidents/42?%24select=id,status"
        );
        assert!(info.headers.contains("consistencylevel"));
        assert_eq!(info.max_retries(), Some(2));
        assert_eq!(info.timeout(), None);
    }

    #[test]
    fn unknown_query_names_are_ignored_by_template() {
        let mut info = info();
        info.add_query_parameters(&CollectionQuery::new().top(3));
        assert!(!info.url().unwrap().as_str().contains("top"));
    }

    #[test]
    fn raw_url_bypasses_template() {
        let info = RequestInformation::from_raw_url(
            HttpMethod::Get,
            "https://graph.microsoft.com/v1.0/security/incidents?$skiptoken=abc",
        );
        assert_eq!(
            info.url().unwrap().as_str(),
            "https://graph.microsoft.com/v1.0/security/incidents?$skiptoken=abc"
        );
    }

    #[test]
    fn json_content_sets_content_type() {
        let mut info = info();
        info.set_content_from_parsable(&json!({"status": "resolved"}))
            .unwrap();
        assert_eq!(
            info.headers.get("content-type"),
            Some(&["application/json".to_string()][..])
        );
        assert_eq!(
            info.content.as_deref(),
            Some(br#"{"status":"resolved"}"#.as_slice())
        );
    }

    #[test]
    fn headers_are_case_insensitive() {
        let mut headers = RequestHeaders::new();
        headers.add("Accept", "application/json");
        assert!(!headers.try_add("accept", "text/plain"));
        assert!(headers.try_add("Prefer", "odata.maxpagesize=10"));
        assert_eq!(headers.iter().count(), 2);
        assert_eq!(headers.remove("ACCEPT"), Some(vec!["application/json".to_string()]));
    }
}
