use crate::request::{RequestHeaders, RequestOption};
use crate::template::TemplateValue;

/// Query options of one endpoint, keyed by their URL template names.
pub trait QueryParameters {
    fn to_query(&self) -> Vec<(&'static str, TemplateValue)>;
}

/// Endpoints that take no query options.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuery;

impl QueryParameters for NoQuery {
    fn to_query(&self) -> Vec<(&'static str, TemplateValue)> {
        Vec::new()
    }
}

/// OData options accepted by collection GETs.
#[derive(Debug, Clone, Default)]
pub struct CollectionQuery {
    pub count: Option<bool>,
    pub expand: Vec<String>,
    pub filter: Option<String>,
    pub orderby: Vec<String>,
    pub search: Option<String>,
    pub select: Vec<String>,
    pub skip: Option<i32>,
    pub top: Option<i32>,
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    pub fn expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn orderby<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.orderby = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Graph expects `$search` values wrapped in double quotes.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip(mut self, skip: i32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn top(mut self, top: i32) -> Self {
        self.top = Some(top);
        self
    }
}

impl QueryParameters for CollectionQuery {
    fn to_query(&self) -> Vec<(&'static str, TemplateValue)> {
        let mut q = Vec::new();
        if let Some(count) = self.count {
            q.push(("%24count", count.into()));
        }
        if !self.expand.is_empty() {
            q.push(("%24expand", self.expand.clone().into()));
        }
        if let Some(ref filter) = self.filter {
            q.push(("%24filter", filter.as_str().into()));
        }
        if !self.orderby.is_empty() {
            q.push(("%24orderby", self.orderby.clone().into()));
        }
        if let Some(ref search) = self.search {
            q.push(("%24search", search.as_str().into()));
        }
        if !self.select.is_empty() {
            q.push(("%24select", self.select.clone().into()));
        }
        if let Some(skip) = self.skip {
            q.push(("%24skip", skip.into()));
        }
        if let Some(top) = self.top {
            q.push(("%24top", top.into()));
        }
        q
    }
}

/// OData options accepted by single-entity GETs.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub expand: Vec<String>,
    pub select: Vec<String>,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl QueryParameters for ItemQuery {
    fn to_query(&self) -> Vec<(&'static str, TemplateValue)> {
        let mut q = Vec::new();
        if !self.expand.is_empty() {
            q.push(("%24expand", self.expand.clone().into()));
        }
        if !self.select.is_empty() {
            q.push(("%24select", self.select.clone().into()));
        }
        q
    }
}

/// Options accepted by `$count` segments.
#[derive(Debug, Clone, Default)]
pub struct CountQuery {
    pub filter: Option<String>,
    pub search: Option<String>,
}

impl QueryParameters for CountQuery {
    fn to_query(&self) -> Vec<(&'static str, TemplateValue)> {
        let mut q = Vec::new();
        if let Some(ref filter) = self.filter {
            q.push(("%24filter", filter.as_str().into()));
        }
        if let Some(ref search) = self.search {
            q.push(("%24search", search.as_str().into()));
        }
        q
    }
}

/// Per-call headers, options and query parameters.
#[derive(Debug, Clone)]
pub struct RequestConfiguration<Q = NoQuery> {
    pub headers: RequestHeaders,
    pub options: Vec<RequestOption>,
    pub query: Option<Q>,
}

impl<Q> Default for RequestConfiguration<Q> {
    fn default() -> Self {
        Self {
            headers: RequestHeaders::new(),
            options: Vec::new(),
            query: None,
        }
    }
}

impl<Q> RequestConfiguration<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: Q) -> Self {
        Self {
            query: Some(query),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    pub fn option(mut self, option: RequestOption) -> Self {
        self.options.push(option);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_query_emits_only_set_options() {
        let q = CollectionQuery::new()
            .top(5)
            .filter("severity eq 'high'")
            .select(["id", "title"]);
        let names: Vec<_> = q.to_query().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["%24filter", "%24select", "%24top"]);
    }

    #[test]
    fn empty_queries_emit_nothing() {
        assert!(CollectionQuery::default().to_query().is_empty());
        assert!(ItemQuery::default().to_query().is_empty());
        assert!(CountQuery::default().to_query().is_empty());
        assert!(NoQuery.to_query().is_empty());
    }

    #[test]
    fn configuration_builders() {
        let cfg: RequestConfiguration<ItemQuery> =
            RequestConfiguration::with_query(ItemQuery::default().select(["id"]))
                .header("Prefer", "return=minimal")
                .option(RequestOption::MaxRetries(1));
        assert_eq!(cfg.headers.get("prefer"), Some(&["return=minimal".to_string()][..]));
        assert_eq!(cfg.options.len(), 1);
        assert!(cfg.query.is_some());
    }
}
