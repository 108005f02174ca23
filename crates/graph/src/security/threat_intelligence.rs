//! `/security/threatIntelligence`

use m365sec_core::CountRequestBuilder;

use crate::models::{
    Article, ArticleIndicator, Host, HostReputation, IntelligenceProfile,
    IntelligenceProfileIndicator, ThreatIntelligence, Vulnerability, WhoisRecord,
};

const LIST_QUERY: &str =
    "{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";

request_builder! {
    ThreatIntelligenceRequestBuilder(
        "{+baseurl}/security/threatIntelligence{?%24expand,%24select}"
    ) -> ThreatIntelligence { get, update, delete }
}

request_builder! {
    ArticlesRequestBuilder(
        "{+baseurl}/security/threatIntelligence/articles{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> Article { list }
}

request_builder! {
    ArticleItemRequestBuilder(
        "{+baseurl}/security/threatIntelligence/articles/{article%2Did}{?%24expand,%24select}"
    ) -> Article { get }
}

request_builder! {
    /// Indicators of compromise cited by one article.
    ArticleIndicatorsOfArticleRequestBuilder(
        "{+baseurl}/security/threatIntelligence/articles/{article%2Did}/indicators{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> ArticleIndicator { list }
}

request_builder! {
    ArticleIndicatorsRequestBuilder(
        "{+baseurl}/security/threatIntelligence/articleIndicators{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> ArticleIndicator { list }
}

request_builder! {
    ArticleIndicatorItemRequestBuilder(
        "{+baseurl}/security/threatIntelligence/articleIndicators/{articleIndicator%2Did}{?%24expand,%24select}"
    ) -> ArticleIndicator { get }
}

request_builder! {
    HostsRequestBuilder(
        "{+baseurl}/security/threatIntelligence/hosts{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> Host { list }
}

request_builder! {
    /// A host, resolved to a hostname or IP address by `@odata.type`.
    HostItemRequestBuilder(
        "{+baseurl}/security/threatIntelligence/hosts/{host%2Did}{?%24expand,%24select}"
    ) -> Host { get }
}

request_builder! {
    HostReputationRequestBuilder(
        "{+baseurl}/security/threatIntelligence/hosts/{host%2Did}/reputation{?%24expand,%24select}"
    ) -> HostReputation { get }
}

request_builder! {
    HostWhoisRequestBuilder(
        "{+baseurl}/security/threatIntelligence/hosts/{host%2Did}/whois{?%24expand,%24select}"
    ) -> WhoisRecord { get }
}

request_builder! {
    VulnerabilitiesRequestBuilder(
        "{+baseurl}/security/threatIntelligence/vulnerabilities{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> Vulnerability { list }
}

request_builder! {
    VulnerabilityItemRequestBuilder(
        "{+baseurl}/security/threatIntelligence/vulnerabilities/{vulnerability%2Did}{?%24expand,%24select}"
    ) -> Vulnerability { get }
}

request_builder! {
    WhoisRecordsRequestBuilder(
        "{+baseurl}/security/threatIntelligence/whoisRecords{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> WhoisRecord { list }
}

request_builder! {
    WhoisRecordItemRequestBuilder(
        "{+baseurl}/security/threatIntelligence/whoisRecords/{whoisRecord%2Did}{?%24expand,%24select}"
    ) -> WhoisRecord { get }
}

request_builder! {
    IntelProfilesRequestBuilder(
        "{+baseurl}/security/threatIntelligence/intelProfiles{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> IntelligenceProfile { list }
}

request_builder! {
    IntelProfileItemRequestBuilder(
        "{+baseurl}/security/threatIntelligence/intelProfiles/{intelligenceProfile%2Did}{?%24expand,%24select}"
    ) -> IntelligenceProfile { get }
}

request_builder! {
    IntelProfileIndicatorsRequestBuilder(
        "{+baseurl}/security/threatIntelligence/intelProfiles/{intelligenceProfile%2Did}/indicators{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> IntelligenceProfileIndicator { list }
}

impl ThreatIntelligenceRequestBuilder {
    pub fn articles(&self) -> ArticlesRequestBuilder {
        ArticlesRequestBuilder::new(self.base.child(ArticlesRequestBuilder::URL_TEMPLATE))
    }

    pub fn article_indicators(&self) -> ArticleIndicatorsRequestBuilder {
        ArticleIndicatorsRequestBuilder::new(
            self.base.child(ArticleIndicatorsRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn hosts(&self) -> HostsRequestBuilder {
        HostsRequestBuilder::new(self.base.child(HostsRequestBuilder::URL_TEMPLATE))
    }

    pub fn vulnerabilities(&self) -> VulnerabilitiesRequestBuilder {
        VulnerabilitiesRequestBuilder::new(
            self.base.child(VulnerabilitiesRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn whois_records(&self) -> WhoisRecordsRequestBuilder {
        WhoisRecordsRequestBuilder::new(self.base.child(WhoisRecordsRequestBuilder::URL_TEMPLATE))
    }

    pub fn intel_profiles(&self) -> IntelProfilesRequestBuilder {
        IntelProfilesRequestBuilder::new(
            self.base.child(IntelProfilesRequestBuilder::URL_TEMPLATE),
        )
    }
}

/// `$count` template for a collection template: the query list is swapped
/// for `/$count{?%24filter,%24search}`.
fn count_of(collection_template: &str) -> String {
    let path = collection_template
        .strip_suffix(LIST_QUERY)
        .unwrap_or(collection_template);
    format!("{path}/$count{{?%24filter,%24search}}")
}

impl ArticlesRequestBuilder {
    pub fn by_article_id(&self, article_id: &str) -> ArticleItemRequestBuilder {
        ArticleItemRequestBuilder::new(self.base.child_with_id(
            ArticleItemRequestBuilder::URL_TEMPLATE,
            "article%2Did",
            article_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

impl ArticleItemRequestBuilder {
    pub fn indicators(&self) -> ArticleIndicatorsOfArticleRequestBuilder {
        ArticleIndicatorsOfArticleRequestBuilder::new(
            self.base
                .child(ArticleIndicatorsOfArticleRequestBuilder::URL_TEMPLATE),
        )
    }
}

impl ArticleIndicatorsOfArticleRequestBuilder {
    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

impl ArticleIndicatorsRequestBuilder {
    pub fn by_article_indicator_id(&self, indicator_id: &str) -> ArticleIndicatorItemRequestBuilder {
        ArticleIndicatorItemRequestBuilder::new(self.base.child_with_id(
            ArticleIndicatorItemRequestBuilder::URL_TEMPLATE,
            "articleIndicator%2Did",
            indicator_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

impl HostsRequestBuilder {
    pub fn by_host_id(&self, host_id: &str) -> HostItemRequestBuilder {
        HostItemRequestBuilder::new(self.base.child_with_id(
            HostItemRequestBuilder::URL_TEMPLATE,
            "host%2Did",
            host_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

impl HostItemRequestBuilder {
    pub fn reputation(&self) -> HostReputationRequestBuilder {
        HostReputationRequestBuilder::new(
            self.base.child(HostReputationRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn whois(&self) -> HostWhoisRequestBuilder {
        HostWhoisRequestBuilder::new(self.base.child(HostWhoisRequestBuilder::URL_TEMPLATE))
    }
}

impl VulnerabilitiesRequestBuilder {
    pub fn by_vulnerability_id(&self, vulnerability_id: &str) -> VulnerabilityItemRequestBuilder {
        VulnerabilityItemRequestBuilder::new(self.base.child_with_id(
            VulnerabilityItemRequestBuilder::URL_TEMPLATE,
            "vulnerability%2Did",
            vulnerability_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

impl WhoisRecordsRequestBuilder {
    pub fn by_whois_record_id(&self, record_id: &str) -> WhoisRecordItemRequestBuilder {
        WhoisRecordItemRequestBuilder::new(self.base.child_with_id(
            WhoisRecordItemRequestBuilder::URL_TEMPLATE,
            "whoisRecord%2Did",
            record_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

impl IntelProfilesRequestBuilder {
    pub fn by_intelligence_profile_id(&self, profile_id: &str) -> IntelProfileItemRequestBuilder {
        IntelProfileItemRequestBuilder::new(self.base.child_with_id(
            IntelProfileItemRequestBuilder::URL_TEMPLATE,
            "intelligenceProfile%2Did",
            profile_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

impl IntelProfileItemRequestBuilder {
    pub fn indicators(&self) -> IntelProfileIndicatorsRequestBuilder {
        IntelProfileIndicatorsRequestBuilder::new(
            self.base
                .child(IntelProfileIndicatorsRequestBuilder::URL_TEMPLATE),
        )
    }
}

impl IntelProfileIndicatorsRequestBuilder {
    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(&count_of(Self::URL_TEMPLATE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_template_replaces_query_list() {
        assert_eq!(
            count_of(HostsRequestBuilder::URL_TEMPLATE),
            "{+baseurl}/security/threatIntelligence/hosts/$count{?%24filter,%24search}"
        );
        assert_eq!(
            count_of(IntelProfileIndicatorsRequestBuilder::URL_TEMPLATE),
            "{+baseurl}/security/threatIntelligence/intelProfiles/{intelligenceProfile%2Did}/indicators/$count{?%24filter,%24search}"
        );
    }
}
