//! Microsoft Defender Threat Intelligence.

use chrono::{DateTime, Utc};
use m365sec_core::{backed_model, polymorphic_model};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::FormattedContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorSource {
    Microsoft,
    Osint,
    Public,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VulnerabilitySeverity {
    None,
    Low,
    Medium,
    High,
    Critical,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntelligenceProfileKind {
    Actor,
    Tool,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostReputationClassification {
    Unknown,
    Neutral,
    Suspicious,
    Malicious,
    UnknownFutureValue,
}

wire_names!(
    IndicatorSource,
    VulnerabilitySeverity,
    IntelligenceProfileKind,
    HostReputationClassification,
);

backed_model! {
    pub struct GenericHost ["#microsoft.graph.security.host"] {
        "id" => id, set_id: String,
        "firstSeenDateTime" => first_seen_date_time, set_first_seen_date_time: DateTime<Utc>,
        "lastSeenDateTime" => last_seen_date_time, set_last_seen_date_time: DateTime<Utc>,
    }
}

backed_model! {
    pub struct Hostname ["#microsoft.graph.security.hostname"] {
        "id" => id, set_id: String,
        "firstSeenDateTime" => first_seen_date_time, set_first_seen_date_time: DateTime<Utc>,
        "lastSeenDateTime" => last_seen_date_time, set_last_seen_date_time: DateTime<Utc>,
        "registrant" => registrant, set_registrant: String,
        "registrar" => registrar, set_registrar: String,
    }
}

backed_model! {
    pub struct IpAddress ["#microsoft.graph.security.ipAddress"] {
        "id" => id, set_id: String,
        "firstSeenDateTime" => first_seen_date_time, set_first_seen_date_time: DateTime<Utc>,
        "lastSeenDateTime" => last_seen_date_time, set_last_seen_date_time: DateTime<Utc>,
        "autonomousSystem" => autonomous_system, set_autonomous_system: Value,
        "countryOrRegion" => country_or_region, set_country_or_region: String,
        "hostingProvider" => hosting_provider, set_hosting_provider: String,
        "netblock" => netblock, set_netblock: String,
    }
}

polymorphic_model! {
    pub enum Host {
        base: Generic(GenericHost),
        Hostname(Hostname) = "#microsoft.graph.security.hostname",
        IpAddress(IpAddress) = "#microsoft.graph.security.ipAddress",
    }
}

impl Host {
    pub fn id(&self) -> Option<String> {
        match self {
            Self::Generic(h) => h.id(),
            Self::Hostname(h) => h.id(),
            Self::IpAddress(h) => h.id(),
        }
    }

    pub fn first_seen_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Generic(h) => h.first_seen_date_time(),
            Self::Hostname(h) => h.first_seen_date_time(),
            Self::IpAddress(h) => h.first_seen_date_time(),
        }
    }

    pub fn last_seen_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Generic(h) => h.last_seen_date_time(),
            Self::Hostname(h) => h.last_seen_date_time(),
            Self::IpAddress(h) => h.last_seen_date_time(),
        }
    }
}

backed_model! {
    pub struct Article ["#microsoft.graph.security.article"] {
        "id" => id, set_id: String,
        "body" => body, set_body: FormattedContent,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "imageUrl" => image_url, set_image_url: String,
        "isFeatured" => is_featured, set_is_featured: bool,
        "lastUpdatedDateTime" => last_updated_date_time, set_last_updated_date_time: DateTime<Utc>,
        "summary" => summary, set_summary: FormattedContent,
        "tags" => tags, set_tags: Vec<String>,
        "title" => title, set_title: String,
    }
}

backed_model! {
    pub struct ArticleIndicator ["#microsoft.graph.security.articleIndicator"] {
        "id" => id, set_id: String,
        /// The indicator artifact (host, file hash, ...), as returned by Graph.
        "artifact" => artifact, set_artifact: Value,
        "source" => source, set_source: IndicatorSource,
    }
}

backed_model! {
    pub struct Vulnerability ["#microsoft.graph.security.vulnerability"] {
        "id" => id, set_id: String,
        "activeExploitsObserved" => active_exploits_observed, set_active_exploits_observed: bool,
        "commonWeaknessEnumerationIds" => common_weakness_enumeration_ids, set_common_weakness_enumeration_ids: Vec<String>,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "cvss2Summary" => cvss2_summary, set_cvss2_summary: Value,
        "cvss3Summary" => cvss3_summary, set_cvss3_summary: Value,
        "description" => description, set_description: FormattedContent,
        "exploitsAvailable" => exploits_available, set_exploits_available: bool,
        "hasChatter" => has_chatter, set_has_chatter: bool,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "priorityScore" => priority_score, set_priority_score: i32,
        "publishedDateTime" => published_date_time, set_published_date_time: DateTime<Utc>,
        "references" => references, set_references: Vec<Value>,
        "remediation" => remediation, set_remediation: FormattedContent,
        "severity" => severity, set_severity: VulnerabilitySeverity,
    }
}

backed_model! {
    pub struct WhoisRecord ["#microsoft.graph.security.whoisRecord"] {
        "id" => id, set_id: String,
        "abuse" => abuse, set_abuse: Value,
        "domainStatus" => domain_status, set_domain_status: String,
        "expirationDateTime" => expiration_date_time, set_expiration_date_time: DateTime<Utc>,
        "firstSeenDateTime" => first_seen_date_time, set_first_seen_date_time: DateTime<Utc>,
        "host" => host, set_host: Host,
        "lastSeenDateTime" => last_seen_date_time, set_last_seen_date_time: DateTime<Utc>,
        "lastUpdateDateTime" => last_update_date_time, set_last_update_date_time: DateTime<Utc>,
        "nameservers" => nameservers, set_nameservers: Vec<Value>,
        "rawWhoisText" => raw_whois_text, set_raw_whois_text: String,
        "registrant" => registrant, set_registrant: Value,
        "registrar" => registrar, set_registrar: Value,
        "registrationDateTime" => registration_date_time, set_registration_date_time: DateTime<Utc>,
        "whoisServer" => whois_server, set_whois_server: String,
    }
}

backed_model! {
    /// A threat actor or tool tracked by Microsoft.
    pub struct IntelligenceProfile ["#microsoft.graph.security.intelligenceProfile"] {
        "id" => id, set_id: String,
        "aliases" => aliases, set_aliases: Vec<String>,
        "countriesOrRegionsOfOrigin" => countries_or_regions_of_origin, set_countries_or_regions_of_origin: Vec<Value>,
        "description" => description, set_description: FormattedContent,
        "firstActiveDateTime" => first_active_date_time, set_first_active_date_time: DateTime<Utc>,
        "kind" => kind, set_kind: IntelligenceProfileKind,
        "summary" => summary, set_summary: FormattedContent,
        "targets" => targets, set_targets: Vec<String>,
        "title" => title, set_title: String,
        "tradecraft" => tradecraft, set_tradecraft: FormattedContent,
    }
}

backed_model! {
    pub struct IntelligenceProfileIndicator ["#microsoft.graph.security.intelligenceProfileIndicator"] {
        "id" => id, set_id: String,
        "artifact" => artifact, set_artifact: Value,
        "firstSeenDateTime" => first_seen_date_time, set_first_seen_date_time: DateTime<Utc>,
        "lastSeenDateTime" => last_seen_date_time, set_last_seen_date_time: DateTime<Utc>,
        "source" => source, set_source: IndicatorSource,
    }
}

backed_model! {
    pub struct HostReputation ["#microsoft.graph.security.hostReputation"] {
        "id" => id, set_id: String,
        "classification" => classification, set_classification: HostReputationClassification,
        "rules" => rules, set_rules: Vec<Value>,
        "score" => score, set_score: i32,
    }
}
