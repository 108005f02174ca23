use chrono::{DateTime, Utc};
use m365sec_core::backed_model;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertSeverity {
    Unknown,
    Informational,
    Low,
    Medium,
    High,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertStatus {
    Unknown,
    New,
    InProgress,
    Resolved,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertClassification {
    Unknown,
    FalsePositive,
    TruePositive,
    InformationalExpectedActivity,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertDetermination {
    Unknown,
    Apt,
    Malware,
    SecurityPersonnel,
    SecurityTesting,
    UnwantedSoftware,
    Other,
    MultiStagedAttack,
    CompromisedAccount,
    Phishing,
    MaliciousUserActivity,
    NotMalicious,
    NotEnoughDataToValidate,
    ConfirmedActivity,
    LineOfBusinessApplication,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncidentStatus {
    Active,
    Resolved,
    InProgress,
    Redirected,
    UnknownFutureValue,
    AwaitingAction,
}

/// Product that raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceSource {
    Unknown,
    MicrosoftDefenderForEndpoint,
    MicrosoftDefenderForIdentity,
    MicrosoftDefenderForCloudApps,
    MicrosoftDefenderForOffice365,
    Microsoft365Defender,
    AzureAdIdentityProtection,
    MicrosoftAppGovernance,
    DataLossPrevention,
    UnknownFutureValue,
    MicrosoftDefenderForCloud,
    MicrosoftSentinel,
    MicrosoftInsiderRiskManagement,
}

wire_names!(
    AlertSeverity,
    AlertStatus,
    AlertClassification,
    AlertDetermination,
    IncidentStatus,
    ServiceSource,
);

backed_model! {
    pub struct AlertComment ["#microsoft.graph.security.alertComment"] {
        "comment" => comment, set_comment: String,
        "createdByDisplayName" => created_by_display_name, set_created_by_display_name: String,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
    }
}

backed_model! {
    /// A potential security issue detected by a Microsoft 365 Defender product.
    pub struct Alert ["#microsoft.graph.security.alert"] {
        "id" => id, set_id: String,
        "actorDisplayName" => actor_display_name, set_actor_display_name: String,
        "alertWebUrl" => alert_web_url, set_alert_web_url: String,
        "assignedTo" => assigned_to, set_assigned_to: String,
        "category" => category, set_category: String,
        "classification" => classification, set_classification: AlertClassification,
        "comments" => comments, set_comments: Vec<AlertComment>,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "description" => description, set_description: String,
        "detectionSource" => detection_source, set_detection_source: String,
        "detectorId" => detector_id, set_detector_id: String,
        "determination" => determination, set_determination: AlertDetermination,
        /// Evidence entries, kept as raw JSON.
        "evidence" => evidence, set_evidence: Vec<Value>,
        "firstActivityDateTime" => first_activity_date_time, set_first_activity_date_time: DateTime<Utc>,
        "incidentId" => incident_id, set_incident_id: String,
        "incidentWebUrl" => incident_web_url, set_incident_web_url: String,
        "lastActivityDateTime" => last_activity_date_time, set_last_activity_date_time: DateTime<Utc>,
        "lastUpdateDateTime" => last_update_date_time, set_last_update_date_time: DateTime<Utc>,
        "mitreTechniques" => mitre_techniques, set_mitre_techniques: Vec<String>,
        "providerAlertId" => provider_alert_id, set_provider_alert_id: String,
        "recommendedActions" => recommended_actions, set_recommended_actions: String,
        "resolvedDateTime" => resolved_date_time, set_resolved_date_time: DateTime<Utc>,
        "serviceSource" => service_source, set_service_source: ServiceSource,
        "severity" => severity, set_severity: AlertSeverity,
        "status" => status, set_status: AlertStatus,
        "tenantId" => tenant_id, set_tenant_id: String,
        "threatDisplayName" => threat_display_name, set_threat_display_name: String,
        "threatFamilyName" => threat_family_name, set_threat_family_name: String,
        "title" => title, set_title: String,
    }
}

backed_model! {
    /// A collection of correlated alerts.
    pub struct Incident ["#microsoft.graph.security.incident"] {
        "id" => id, set_id: String,
        /// Present only when requested with `$expand=alerts`.
        "alerts" => alerts, set_alerts: Vec<Alert>,
        "assignedTo" => assigned_to, set_assigned_to: String,
        "classification" => classification, set_classification: AlertClassification,
        "comments" => comments, set_comments: Vec<AlertComment>,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "customTags" => custom_tags, set_custom_tags: Vec<String>,
        "description" => description, set_description: String,
        "determination" => determination, set_determination: AlertDetermination,
        "displayName" => display_name, set_display_name: String,
        "incidentWebUrl" => incident_web_url, set_incident_web_url: String,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: String,
        "lastUpdateDateTime" => last_update_date_time, set_last_update_date_time: DateTime<Utc>,
        "redirectIncidentId" => redirect_incident_id, set_redirect_incident_id: String,
        "resolvingComment" => resolving_comment, set_resolving_comment: String,
        "severity" => severity, set_severity: AlertSeverity,
        "status" => status, set_status: IncidentStatus,
        "summary" => summary, set_summary: String,
        "systemTags" => system_tags, set_system_tags: Vec<String>,
        "tenantId" => tenant_id, set_tenant_id: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m365sec_core::{BackedModel, BackingStore, Parsable};
    use serde_json::json;

    fn sample_alert() -> Alert {
        Alert::create_from_discriminator_value(json!({
            "@odata.type": "#microsoft.graph.security.alert",
            "id": "da637551227677560813_-961444813",
            "title": "Suspicious execution of hidden file",
            "severity": "medium",
            "status": "new",
            "serviceSource": "microsoftDefenderForEndpoint",
            "createdDateTime": "2021-04-27T12:52:47.6149012Z",
            "mitreTechniques": ["T1564.001"],
            "comments": [{"comment": "looking", "createdByDisplayName": "soc"}],
            "evidence": [{"@odata.type": "#microsoft.graph.security.deviceEvidence"}]
        }))
        .unwrap()
    }

    #[test]
    fn parses_alert() {
        let alert = sample_alert();
        assert_eq!(alert.severity(), Some(AlertSeverity::Medium));
        assert_eq!(alert.status(), Some(AlertStatus::New));
        assert_eq!(
            alert.service_source(),
            Some(ServiceSource::MicrosoftDefenderForEndpoint)
        );
        assert_eq!(alert.mitre_techniques().unwrap(), vec!["T1564.001"]);
        assert_eq!(alert.comments().unwrap()[0].comment().as_deref(), Some("looking"));
        assert_eq!(alert.evidence().unwrap().len(), 1);
        assert!(alert.created_date_time().is_some());
    }

    #[test]
    fn triage_update_sends_only_changed_fields() {
        let mut alert = sample_alert();
        alert.set_status(Some(AlertStatus::Resolved));
        alert.set_classification(Some(AlertClassification::TruePositive));
        alert.set_determination(Some(AlertDetermination::Malware));
        assert_eq!(
            alert.serialize_content().unwrap(),
            json!({
                "status": "resolved",
                "classification": "truePositive",
                "determination": "malware"
            })
        );
    }

    #[test]
    fn unknown_member_reads_as_none() {
        let alert = Alert::create_from_discriminator_value(json!({"severity": "catastrophic"})).unwrap();
        assert_eq!(alert.severity(), None);
        assert_eq!(alert.backing_store().get("severity"), Some(&json!("catastrophic")));
    }

    #[test]
    fn enum_names_round_trip_through_strings() {
        assert_eq!(IncidentStatus::AwaitingAction.to_string(), "awaitingAction");
        assert_eq!(
            "informationalExpectedActivity".parse::<AlertClassification>().unwrap(),
            AlertClassification::InformationalExpectedActivity
        );
        assert_eq!(
            "microsoft365Defender".parse::<ServiceSource>().unwrap(),
            ServiceSource::Microsoft365Defender
        );
    }

    #[test]
    fn incident_with_expanded_alerts() {
        let incident = Incident::create_from_discriminator_value(json!({
            "id": "2972395",
            "displayName": "Multi-stage incident involving Initial access",
            "status": "active",
            "alerts": [{"id": "a1", "severity": "high"}]
        }))
        .unwrap();
        let alerts = incident.alerts().unwrap();
        assert_eq!(alerts[0].severity(), Some(AlertSeverity::High));
        assert_eq!(incident.status(), Some(IncidentStatus::Active));
    }
}
