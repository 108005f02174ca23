use chrono::{DateTime, Utc};
use m365sec_core::backed_model;
use serde_json::Value;

backed_model! {
    /// Score of one control within a secure score snapshot. Open type: extra
    /// per-control fields land in `additional_data`.
    pub struct ControlScore {
        "controlCategory" => control_category, set_control_category: String,
        "controlName" => control_name, set_control_name: String,
        "description" => description, set_description: String,
        "score" => score, set_score: f64,
    }
}

backed_model! {
    /// Daily Microsoft Secure Score snapshot.
    pub struct SecureScore ["#microsoft.graph.secureScore"] {
        "id" => id, set_id: String,
        "activeUserCount" => active_user_count, set_active_user_count: i32,
        "averageComparativeScores" => average_comparative_scores, set_average_comparative_scores: Vec<Value>,
        "azureTenantId" => azure_tenant_id, set_azure_tenant_id: String,
        "controlScores" => control_scores, set_control_scores: Vec<ControlScore>,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "currentScore" => current_score, set_current_score: f64,
        "enabledServices" => enabled_services, set_enabled_services: Vec<String>,
        "licensedUserCount" => licensed_user_count, set_licensed_user_count: i32,
        "maxScore" => max_score, set_max_score: f64,
        "vendorInformation" => vendor_information, set_vendor_information: Value,
    }
}

backed_model! {
    pub struct SecureScoreControlProfile ["#microsoft.graph.secureScoreControlProfile"] {
        "id" => id, set_id: String,
        "actionType" => action_type, set_action_type: String,
        "actionUrl" => action_url, set_action_url: String,
        "azureTenantId" => azure_tenant_id, set_azure_tenant_id: String,
        "complianceInformation" => compliance_information, set_compliance_information: Vec<Value>,
        "controlCategory" => control_category, set_control_category: String,
        "controlStateUpdates" => control_state_updates, set_control_state_updates: Vec<Value>,
        "deprecated" => deprecated, set_deprecated: bool,
        "implementationCost" => implementation_cost, set_implementation_cost: String,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "maxScore" => max_score, set_max_score: f64,
        "rank" => rank, set_rank: i32,
        "remediation" => remediation, set_remediation: String,
        "remediationImpact" => remediation_impact, set_remediation_impact: String,
        "service" => service, set_service: String,
        "threats" => threats, set_threats: Vec<String>,
        "tier" => tier, set_tier: String,
        "title" => title, set_title: String,
        "userImpact" => user_impact, set_user_impact: String,
        "vendorInformation" => vendor_information, set_vendor_information: Value,
    }
}

impl SecureScore {
    /// `current / max` as a percentage.
    pub fn percentage(&self) -> Option<f64> {
        let max = self.max_score()?;
        if max <= 0.0 {
            return None;
        }
        Some(self.current_score()? / max * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m365sec_core::Parsable;
    use serde_json::json;

    #[test]
    fn score_percentage_and_open_control_scores() {
        let score = SecureScore::create_from_discriminator_value(json!({
            "id": "00000000-0000-0000-0000-000000000000_2019-03-19",
            "currentScore": 34.0,
            "maxScore": 136.0,
            "controlScores": [{
                "controlCategory": "Identity",
                "controlName": "AdminMFA",
                "score": 10.0,
                "count": "3",
                "total": "3"
            }]
        }))
        .unwrap();
        assert_eq!(score.percentage(), Some(25.0));
        let controls = score.control_scores().unwrap();
        assert_eq!(controls[0].control_name().as_deref(), Some("AdminMFA"));
        assert_eq!(controls[0].additional_data()["count"], "3");
    }

    #[test]
    fn zero_max_has_no_percentage() {
        let score = SecureScore::create_from_discriminator_value(json!({
            "currentScore": 0.0,
            "maxScore": 0.0
        }))
        .unwrap();
        assert_eq!(score.percentage(), None);
    }
}
