use chrono::{DateTime, Utc};
use m365sec_core::backed_model;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::EmailIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationStatus {
    Unknown,
    Draft,
    Running,
    Scheduled,
    Succeeded,
    Failed,
    Cancelled,
    Excluded,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationAttackType {
    Unknown,
    Social,
    Cloud,
    Endpoint,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationAttackTechnique {
    Unknown,
    CredentialHarvesting,
    AttachmentMalware,
    DriveByUrl,
    LinkInAttachment,
    LinkToMalwareFile,
    UnknownFutureValue,
    OAuthConsentGrant,
    PhishTraining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadDeliveryPlatform {
    Unknown,
    Sms,
    Email,
    Teams,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationAutomationStatus {
    Unknown,
    Draft,
    NotRunning,
    Running,
    Completed,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationAutomationRunStatus {
    Unknown,
    Running,
    Succeeded,
    Failed,
    Skipped,
    UnknownFutureValue,
}

wire_names!(
    SimulationStatus,
    SimulationAttackType,
    SimulationAttackTechnique,
    SimulationAutomationStatus,
);

backed_model! {
    /// An attack simulation and training campaign.
    pub struct Simulation ["#microsoft.graph.simulation"] {
        "id" => id, set_id: String,
        "attackTechnique" => attack_technique, set_attack_technique: SimulationAttackTechnique,
        "attackType" => attack_type, set_attack_type: SimulationAttackType,
        "automationId" => automation_id, set_automation_id: String,
        "completionDateTime" => completion_date_time, set_completion_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: EmailIdentity,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "description" => description, set_description: String,
        "displayName" => display_name, set_display_name: String,
        "durationInDays" => duration_in_days, set_duration_in_days: i32,
        "isAutomated" => is_automated, set_is_automated: bool,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: EmailIdentity,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "launchDateTime" => launch_date_time, set_launch_date_time: DateTime<Utc>,
        "payloadDeliveryPlatform" => payload_delivery_platform, set_payload_delivery_platform: PayloadDeliveryPlatform,
        /// Campaign report, as returned by Graph.
        "report" => report, set_report: Value,
        "status" => status, set_status: SimulationStatus,
    }
}

backed_model! {
    pub struct SimulationAutomation ["#microsoft.graph.simulationAutomation"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: EmailIdentity,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "description" => description, set_description: String,
        "displayName" => display_name, set_display_name: String,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: EmailIdentity,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "lastRunDateTime" => last_run_date_time, set_last_run_date_time: DateTime<Utc>,
        "nextRunDateTime" => next_run_date_time, set_next_run_date_time: DateTime<Utc>,
        "status" => status, set_status: SimulationAutomationStatus,
    }
}

backed_model! {
    pub struct SimulationAutomationRun ["#microsoft.graph.simulationAutomationRun"] {
        "id" => id, set_id: String,
        "endDateTime" => end_date_time, set_end_date_time: DateTime<Utc>,
        "simulationId" => simulation_id, set_simulation_id: String,
        "startDateTime" => start_date_time, set_start_date_time: DateTime<Utc>,
        "status" => status, set_status: SimulationAutomationRunStatus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m365sec_core::Parsable;
    use serde_json::json;

    #[test]
    fn parses_simulation() {
        let sim = Simulation::create_from_discriminator_value(json!({
            "id": "f1b13829-3829-f1b1-2938-b1f12938b1f1",
            "displayName": "Sample Simulation",
            "attackTechnique": "oAuthConsentGrant",
            "attackType": "social",
            "status": "succeeded",
            "durationInDays": 3,
            "createdBy": {"email": "john@contoso.com", "displayName": "John Doe"},
            "payloadDeliveryPlatform": "email"
        }))
        .unwrap();
        assert_eq!(
            sim.attack_technique(),
            Some(SimulationAttackTechnique::OAuthConsentGrant)
        );
        assert_eq!(sim.status(), Some(SimulationStatus::Succeeded));
        assert_eq!(sim.duration_in_days(), Some(3));
        assert_eq!(
            sim.created_by().and_then(|c| c.email()).as_deref(),
            Some("john@contoso.com")
        );
    }

    #[test]
    fn automation_run_status() {
        let run = SimulationAutomationRun::create_from_discriminator_value(json!({
            "id": "r1",
            "simulationId": "s1",
            "status": "skipped"
        }))
        .unwrap();
        assert_eq!(run.status(), Some(SimulationAutomationRunStatus::Skipped));
    }
}
