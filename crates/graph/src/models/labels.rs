use chrono::{DateTime, Utc};
use m365sec_core::{backed_model, polymorphic_model};
use serde::{Deserialize, Serialize};

use super::common::IdentitySet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionAfterRetentionPeriod {
    None,
    Delete,
    StartDispositionReview,
    Relabel,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BehaviorDuringRetentionPeriod {
    DoNotRetain,
    Retain,
    RetainAsRecord,
    RetainAsRegulatoryRecord,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultRecordBehavior {
    StartLocked,
    StartUnlocked,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RetentionTrigger {
    DateLabeled,
    DateCreated,
    DateModified,
    DateOfEvent,
    UnknownFutureValue,
}

wire_names!(
    ActionAfterRetentionPeriod,
    BehaviorDuringRetentionPeriod,
    RetentionTrigger,
);

backed_model! {
    pub struct GenericRetentionDuration ["#microsoft.graph.security.retentionDuration"] {}
}

backed_model! {
    pub struct RetentionDurationForever ["#microsoft.graph.security.retentionDurationForever"] {}
}

backed_model! {
    pub struct RetentionDurationInDays ["#microsoft.graph.security.retentionDurationInDays"] {
        "days" => days, set_days: i32,
    }
}

polymorphic_model! {
    pub enum RetentionDuration {
        base: Generic(GenericRetentionDuration),
        Forever(RetentionDurationForever) = "#microsoft.graph.security.retentionDurationForever",
        InDays(RetentionDurationInDays) = "#microsoft.graph.security.retentionDurationInDays",
    }
}

impl RetentionDuration {
    /// A fixed number of days.
    pub fn days(days: i32) -> Self {
        let mut duration = RetentionDurationInDays::new();
        duration.set_days(Some(days));
        Self::InDays(duration)
    }
}

backed_model! {
    pub struct RetentionLabel ["#microsoft.graph.security.retentionLabel"] {
        "id" => id, set_id: String,
        "actionAfterRetentionPeriod" => action_after_retention_period, set_action_after_retention_period: ActionAfterRetentionPeriod,
        "behaviorDuringRetentionPeriod" => behavior_during_retention_period, set_behavior_during_retention_period: BehaviorDuringRetentionPeriod,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "defaultRecordBehavior" => default_record_behavior, set_default_record_behavior: DefaultRecordBehavior,
        "descriptionForAdmins" => description_for_admins, set_description_for_admins: String,
        "descriptionForUsers" => description_for_users, set_description_for_users: String,
        "displayName" => display_name, set_display_name: String,
        "isInUse" => is_in_use, set_is_in_use: bool,
        "labelToBeApplied" => label_to_be_applied, set_label_to_be_applied: String,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: IdentitySet,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "retentionDuration" => retention_duration, set_retention_duration: RetentionDuration,
        "retentionTrigger" => retention_trigger, set_retention_trigger: RetentionTrigger,
    }
}

backed_model! {
    /// A file plan category.
    pub struct CategoryTemplate ["#microsoft.graph.security.categoryTemplate"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "displayName" => display_name, set_display_name: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m365sec_core::Parsable;
    use serde_json::json;

    #[test]
    fn new_label_carries_typed_duration() {
        let mut label = RetentionLabel::new();
        label.set_display_name(Some("Retain 7 years".into()));
        label.set_behavior_during_retention_period(Some(BehaviorDuringRetentionPeriod::RetainAsRecord));
        label.set_retention_trigger(Some(RetentionTrigger::DateCreated));
        label.set_retention_duration(Some(RetentionDuration::days(2555)));

        let body = label.serialize_content().unwrap();
        assert_eq!(
            body["retentionDuration"],
            json!({"@odata.type": "#microsoft.graph.security.retentionDurationInDays", "days": 2555})
        );
        assert_eq!(body["behaviorDuringRetentionPeriod"], "retainAsRecord");
    }

    #[test]
    fn reads_forever_duration() {
        let label = RetentionLabel::create_from_discriminator_value(json!({
            "id": "l1",
            "retentionDuration": {"@odata.type": "#microsoft.graph.security.retentionDurationForever"}
        }))
        .unwrap();
        assert!(matches!(
            label.retention_duration(),
            Some(RetentionDuration::Forever(_))
        ));
    }
}
