use chrono::{DateTime, Utc};
use m365sec_core::backed_model;
use serde_json::Value;

use super::common::IdentitySet;

backed_model! {
    /// An event that starts the retention period of event-based labels.
    pub struct RetentionEvent ["#microsoft.graph.security.retentionEvent"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "description" => description, set_description: String,
        "displayName" => display_name, set_display_name: String,
        "eventPropagationResults" => event_propagation_results, set_event_propagation_results: Vec<Value>,
        "eventQueries" => event_queries, set_event_queries: Vec<Value>,
        "eventStatus" => event_status, set_event_status: Value,
        "eventTriggerDateTime" => event_trigger_date_time, set_event_trigger_date_time: DateTime<Utc>,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: IdentitySet,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "lastStatusUpdateDateTime" => last_status_update_date_time, set_last_status_update_date_time: DateTime<Utc>,
    }
}

backed_model! {
    pub struct RetentionEventType ["#microsoft.graph.security.retentionEventType"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "description" => description, set_description: String,
        "displayName" => display_name, set_display_name: String,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: IdentitySet,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
    }
}
