//! eDiscovery (Premium) cases and everything that hangs off them.

use chrono::{DateTime, Utc};
use m365sec_core::{Flags, backed_model, polymorphic_model};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{IdentitySet, ResultInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseStatus {
    Unknown,
    Active,
    PendingDelete,
    Closing,
    Closed,
    ClosedWithError,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSourceContainerStatus {
    Active,
    Released,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSourceHoldStatus {
    NotApplied,
    Applied,
    Applying,
    Removing,
    Partial,
    UnknownFutureValue,
}

/// Flag members for `EdiscoverySearch::data_source_scopes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSourceScopes {
    None,
    AllTenantMailboxes,
    AllTenantSites,
    AllCaseCustodians,
    AllCaseNoncustodialDataSources,
    UnknownFutureValue,
}

/// Flag members for `UserSource::included_sources`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    Mailbox,
    Site,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseAction {
    ContentExport,
    ApplyTags,
    ConvertToPdf,
    Index,
    EstimateStatistics,
    AddToReviewSet,
    HoldUpdate,
    UnknownFutureValue,
    PurgeData,
    ExportReport,
    ExportResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseOperationStatus {
    NotStarted,
    SubmissionFailed,
    Running,
    Succeeded,
    PartiallySucceeded,
    Failed,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildSelectability {
    One,
    Many,
    #[serde(rename = "unknownFutureValue")]
    UnknownFutureValue,
}

/// Flag members for `AddToReviewSetPostRequestBody::additional_data_options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdditionalDataOptions {
    AllVersions,
    LinkedFiles,
    UnknownFutureValue,
}

/// Flag members for `ExportPostRequestBody::export_options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportOptions {
    OriginalFiles,
    Text,
    PdfReplacement,
    Tags,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFileStructure {
    None,
    Directory,
    Pst,
    UnknownFutureValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PurgeType {
    Recoverable,
    PermanentlyDelete,
    UnknownFutureValue,
}

/// Flag members for `PurgeDataPostRequestBody::purge_areas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PurgeAreas {
    Mailboxes,
    TeamsMessages,
    UnknownFutureValue,
}

wire_names!(
    CaseStatus,
    DataSourceContainerStatus,
    DataSourceHoldStatus,
    DataSourceScopes,
    CaseAction,
    CaseOperationStatus,
    ExportFileStructure,
    PurgeType,
);

backed_model! {
    pub struct EdiscoveryCase ["#microsoft.graph.security.ediscoveryCase"] {
        "id" => id, set_id: String,
        "closedBy" => closed_by, set_closed_by: IdentitySet,
        "closedDateTime" => closed_date_time, set_closed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "description" => description, set_description: String,
        "displayName" => display_name, set_display_name: String,
        "externalId" => external_id, set_external_id: String,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: IdentitySet,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "status" => status, set_status: CaseStatus,
    }
}

backed_model! {
    /// A person whose mailbox and sites are placed under the case.
    pub struct EdiscoveryCustodian ["#microsoft.graph.security.ediscoveryCustodian"] {
        "id" => id, set_id: String,
        "acknowledgedDateTime" => acknowledged_date_time, set_acknowledged_date_time: DateTime<Utc>,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "displayName" => display_name, set_display_name: String,
        "email" => email, set_email: String,
        "holdStatus" => hold_status, set_hold_status: DataSourceHoldStatus,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "releasedDateTime" => released_date_time, set_released_date_time: DateTime<Utc>,
        "status" => status, set_status: DataSourceContainerStatus,
    }
}

backed_model! {
    pub struct GenericDataSource ["#microsoft.graph.security.dataSource"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "displayName" => display_name, set_display_name: String,
        "holdStatus" => hold_status, set_hold_status: DataSourceHoldStatus,
    }
}

backed_model! {
    pub struct UserSource ["#microsoft.graph.security.userSource"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "displayName" => display_name, set_display_name: String,
        "holdStatus" => hold_status, set_hold_status: DataSourceHoldStatus,
        "email" => email, set_email: String,
        "includedSources" => included_sources, set_included_sources: Flags<SourceType>,
        "siteWebUrl" => site_web_url, set_site_web_url: String,
    }
}

backed_model! {
    pub struct SiteSource ["#microsoft.graph.security.siteSource"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "displayName" => display_name, set_display_name: String,
        "holdStatus" => hold_status, set_hold_status: DataSourceHoldStatus,
        /// The SharePoint site, as returned by Graph.
        "site" => site, set_site: Value,
    }
}

backed_model! {
    pub struct UnifiedGroupSource ["#microsoft.graph.security.unifiedGroupSource"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "displayName" => display_name, set_display_name: String,
        "holdStatus" => hold_status, set_hold_status: DataSourceHoldStatus,
        "group" => group, set_group: Value,
        "includedSources" => included_sources, set_included_sources: Flags<SourceType>,
    }
}

polymorphic_model! {
    /// Mailbox, site or group placed under an eDiscovery case.
    pub enum DataSource {
        base: Generic(GenericDataSource),
        User(UserSource) = "#microsoft.graph.security.userSource",
        Site(SiteSource) = "#microsoft.graph.security.siteSource",
        UnifiedGroup(UnifiedGroupSource) = "#microsoft.graph.security.unifiedGroupSource",
    }
}

backed_model! {
    /// A data source that is not tied to a custodian.
    pub struct EdiscoveryNoncustodialDataSource ["#microsoft.graph.security.ediscoveryNoncustodialDataSource"] {
        "id" => id, set_id: String,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "dataSource" => data_source, set_data_source: DataSource,
        "displayName" => display_name, set_display_name: String,
        "holdStatus" => hold_status, set_hold_status: DataSourceHoldStatus,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
        "releasedDateTime" => released_date_time, set_released_date_time: DateTime<Utc>,
        "status" => status, set_status: DataSourceContainerStatus,
    }
}

backed_model! {
    pub struct EdiscoveryReviewSet ["#microsoft.graph.security.ediscoveryReviewSet"] {
        "id" => id, set_id: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "displayName" => display_name, set_display_name: String,
    }
}

backed_model! {
    pub struct EdiscoverySearch ["#microsoft.graph.security.ediscoverySearch"] {
        "id" => id, set_id: String,
        "contentQuery" => content_query, set_content_query: String,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "dataSourceScopes" => data_source_scopes, set_data_source_scopes: Flags<DataSourceScopes>,
        "description" => description, set_description: String,
        "displayName" => display_name, set_display_name: String,
        "lastModifiedBy" => last_modified_by, set_last_modified_by: IdentitySet,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
    }
}

backed_model! {
    pub struct OcrSettings {
        "isEnabled" => is_enabled, set_is_enabled: bool,
        "maxImageSize" => max_image_size, set_max_image_size: i32,
        /// ISO 8601 duration, e.g. `PT1M`.
        "timeout" => timeout, set_timeout: String,
    }
}

backed_model! {
    pub struct RedundancyDetectionSettings {
        "isEnabled" => is_enabled, set_is_enabled: bool,
        "maxWords" => max_words, set_max_words: i32,
        "minWords" => min_words, set_min_words: i32,
        "similarityThreshold" => similarity_threshold, set_similarity_threshold: i32,
    }
}

backed_model! {
    pub struct TopicModelingSettings {
        "dynamicallyAdjustTopicCount" => dynamically_adjust_topic_count, set_dynamically_adjust_topic_count: bool,
        "ignoreNumbers" => ignore_numbers, set_ignore_numbers: bool,
        "isEnabled" => is_enabled, set_is_enabled: bool,
        "topicCount" => topic_count, set_topic_count: i32,
    }
}

backed_model! {
    pub struct EdiscoveryCaseSettings ["#microsoft.graph.security.ediscoveryCaseSettings"] {
        "id" => id, set_id: String,
        "ocr" => ocr, set_ocr: OcrSettings,
        "redundancyDetection" => redundancy_detection, set_redundancy_detection: RedundancyDetectionSettings,
        "topicModeling" => topic_modeling, set_topic_modeling: TopicModelingSettings,
    }
}

backed_model! {
    pub struct EdiscoveryReviewTag ["#microsoft.graph.security.ediscoveryReviewTag"] {
        "id" => id, set_id: String,
        "childSelectability" => child_selectability, set_child_selectability: ChildSelectability,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "description" => description, set_description: String,
        "displayName" => display_name, set_display_name: String,
        "lastModifiedDateTime" => last_modified_date_time, set_last_modified_date_time: DateTime<Utc>,
    }
}

backed_model! {
    pub struct GenericCaseOperation ["#microsoft.graph.security.caseOperation"] {
        "id" => id, set_id: String,
        "action" => action, set_action: CaseAction,
        "completedDateTime" => completed_date_time, set_completed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "percentProgress" => percent_progress, set_percent_progress: i32,
        "resultInfo" => result_info, set_result_info: ResultInfo,
        "status" => status, set_status: CaseOperationStatus,
    }
}

backed_model! {
    /// Result of `estimateStatistics` on a search.
    pub struct EdiscoveryEstimateOperation ["#microsoft.graph.security.ediscoveryEstimateOperation"] {
        "id" => id, set_id: String,
        "action" => action, set_action: CaseAction,
        "completedDateTime" => completed_date_time, set_completed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "percentProgress" => percent_progress, set_percent_progress: i32,
        "resultInfo" => result_info, set_result_info: ResultInfo,
        "status" => status, set_status: CaseOperationStatus,
        "indexedItemCount" => indexed_item_count, set_indexed_item_count: i64,
        "indexedItemsSize" => indexed_items_size, set_indexed_items_size: i64,
        "mailboxCount" => mailbox_count, set_mailbox_count: i32,
        "siteCount" => site_count, set_site_count: i32,
        "unindexedItemCount" => unindexed_item_count, set_unindexed_item_count: i64,
        "unindexedItemsSize" => unindexed_items_size, set_unindexed_items_size: i64,
    }
}

backed_model! {
    pub struct EdiscoveryAddToReviewSetOperation ["#microsoft.graph.security.ediscoveryAddToReviewSetOperation"] {
        "id" => id, set_id: String,
        "action" => action, set_action: CaseAction,
        "completedDateTime" => completed_date_time, set_completed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "percentProgress" => percent_progress, set_percent_progress: i32,
        "resultInfo" => result_info, set_result_info: ResultInfo,
        "status" => status, set_status: CaseOperationStatus,
    }
}

backed_model! {
    pub struct EdiscoveryHoldOperation ["#microsoft.graph.security.ediscoveryHoldOperation"] {
        "id" => id, set_id: String,
        "action" => action, set_action: CaseAction,
        "completedDateTime" => completed_date_time, set_completed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "percentProgress" => percent_progress, set_percent_progress: i32,
        "resultInfo" => result_info, set_result_info: ResultInfo,
        "status" => status, set_status: CaseOperationStatus,
    }
}

backed_model! {
    pub struct EdiscoveryIndexOperation ["#microsoft.graph.security.ediscoveryIndexOperation"] {
        "id" => id, set_id: String,
        "action" => action, set_action: CaseAction,
        "completedDateTime" => completed_date_time, set_completed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "percentProgress" => percent_progress, set_percent_progress: i32,
        "resultInfo" => result_info, set_result_info: ResultInfo,
        "status" => status, set_status: CaseOperationStatus,
    }
}

backed_model! {
    pub struct EdiscoveryPurgeDataOperation ["#microsoft.graph.security.ediscoveryPurgeDataOperation"] {
        "id" => id, set_id: String,
        "action" => action, set_action: CaseAction,
        "completedDateTime" => completed_date_time, set_completed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "percentProgress" => percent_progress, set_percent_progress: i32,
        "resultInfo" => result_info, set_result_info: ResultInfo,
        "status" => status, set_status: CaseOperationStatus,
    }
}

backed_model! {
    pub struct EdiscoveryExportOperation ["#microsoft.graph.security.ediscoveryExportOperation"] {
        "id" => id, set_id: String,
        "action" => action, set_action: CaseAction,
        "completedDateTime" => completed_date_time, set_completed_date_time: DateTime<Utc>,
        "createdBy" => created_by, set_created_by: IdentitySet,
        "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
        "percentProgress" => percent_progress, set_percent_progress: i32,
        "resultInfo" => result_info, set_result_info: ResultInfo,
        "status" => status, set_status: CaseOperationStatus,
        "description" => description, set_description: String,
        "exportOptions" => export_options, set_export_options: Flags<ExportOptions>,
        "exportStructure" => export_structure, set_export_structure: ExportFileStructure,
        "outputName" => output_name, set_output_name: String,
    }
}

polymorphic_model! {
    /// A long-running case operation. The variant follows `@odata.type`.
    pub enum CaseOperation {
        base: Generic(GenericCaseOperation),
        Estimate(EdiscoveryEstimateOperation) = "#microsoft.graph.security.ediscoveryEstimateOperation",
        AddToReviewSet(EdiscoveryAddToReviewSetOperation) = "#microsoft.graph.security.ediscoveryAddToReviewSetOperation",
        Hold(EdiscoveryHoldOperation) = "#microsoft.graph.security.ediscoveryHoldOperation",
        Index(EdiscoveryIndexOperation) = "#microsoft.graph.security.ediscoveryIndexOperation",
        PurgeData(EdiscoveryPurgeDataOperation) = "#microsoft.graph.security.ediscoveryPurgeDataOperation",
        Export(EdiscoveryExportOperation) = "#microsoft.graph.security.ediscoveryExportOperation",
    }
}

impl CaseOperation {
    pub fn id(&self) -> Option<String> {
        match self {
            Self::Generic(op) => op.id(),
            Self::Estimate(op) => op.id(),
            Self::AddToReviewSet(op) => op.id(),
            Self::Hold(op) => op.id(),
            Self::Index(op) => op.id(),
            Self::PurgeData(op) => op.id(),
            Self::Export(op) => op.id(),
        }
    }

    pub fn action(&self) -> Option<CaseAction> {
        match self {
            Self::Generic(op) => op.action(),
            Self::Estimate(op) => op.action(),
            Self::AddToReviewSet(op) => op.action(),
            Self::Hold(op) => op.action(),
            Self::Index(op) => op.action(),
            Self::PurgeData(op) => op.action(),
            Self::Export(op) => op.action(),
        }
    }

    pub fn status(&self) -> Option<CaseOperationStatus> {
        match self {
            Self::Generic(op) => op.status(),
            Self::Estimate(op) => op.status(),
            Self::AddToReviewSet(op) => op.status(),
            Self::Hold(op) => op.status(),
            Self::Index(op) => op.status(),
            Self::PurgeData(op) => op.status(),
            Self::Export(op) => op.status(),
        }
    }

    pub fn percent_progress(&self) -> Option<i32> {
        match self {
            Self::Generic(op) => op.percent_progress(),
            Self::Estimate(op) => op.percent_progress(),
            Self::AddToReviewSet(op) => op.percent_progress(),
            Self::Hold(op) => op.percent_progress(),
            Self::Index(op) => op.percent_progress(),
            Self::PurgeData(op) => op.percent_progress(),
            Self::Export(op) => op.percent_progress(),
        }
    }
}

backed_model! {
    /// Body of the collection-level `applyHold` on custodians and
    /// noncustodial data sources.
    pub struct ApplyHoldPostRequestBody {
        "ids" => ids, set_ids: Vec<String>,
    }
}

backed_model! {
    pub struct RemoveHoldPostRequestBody {
        "ids" => ids, set_ids: Vec<String>,
    }
}

backed_model! {
    pub struct AddToReviewSetPostRequestBody {
        "additionalDataOptions" => additional_data_options, set_additional_data_options: Flags<AdditionalDataOptions>,
        "search" => search, set_search: EdiscoverySearch,
    }
}

backed_model! {
    pub struct ExportPostRequestBody {
        "description" => description, set_description: String,
        "exportOptions" => export_options, set_export_options: Flags<ExportOptions>,
        "exportStructure" => export_structure, set_export_structure: ExportFileStructure,
        "outputName" => output_name, set_output_name: String,
    }
}

backed_model! {
    pub struct PurgeDataPostRequestBody {
        "purgeAreas" => purge_areas, set_purge_areas: Flags<PurgeAreas>,
        "purgeType" => purge_type, set_purge_type: PurgeType,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m365sec_core::Parsable;
    use serde_json::json;

    #[test]
    fn noncustodial_source_resolves_nested_data_source() {
        let source = EdiscoveryNoncustodialDataSource::create_from_discriminator_value(json!({
            "id": "35393639323133394345384344303043",
            "status": "active",
            "holdStatus": "applied",
            "dataSource": {
                "@odata.type": "#microsoft.graph.security.siteSource",
                "id": "2c8f1e3a",
                "displayName": "Contoso sales",
                "site": {"webUrl": "https://contoso.sharepoint.com/sites/sales"}
            }
        }))
        .unwrap();
        assert_eq!(source.hold_status(), Some(DataSourceHoldStatus::Applied));
        match source.data_source().unwrap() {
            DataSource::Site(site) => {
                assert_eq!(site.display_name().as_deref(), Some("Contoso sales"));
                assert_eq!(
                    site.site().unwrap()["webUrl"],
                    "https://contoso.sharepoint.com/sites/sales"
                );
            }
            other => panic!("expected site source, got {other:?}"),
        }
    }

    #[test]
    fn unknown_data_source_falls_back_to_generic() {
        let source = DataSource::create_from_discriminator_value(json!({
            "@odata.type": "#microsoft.graph.security.mailboxSource",
            "id": "x"
        }))
        .unwrap();
        assert!(matches!(source, DataSource::Generic(_)));
        assert_eq!(
            source.odata_type().as_deref(),
            Some("#microsoft.graph.security.mailboxSource")
        );
    }

    #[test]
    fn case_operations_dispatch_on_type() {
        let op = CaseOperation::create_from_discriminator_value(json!({
            "@odata.type": "#microsoft.graph.security.ediscoveryEstimateOperation",
            "id": "op1",
            "action": "estimateStatistics",
            "status": "succeeded",
            "percentProgress": 100,
            "indexedItemCount": 1250,
            "mailboxCount": 3
        }))
        .unwrap();
        assert_eq!(op.action(), Some(CaseAction::EstimateStatistics));
        assert_eq!(op.status(), Some(CaseOperationStatus::Succeeded));
        assert_eq!(op.percent_progress(), Some(100));
        let CaseOperation::Estimate(estimate) = op else {
            panic!("expected estimate operation");
        };
        assert_eq!(estimate.indexed_item_count(), Some(1250));
        assert_eq!(estimate.mailbox_count(), Some(3));

        let hold = CaseOperation::create_from_discriminator_value(json!({
            "@odata.type": "#microsoft.graph.security.ediscoveryHoldOperation",
            "id": "op2"
        }))
        .unwrap();
        assert!(matches!(hold, CaseOperation::Hold(_)));
        assert_eq!(hold.id().as_deref(), Some("op2"));
    }

    #[test]
    fn search_scopes_serialize_as_flag_string() {
        let mut search = EdiscoverySearch::new();
        search.set_display_name(Some("Project Falcon".into()));
        search.set_content_query(Some("subject:falcon".into()));
        search.set_data_source_scopes(Some(Flags::new([
            DataSourceScopes::AllCaseCustodians,
            DataSourceScopes::AllCaseNoncustodialDataSources,
        ])));
        let body = search.serialize_content().unwrap();
        assert_eq!(body["@odata.type"], "#microsoft.graph.security.ediscoverySearch");
        assert_eq!(
            body["dataSourceScopes"],
            "allCaseCustodians,allCaseNoncustodialDataSources"
        );

        let parsed = EdiscoverySearch::create_from_discriminator_value(body).unwrap();
        assert!(
            parsed
                .data_source_scopes()
                .unwrap()
                .contains(&DataSourceScopes::AllCaseCustodians)
        );
    }

    #[test]
    fn action_bodies() {
        let mut hold = ApplyHoldPostRequestBody::new();
        hold.set_ids(Some(vec!["c1".into(), "c2".into()]));
        assert_eq!(hold.serialize_content().unwrap(), json!({"ids": ["c1", "c2"]}));

        let mut purge = PurgeDataPostRequestBody::new();
        purge.set_purge_type(Some(PurgeType::PermanentlyDelete));
        purge.set_purge_areas(Some(Flags::new([PurgeAreas::TeamsMessages])));
        assert_eq!(
            purge.serialize_content().unwrap(),
            json!({"purgeType": "permanentlyDelete", "purgeAreas": "teamsMessages"})
        );
    }

    #[test]
    fn tag_selectability_uses_pascal_case_members() {
        let mut tag = EdiscoveryReviewTag::new();
        tag.set_child_selectability(Some(ChildSelectability::Many));
        assert_eq!(tag.serialize_content().unwrap()["childSelectability"], "Many");
    }

    #[test]
    fn case_settings_nest_their_sections() {
        let settings = EdiscoveryCaseSettings::create_from_discriminator_value(json!({
            "id": "settings",
            "ocr": {"isEnabled": true, "maxImageSize": 12000, "timeout": "PT1M"},
            "redundancyDetection": {"isEnabled": true, "similarityThreshold": 65, "minWords": 10, "maxWords": 500000},
            "topicModeling": {"isEnabled": false, "topicCount": 100}
        }))
        .unwrap();
        assert_eq!(settings.ocr().unwrap().timeout().as_deref(), Some("PT1M"));
        assert_eq!(
            settings.redundancy_detection().unwrap().similarity_threshold(),
            Some(65)
        );
        assert_eq!(settings.topic_modeling().unwrap().is_enabled(), Some(false));
    }
}
