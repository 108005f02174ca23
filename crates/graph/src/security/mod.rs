//! Request builders for `/security` and everything below it.
//!
//! Each builder owns one URL template and the path parameters collected on
//! the way down. Navigation methods hand those parameters to the child;
//! verb methods turn them into a request and send it through the adapter.

use m365sec_core::{BaseRequestBuilder, RequestConfiguration, RequestInformation, Result};

use crate::models::{HuntingQueryResults, RunHuntingQueryPostRequestBody};

/// Declare a request builder over one URL template and model, with the
/// listed verbs:
///
/// - `list`: GET a page of the collection, plus `get_all` across pages
/// - `create`: POST a new member
/// - `get`: GET the entity
/// - `update`: PATCH the entity with the fields set on the body
/// - `delete`: DELETE the entity
macro_rules! request_builder {
    (@verb list $model:ty) => {
        /// GET one page of the collection.
        pub async fn get(
            &self,
            config: ::core::option::Option<
                ::m365sec_core::RequestConfiguration<::m365sec_core::CollectionQuery>,
            >,
        ) -> ::m365sec_core::Result<::m365sec_core::CollectionResponse<$model>> {
            self.base.get_collection(config).await
        }

        /// GET every page, following `@odata.nextLink`.
        pub async fn get_all(
            &self,
            config: ::core::option::Option<
                ::m365sec_core::RequestConfiguration<::m365sec_core::CollectionQuery>,
            >,
        ) -> ::m365sec_core::Result<::std::vec::Vec<$model>> {
            let first = self.get(config).await?;
            $crate::paging::PageIterator::new(self.base.adapter().clone(), first)
                .collect_all()
                .await
        }

        pub fn to_get_request_information(
            &self,
            config: ::core::option::Option<
                ::m365sec_core::RequestConfiguration<::m365sec_core::CollectionQuery>,
            >,
        ) -> ::m365sec_core::RequestInformation {
            self.base
                .to_request_information(::m365sec_core::HttpMethod::Get, config)
        }
    };
    (@verb create $model:ty) => {
        /// POST a new member of the collection.
        pub async fn post(
            &self,
            body: &$model,
            config: ::core::option::Option<::m365sec_core::RequestConfiguration>,
        ) -> ::m365sec_core::Result<::core::option::Option<$model>> {
            self.base.post(body, config).await
        }

        pub fn to_post_request_information(
            &self,
            body: &$model,
            config: ::core::option::Option<::m365sec_core::RequestConfiguration>,
        ) -> ::m365sec_core::Result<::m365sec_core::RequestInformation> {
            self.base
                .to_request_information_with_body(::m365sec_core::HttpMethod::Post, body, config)
        }
    };
    (@verb get $model:ty) => {
        pub async fn get(
            &self,
            config: ::core::option::Option<
                ::m365sec_core::RequestConfiguration<::m365sec_core::ItemQuery>,
            >,
        ) -> ::m365sec_core::Result<$model> {
            self.base.get_entity(config).await
        }

        pub fn to_get_request_information(
            &self,
            config: ::core::option::Option<
                ::m365sec_core::RequestConfiguration<::m365sec_core::ItemQuery>,
            >,
        ) -> ::m365sec_core::RequestInformation {
            self.base
                .to_request_information(::m365sec_core::HttpMethod::Get, config)
        }
    };
    (@verb update $model:ty) => {
        /// PATCH with the properties changed on `body`. Graph may answer with
        /// the updated entity or with no content.
        pub async fn patch(
            &self,
            body: &$model,
            config: ::core::option::Option<::m365sec_core::RequestConfiguration>,
        ) -> ::m365sec_core::Result<::core::option::Option<$model>> {
            self.base.patch(body, config).await
        }

        pub fn to_patch_request_information(
            &self,
            body: &$model,
            config: ::core::option::Option<::m365sec_core::RequestConfiguration>,
        ) -> ::m365sec_core::Result<::m365sec_core::RequestInformation> {
            self.base
                .to_request_information_with_body(::m365sec_core::HttpMethod::Patch, body, config)
        }
    };
    (@verb delete $model:ty) => {
        pub async fn delete(
            &self,
            config: ::core::option::Option<::m365sec_core::RequestConfiguration>,
        ) -> ::m365sec_core::Result<()> {
            self.base.delete(config).await
        }

        pub fn to_delete_request_information(
            &self,
            config: ::core::option::Option<::m365sec_core::RequestConfiguration>,
        ) -> ::m365sec_core::RequestInformation {
            self.base
                .to_request_information(::m365sec_core::HttpMethod::Delete, config)
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident($template:expr) -> $model:ty { $($verb:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            base: ::m365sec_core::BaseRequestBuilder,
        }

        impl $name {
            pub const URL_TEMPLATE: &'static str = $template;

            pub fn new(base: ::m365sec_core::BaseRequestBuilder) -> Self {
                Self { base }
            }

            /// Builder that targets `raw_url` verbatim.
            pub fn from_raw_url(
                adapter: ::std::sync::Arc<dyn ::m365sec_core::RequestAdapter>,
                raw_url: impl Into<String>,
            ) -> Self {
                Self::new(::m365sec_core::BaseRequestBuilder::with_raw_url(
                    adapter,
                    Self::URL_TEMPLATE,
                    raw_url,
                ))
            }

            /// Same adapter, pointed at `raw_url` verbatim.
            pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
                Self::from_raw_url(self.base.adapter().clone(), raw_url)
            }

            $(request_builder!(@verb $verb $model);)*
        }
    };
}

pub mod alerts;
pub mod attack_simulation;
pub mod cases;
pub mod incidents;
pub mod labels;
pub mod secure_scores;
pub mod threat_intelligence;
pub mod triggers;

pub use alerts::*;
pub use attack_simulation::*;
pub use cases::*;
pub use incidents::*;
pub use labels::*;
pub use secure_scores::*;
pub use threat_intelligence::*;
pub use triggers::*;

request_builder! {
    /// `/security`
    SecurityRequestBuilder("{+baseurl}/security{?%24expand,%24select}")
        -> crate::models::Security { get, update }
}

impl SecurityRequestBuilder {
    pub fn alerts_v2(&self) -> AlertsV2RequestBuilder {
        AlertsV2RequestBuilder::new(self.base.child(AlertsV2RequestBuilder::URL_TEMPLATE))
    }

    pub fn incidents(&self) -> IncidentsRequestBuilder {
        IncidentsRequestBuilder::new(self.base.child(IncidentsRequestBuilder::URL_TEMPLATE))
    }

    pub fn cases(&self) -> CasesRequestBuilder {
        CasesRequestBuilder::new(self.base.child(CasesRequestBuilder::URL_TEMPLATE))
    }

    pub fn attack_simulation(&self) -> AttackSimulationRequestBuilder {
        AttackSimulationRequestBuilder::new(
            self.base.child(AttackSimulationRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn labels(&self) -> LabelsRequestBuilder {
        LabelsRequestBuilder::new(self.base.child(LabelsRequestBuilder::URL_TEMPLATE))
    }

    pub fn threat_intelligence(&self) -> ThreatIntelligenceRequestBuilder {
        ThreatIntelligenceRequestBuilder::new(
            self.base.child(ThreatIntelligenceRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn triggers(&self) -> TriggersRequestBuilder {
        TriggersRequestBuilder::new(self.base.child(TriggersRequestBuilder::URL_TEMPLATE))
    }

    pub fn trigger_types(&self) -> TriggerTypesRequestBuilder {
        TriggerTypesRequestBuilder::new(self.base.child(TriggerTypesRequestBuilder::URL_TEMPLATE))
    }

    pub fn secure_scores(&self) -> SecureScoresRequestBuilder {
        SecureScoresRequestBuilder::new(self.base.child(SecureScoresRequestBuilder::URL_TEMPLATE))
    }

    pub fn secure_score_control_profiles(&self) -> SecureScoreControlProfilesRequestBuilder {
        SecureScoreControlProfilesRequestBuilder::new(
            self.base
                .child(SecureScoreControlProfilesRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn run_hunting_query(&self) -> RunHuntingQueryRequestBuilder {
        RunHuntingQueryRequestBuilder {
            base: self.base.child(RunHuntingQueryRequestBuilder::URL_TEMPLATE),
        }
    }
}

/// `/security/microsoft.graph.security.runHuntingQuery`
#[derive(Clone)]
pub struct RunHuntingQueryRequestBuilder {
    base: BaseRequestBuilder,
}

impl RunHuntingQueryRequestBuilder {
    pub const URL_TEMPLATE: &'static str =
        "{+baseurl}/security/microsoft.graph.security.runHuntingQuery";

    /// Run a KQL query across the advanced hunting schema.
    pub async fn post(
        &self,
        body: &RunHuntingQueryPostRequestBody,
        config: Option<RequestConfiguration>,
    ) -> Result<Option<HuntingQueryResults>> {
        self.base.post(body, config).await
    }

    pub fn to_post_request_information(
        &self,
        body: &RunHuntingQueryPostRequestBody,
        config: Option<RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.base
            .to_request_information_with_body(m365sec_core::HttpMethod::Post, body, config)
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: BaseRequestBuilder::with_raw_url(
                self.base.adapter().clone(),
                Self::URL_TEMPLATE,
                raw_url,
            ),
        }
    }
}
