//! `/security/cases` and the eDiscovery case tree.

use m365sec_core::{ActionRequestBuilder, CountRequestBuilder};

use crate::models::{CasesRoot, EdiscoveryCase};

mod custodians;
mod noncustodial_data_sources;
mod operations;
mod review_sets;
mod searches;
mod settings;
mod tags;

pub use custodians::*;
pub use noncustodial_data_sources::*;
pub use operations::*;
pub use review_sets::*;
pub use searches::*;
pub use settings::*;
pub use tags::*;

request_builder! {
    /// `/security/cases`
    CasesRequestBuilder("{+baseurl}/security/cases{?%24expand,%24select}")
        -> CasesRoot { get, update, delete }
}

request_builder! {
    /// `/security/cases/ediscoveryCases`
    EdiscoveryCasesRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> EdiscoveryCase { list, create }
}

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}`
    EdiscoveryCaseItemRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}{?%24expand,%24select}"
    ) -> EdiscoveryCase { get, update, delete }
}

impl CasesRequestBuilder {
    pub fn ediscovery_cases(&self) -> EdiscoveryCasesRequestBuilder {
        EdiscoveryCasesRequestBuilder::new(
            self.base.child(EdiscoveryCasesRequestBuilder::URL_TEMPLATE),
        )
    }
}

impl EdiscoveryCasesRequestBuilder {
    pub fn by_ediscovery_case_id(&self, case_id: &str) -> EdiscoveryCaseItemRequestBuilder {
        EdiscoveryCaseItemRequestBuilder::new(self.base.child_with_id(
            EdiscoveryCaseItemRequestBuilder::URL_TEMPLATE,
            "ediscoveryCase%2Did",
            case_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/$count{?%24filter,%24search}",
        ))
    }
}

impl EdiscoveryCaseItemRequestBuilder {
    /// Close the case. Holds must be released first.
    pub fn close(&self) -> ActionRequestBuilder {
        ActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/microsoft.graph.security.close",
        ))
    }

    pub fn reopen(&self) -> ActionRequestBuilder {
        ActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/microsoft.graph.security.reopen",
        ))
    }

    pub fn custodians(&self) -> CustodiansRequestBuilder {
        CustodiansRequestBuilder::new(self.base.child(CustodiansRequestBuilder::URL_TEMPLATE))
    }

    pub fn noncustodial_data_sources(&self) -> NoncustodialDataSourcesRequestBuilder {
        NoncustodialDataSourcesRequestBuilder::new(
            self.base
                .child(NoncustodialDataSourcesRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn operations(&self) -> OperationsRequestBuilder {
        OperationsRequestBuilder::new(self.base.child(OperationsRequestBuilder::URL_TEMPLATE))
    }

    pub fn review_sets(&self) -> ReviewSetsRequestBuilder {
        ReviewSetsRequestBuilder::new(self.base.child(ReviewSetsRequestBuilder::URL_TEMPLATE))
    }

    pub fn searches(&self) -> SearchesRequestBuilder {
        SearchesRequestBuilder::new(self.base.child(SearchesRequestBuilder::URL_TEMPLATE))
    }

    pub fn settings(&self) -> SettingsRequestBuilder {
        SettingsRequestBuilder::new(self.base.child(SettingsRequestBuilder::URL_TEMPLATE))
    }

    pub fn tags(&self) -> TagsRequestBuilder {
        TagsRequestBuilder::new(self.base.child(TagsRequestBuilder::URL_TEMPLATE))
    }
}
