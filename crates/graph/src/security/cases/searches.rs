use m365sec_core::{ActionRequestBuilder, BodyActionRequestBuilder, CountRequestBuilder};

use crate::models::{EdiscoveryEstimateOperation, EdiscoverySearch, PurgeDataPostRequestBody};

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/searches`
    SearchesRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/searches{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> EdiscoverySearch { list, create }
}

request_builder! {
    SearchItemRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/searches/{ediscoverySearch%2Did}{?%24expand,%24select}"
    ) -> EdiscoverySearch { get, update, delete }
}

request_builder! {
    /// The most recent `estimateStatistics` run of a search.
    LastEstimateStatisticsOperationRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/searches/{ediscoverySearch%2Did}/lastEstimateStatisticsOperation{?%24expand,%24select}"
    ) -> EdiscoveryEstimateOperation { get }
}

impl SearchesRequestBuilder {
    pub fn by_ediscovery_search_id(&self, search_id: &str) -> SearchItemRequestBuilder {
        SearchItemRequestBuilder::new(self.base.child_with_id(
            SearchItemRequestBuilder::URL_TEMPLATE,
            "ediscoverySearch%2Did",
            search_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/searches/$count{?%24filter,%24search}",
        ))
    }
}

impl SearchItemRequestBuilder {
    /// Start an estimate. Progress is reported through the case operations.
    pub fn estimate_statistics(&self) -> ActionRequestBuilder {
        ActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/searches/{ediscoverySearch%2Did}/microsoft.graph.security.estimateStatistics",
        ))
    }

    pub fn purge_data(&self) -> BodyActionRequestBuilder<PurgeDataPostRequestBody> {
        BodyActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/searches/{ediscoverySearch%2Did}/microsoft.graph.security.purgeData",
        ))
    }

    pub fn last_estimate_statistics_operation(
        &self,
    ) -> LastEstimateStatisticsOperationRequestBuilder {
        LastEstimateStatisticsOperationRequestBuilder::new(
            self.base
                .child(LastEstimateStatisticsOperationRequestBuilder::URL_TEMPLATE),
        )
    }
}
