use m365sec_core::{ActionRequestBuilder, BodyActionRequestBuilder, CountRequestBuilder};

use crate::models::{
    ApplyHoldPostRequestBody, EdiscoveryNoncustodialDataSource, RemoveHoldPostRequestBody,
};

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/noncustodialDataSources`
    NoncustodialDataSourcesRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/noncustodialDataSources{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> EdiscoveryNoncustodialDataSource { list, create }
}

request_builder! {
    NoncustodialDataSourceItemRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/noncustodialDataSources/{ediscoveryNoncustodialDataSource%2Did}{?%24expand,%24select}"
    ) -> EdiscoveryNoncustodialDataSource { get, update, delete }
}

impl NoncustodialDataSourcesRequestBuilder {
    pub fn by_ediscovery_noncustodial_data_source_id(
        &self,
        data_source_id: &str,
    ) -> NoncustodialDataSourceItemRequestBuilder {
        NoncustodialDataSourceItemRequestBuilder::new(self.base.child_with_id(
            NoncustodialDataSourceItemRequestBuilder::URL_TEMPLATE,
            "ediscoveryNoncustodialDataSource%2Did",
            data_source_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/noncustodialDataSources/$count{?%24filter,%24search}",
        ))
    }

    pub fn apply_hold(&self) -> BodyActionRequestBuilder<ApplyHoldPostRequestBody> {
        BodyActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/noncustodialDataSources/microsoft.graph.security.applyHold",
        ))
    }

    pub fn remove_hold(&self) -> BodyActionRequestBuilder<RemoveHoldPostRequestBody> {
        BodyActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/noncustodialDataSources/microsoft.graph.security.removeHold",
        ))
    }
}

impl NoncustodialDataSourceItemRequestBuilder {
    pub fn release(&self) -> ActionRequestBuilder {
        self.action("release")
    }

    pub fn apply_hold(&self) -> ActionRequestBuilder {
        self.action("applyHold")
    }

    pub fn remove_hold(&self) -> ActionRequestBuilder {
        self.action("removeHold")
    }

    pub fn update_index(&self) -> ActionRequestBuilder {
        self.action("updateIndex")
    }

    fn action(&self, name: &str) -> ActionRequestBuilder {
        ActionRequestBuilder::new(self.base.child(&format!(
            "{{+baseurl}}/security/cases/ediscoveryCases/{{ediscoveryCase%2Did}}/noncustodialDataSources/{{ediscoveryNoncustodialDataSource%2Did}}/microsoft.graph.security.{name}"
        )))
    }
}
