use m365sec_core::CountRequestBuilder;

use crate::models::CaseOperation;

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/operations`
    OperationsRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/operations{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> CaseOperation { list }
}

request_builder! {
    /// A single case operation. Responses resolve to the concrete operation
    /// type named by `@odata.type`.
    OperationItemRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/operations/{caseOperation%2Did}{?%24expand,%24select}"
    ) -> CaseOperation { get, delete }
}

impl OperationsRequestBuilder {
    pub fn by_case_operation_id(&self, operation_id: &str) -> OperationItemRequestBuilder {
        OperationItemRequestBuilder::new(self.base.child_with_id(
            OperationItemRequestBuilder::URL_TEMPLATE,
            "caseOperation%2Did",
            operation_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/operations/$count{?%24filter,%24search}",
        ))
    }
}
