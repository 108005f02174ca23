use m365sec_core::{ActionRequestBuilder, BodyActionRequestBuilder, CountRequestBuilder};

use crate::models::{ApplyHoldPostRequestBody, EdiscoveryCustodian, RemoveHoldPostRequestBody};

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/custodians`
    CustodiansRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/custodians{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> EdiscoveryCustodian { list, create }
}

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/custodians/{ediscoveryCustodian-id}`
    CustodianItemRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/custodians/{ediscoveryCustodian%2Did}{?%24expand,%24select}"
    ) -> EdiscoveryCustodian { get, update, delete }
}

impl CustodiansRequestBuilder {
    pub fn by_ediscovery_custodian_id(&self, custodian_id: &str) -> CustodianItemRequestBuilder {
        CustodianItemRequestBuilder::new(self.base.child_with_id(
            CustodianItemRequestBuilder::URL_TEMPLATE,
            "ediscoveryCustodian%2Did",
            custodian_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/custodians/$count{?%24filter,%24search}",
        ))
    }

    /// Place the custodians listed in the body on hold.
    pub fn apply_hold(&self) -> BodyActionRequestBuilder<ApplyHoldPostRequestBody> {
        BodyActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/custodians/microsoft.graph.security.applyHold",
        ))
    }

    pub fn remove_hold(&self) -> BodyActionRequestBuilder<RemoveHoldPostRequestBody> {
        BodyActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/custodians/microsoft.graph.security.removeHold",
        ))
    }
}

impl CustodianItemRequestBuilder {
    pub fn activate(&self) -> ActionRequestBuilder {
        self.action("activate")
    }

    /// Release the custodian from the case. Holds are removed as well.
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
            "{{+baseurl}}/security/cases/ediscoveryCases/{{ediscoveryCase%2Did}}/custodians/{{ediscoveryCustodian%2Did}}/microsoft.graph.security.{name}"
        )))
    }
}
