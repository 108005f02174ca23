use m365sec_core::ActionRequestBuilder;

use crate::models::EdiscoveryCaseSettings;

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/settings`
    SettingsRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/settings{?%24expand,%24select}"
    ) -> EdiscoveryCaseSettings { get, update }
}

impl SettingsRequestBuilder {
    pub fn reset_to_default(&self) -> ActionRequestBuilder {
        ActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/settings/microsoft.graph.security.resetToDefault",
        ))
    }
}
