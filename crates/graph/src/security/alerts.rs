use m365sec_core::CountRequestBuilder;

use crate::models::Alert;

request_builder! {
    /// `/security/alerts_v2`
    AlertsV2RequestBuilder(
        "{+baseurl}/security/alerts_v2{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> Alert { list, create }
}

request_builder! {
    /// `/security/alerts_v2/{alert-id}`
    AlertItemRequestBuilder(
        "{+baseurl}/security/alerts_v2/{alert%2Did}{?%24expand,%24select}"
    ) -> Alert { get, update, delete }
}

impl AlertsV2RequestBuilder {
    pub fn by_alert_id(&self, alert_id: &str) -> AlertItemRequestBuilder {
        AlertItemRequestBuilder::new(self.base.child_with_id(
            AlertItemRequestBuilder::URL_TEMPLATE,
            "alert%2Did",
            alert_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(
            self.base
                .child("{+baseurl}/security/alerts_v2/$count{?%24filter,%24search}"),
        )
    }
}
