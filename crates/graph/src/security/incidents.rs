use m365sec_core::CountRequestBuilder;

use crate::models::{Alert, Incident};

request_builder! {
    /// `/security/incidents`
    IncidentsRequestBuilder(
        "{+baseurl}/security/incidents{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> Incident { list, create }
}

request_builder! {
    /// `/security/incidents/{incident-id}`
    IncidentItemRequestBuilder(
        "{+baseurl}/security/incidents/{incident%2Did}{?%24expand,%24select}"
    ) -> Incident { get, update, delete }
}

request_builder! {
    /// `/security/incidents/{incident-id}/alerts`
    IncidentAlertsRequestBuilder(
        "{+baseurl}/security/incidents/{incident%2Did}/alerts{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> Alert { list }
}

impl IncidentsRequestBuilder {
    pub fn by_incident_id(&self, incident_id: &str) -> IncidentItemRequestBuilder {
        IncidentItemRequestBuilder::new(self.base.child_with_id(
            IncidentItemRequestBuilder::URL_TEMPLATE,
            "incident%2Did",
            incident_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(
            self.base
                .child("{+baseurl}/security/incidents/$count{?%24filter,%24search}"),
        )
    }
}

impl IncidentItemRequestBuilder {
    pub fn alerts(&self) -> IncidentAlertsRequestBuilder {
        IncidentAlertsRequestBuilder::new(self.base.child(IncidentAlertsRequestBuilder::URL_TEMPLATE))
    }
}

impl IncidentAlertsRequestBuilder {
    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/incidents/{incident%2Did}/alerts/$count{?%24filter,%24search}",
        ))
    }
}
