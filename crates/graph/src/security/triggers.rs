use m365sec_core::CountRequestBuilder;

use crate::models::{RetentionEvent, RetentionEventType, TriggerTypesRoot, TriggersRoot};

request_builder! {
    /// `/security/triggers`
    TriggersRequestBuilder("{+baseurl}/security/triggers{?%24expand,%24select}")
        -> TriggersRoot { get, update, delete }
}

request_builder! {
    RetentionEventsRequestBuilder(
        "{+baseurl}/security/triggers/retentionEvents{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> RetentionEvent { list, create }
}

request_builder! {
    RetentionEventItemRequestBuilder(
        "{+baseurl}/security/triggers/retentionEvents/{retentionEvent%2Did}{?%24expand,%24select}"
    ) -> RetentionEvent { get, update, delete }
}

request_builder! {
    /// `/security/triggerTypes`
    TriggerTypesRequestBuilder("{+baseurl}/security/triggerTypes{?%24expand,%24select}")
        -> TriggerTypesRoot { get, update, delete }
}

request_builder! {
    RetentionEventTypesRequestBuilder(
        "{+baseurl}/security/triggerTypes/retentionEventTypes{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> RetentionEventType { list, create }
}

request_builder! {
    RetentionEventTypeItemRequestBuilder(
        "{+baseurl}/security/triggerTypes/retentionEventTypes/{retentionEventType%2Did}{?%24expand,%24select}"
    ) -> RetentionEventType { get, update, delete }
}

impl TriggersRequestBuilder {
    pub fn retention_events(&self) -> RetentionEventsRequestBuilder {
        RetentionEventsRequestBuilder::new(
            self.base.child(RetentionEventsRequestBuilder::URL_TEMPLATE),
        )
    }
}

impl RetentionEventsRequestBuilder {
    pub fn by_retention_event_id(&self, event_id: &str) -> RetentionEventItemRequestBuilder {
        RetentionEventItemRequestBuilder::new(self.base.child_with_id(
            RetentionEventItemRequestBuilder::URL_TEMPLATE,
            "retentionEvent%2Did",
            event_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/triggers/retentionEvents/$count{?%24filter,%24search}",
        ))
    }
}

impl TriggerTypesRequestBuilder {
    pub fn retention_event_types(&self) -> RetentionEventTypesRequestBuilder {
        RetentionEventTypesRequestBuilder::new(
            self.base.child(RetentionEventTypesRequestBuilder::URL_TEMPLATE),
        )
    }
}

impl RetentionEventTypesRequestBuilder {
    pub fn by_retention_event_type_id(
        &self,
        event_type_id: &str,
    ) -> RetentionEventTypeItemRequestBuilder {
        RetentionEventTypeItemRequestBuilder::new(self.base.child_with_id(
            RetentionEventTypeItemRequestBuilder::URL_TEMPLATE,
            "retentionEventType%2Did",
            event_type_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/triggerTypes/retentionEventTypes/$count{?%24filter,%24search}",
        ))
    }
}
