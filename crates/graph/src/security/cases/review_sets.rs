use m365sec_core::{BodyActionRequestBuilder, CountRequestBuilder};

use crate::models::{AddToReviewSetPostRequestBody, EdiscoveryReviewSet, ExportPostRequestBody};

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/reviewSets`
    ReviewSetsRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/reviewSets{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> EdiscoveryReviewSet { list, create }
}

request_builder! {
    ReviewSetItemRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/reviewSets/{ediscoveryReviewSet%2Did}{?%24expand,%24select}"
    ) -> EdiscoveryReviewSet { get, update, delete }
}

impl ReviewSetsRequestBuilder {
    pub fn by_ediscovery_review_set_id(&self, review_set_id: &str) -> ReviewSetItemRequestBuilder {
        ReviewSetItemRequestBuilder::new(self.base.child_with_id(
            ReviewSetItemRequestBuilder::URL_TEMPLATE,
            "ediscoveryReviewSet%2Did",
            review_set_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/reviewSets/$count{?%24filter,%24search}",
        ))
    }
}

impl ReviewSetItemRequestBuilder {
    /// Copy the results of a search into the review set.
    pub fn add_to_review_set(&self) -> BodyActionRequestBuilder<AddToReviewSetPostRequestBody> {
        BodyActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/reviewSets/{ediscoveryReviewSet%2Did}/microsoft.graph.security.addToReviewSet",
        ))
    }

    pub fn export(&self) -> BodyActionRequestBuilder<ExportPostRequestBody> {
        BodyActionRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/reviewSets/{ediscoveryReviewSet%2Did}/microsoft.graph.security.export",
        ))
    }
}
