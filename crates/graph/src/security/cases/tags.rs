use m365sec_core::CountRequestBuilder;

use crate::models::EdiscoveryReviewTag;

request_builder! {
    /// `/security/cases/ediscoveryCases/{ediscoveryCase-id}/tags`
    TagsRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/tags{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> EdiscoveryReviewTag { list, create }
}

request_builder! {
    TagItemRequestBuilder(
        "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/tags/{ediscoveryReviewTag%2Did}{?%24expand,%24select}"
    ) -> EdiscoveryReviewTag { get, update, delete }
}

impl TagsRequestBuilder {
    pub fn by_ediscovery_review_tag_id(&self, tag_id: &str) -> TagItemRequestBuilder {
        TagItemRequestBuilder::new(self.base.child_with_id(
            TagItemRequestBuilder::URL_TEMPLATE,
            "ediscoveryReviewTag%2Did",
            tag_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/cases/ediscoveryCases/{ediscoveryCase%2Did}/tags/$count{?%24filter,%24search}",
        ))
    }
}
