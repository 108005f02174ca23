use m365sec_core::CountRequestBuilder;

use crate::models::{CategoryTemplate, LabelsRoot, RetentionLabel};

request_builder! {
    /// `/security/labels`
    LabelsRequestBuilder("{+baseurl}/security/labels{?%24expand,%24select}")
        -> LabelsRoot { get, update, delete }
}

request_builder! {
    RetentionLabelsRequestBuilder(
        "{+baseurl}/security/labels/retentionLabels{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> RetentionLabel { list, create }
}

request_builder! {
    RetentionLabelItemRequestBuilder(
        "{+baseurl}/security/labels/retentionLabels/{retentionLabel%2Did}{?%24expand,%24select}"
    ) -> RetentionLabel { get, update, delete }
}

request_builder! {
    /// File plan categories.
    CategoriesRequestBuilder(
        "{+baseurl}/security/labels/categories{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> CategoryTemplate { list, create }
}

request_builder! {
    CategoryItemRequestBuilder(
        "{+baseurl}/security/labels/categories/{categoryTemplate%2Did}{?%24expand,%24select}"
    ) -> CategoryTemplate { get, update, delete }
}

impl LabelsRequestBuilder {
    pub fn retention_labels(&self) -> RetentionLabelsRequestBuilder {
        RetentionLabelsRequestBuilder::new(
            self.base.child(RetentionLabelsRequestBuilder::URL_TEMPLATE),
        )
    }

    pub fn categories(&self) -> CategoriesRequestBuilder {
        CategoriesRequestBuilder::new(self.base.child(CategoriesRequestBuilder::URL_TEMPLATE))
    }
}

impl RetentionLabelsRequestBuilder {
    pub fn by_retention_label_id(&self, label_id: &str) -> RetentionLabelItemRequestBuilder {
        RetentionLabelItemRequestBuilder::new(self.base.child_with_id(
            RetentionLabelItemRequestBuilder::URL_TEMPLATE,
            "retentionLabel%2Did",
            label_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/labels/retentionLabels/$count{?%24filter,%24search}",
        ))
    }
}

impl CategoriesRequestBuilder {
    pub fn by_category_template_id(&self, category_id: &str) -> CategoryItemRequestBuilder {
        CategoryItemRequestBuilder::new(self.base.child_with_id(
            CategoryItemRequestBuilder::URL_TEMPLATE,
            "categoryTemplate%2Did",
            category_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(
            self.base
                .child("{+baseurl}/security/labels/categories/$count{?%24filter,%24search}"),
        )
    }
}
