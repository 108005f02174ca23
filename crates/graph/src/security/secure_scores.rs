use m365sec_core::CountRequestBuilder;

use crate::models::{SecureScore, SecureScoreControlProfile};

request_builder! {
    /// `/security/secureScores`
    SecureScoresRequestBuilder(
        "{+baseurl}/security/secureScores{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> SecureScore { list }
}

request_builder! {
    SecureScoreItemRequestBuilder(
        "{+baseurl}/security/secureScores/{secureScore%2Did}{?%24expand,%24select}"
    ) -> SecureScore { get }
}

request_builder! {
    /// `/security/secureScoreControlProfiles`
    SecureScoreControlProfilesRequestBuilder(
        "{+baseurl}/security/secureScoreControlProfiles{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> SecureScoreControlProfile { list }
}

request_builder! {
    SecureScoreControlProfileItemRequestBuilder(
        "{+baseurl}/security/secureScoreControlProfiles/{secureScoreControlProfile%2Did}{?%24expand,%24select}"
    ) -> SecureScoreControlProfile { get, update }
}

impl SecureScoresRequestBuilder {
    pub fn by_secure_score_id(&self, secure_score_id: &str) -> SecureScoreItemRequestBuilder {
        SecureScoreItemRequestBuilder::new(self.base.child_with_id(
            SecureScoreItemRequestBuilder::URL_TEMPLATE,
            "secureScore%2Did",
            secure_score_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(
            self.base
                .child("{+baseurl}/security/secureScores/$count{?%24filter,%24search}"),
        )
    }
}

impl SecureScoreControlProfilesRequestBuilder {
    pub fn by_secure_score_control_profile_id(
        &self,
        profile_id: &str,
    ) -> SecureScoreControlProfileItemRequestBuilder {
        SecureScoreControlProfileItemRequestBuilder::new(self.base.child_with_id(
            SecureScoreControlProfileItemRequestBuilder::URL_TEMPLATE,
            "secureScoreControlProfile%2Did",
            profile_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/secureScoreControlProfiles/$count{?%24filter,%24search}",
        ))
    }
}
