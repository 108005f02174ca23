use m365sec_core::backed_model;
use serde::{Deserialize, Serialize};

backed_model! {
    pub struct Identity {
        "displayName" => display_name, set_display_name: String,
        "id" => id, set_id: String,
    }
}

backed_model! {
    /// The application, device and user behind an action.
    pub struct IdentitySet {
        "application" => application, set_application: Identity,
        "device" => device, set_device: Identity,
        "user" => user, set_user: Identity,
    }
}

impl IdentitySet {
    /// Display name of the user, else of the application.
    pub fn display_name(&self) -> Option<String> {
        self.user()
            .and_then(|u| u.display_name())
            .or_else(|| self.application().and_then(|a| a.display_name()))
    }
}

backed_model! {
    pub struct EmailIdentity ["#microsoft.graph.emailIdentity"] {
        "displayName" => display_name, set_display_name: String,
        "email" => email, set_email: String,
        "id" => id, set_id: String,
    }
}

backed_model! {
    pub struct ResultInfo {
        "code" => code, set_code: i32,
        "message" => message, set_message: String,
        "subcode" => subcode, set_subcode: i32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentFormat {
    Text,
    Html,
    Markdown,
    UnknownFutureValue,
}

backed_model! {
    pub struct FormattedContent {
        "content" => content, set_content: String,
        "format" => format, set_format: ContentFormat,
    }
}

wire_names!(ContentFormat);

#[cfg(test)]
mod tests {
    use super::*;
    use m365sec_core::Parsable;
    use serde_json::json;

    #[test]
    fn identity_set_prefers_user_name() {
        let set = IdentitySet::create_from_discriminator_value(json!({
            "application": {"displayName": "Defender"},
            "user": {"displayName": "Ada", "id": "u1"}
        }))
        .unwrap();
        assert_eq!(set.display_name().as_deref(), Some("Ada"));

        let app_only =
            IdentitySet::create_from_discriminator_value(json!({"application": {"displayName": "Defender"}}))
                .unwrap();
        assert_eq!(app_only.display_name().as_deref(), Some("Defender"));
    }

    #[test]
    fn formatted_content_reads_format() {
        let content = FormattedContent::create_from_discriminator_value(json!({
            "content": "<p>hi</p>",
            "format": "html"
        }))
        .unwrap();
        assert_eq!(content.format(), Some(ContentFormat::Html));
        assert_eq!("markdown".parse::<ContentFormat>().unwrap(), ContentFormat::Markdown);
        assert!("rtf".parse::<ContentFormat>().is_err());
    }
}
