use serde_json::Value;

use super::enums::{PublicationStatus, PublicationType};
use super::validate::{FromPayload, Payload, ValidationFailure};
use super::{BODY, TITLE};

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePublicationInput {
    pub title: String,
    pub content: String,
    pub kind: PublicationType,
    pub status: PublicationStatus,
    pub featured: bool,
}

impl FromPayload for CreatePublicationInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let title = p.required::<String>("title", &[&TITLE]);
        let content = p.required::<String>("content", &[&BODY]);
        let kind = p.required::<PublicationType>("type", &[]);
        let status = p.defaulted::<PublicationStatus>("status", PublicationStatus::Draft, &[]);
        let featured = p.defaulted::<bool>("featured", false, &[]);

        p.finish(|| {
            Some(Self {
                title: title?,
                content: content?,
                kind: kind?,
                status: status?,
                featured: featured?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_defaults_to_unfeatured_draft() {
        let body = json!({
            "title": "Town Hall Meeting",
            "content": "Meeting scheduled for next week",
            "type": "EVENT"
        });
        let input = CreatePublicationInput::from_payload(&body).unwrap();
        assert_eq!(input.status, PublicationStatus::Draft);
        assert!(!input.featured);
        assert_eq!(input.kind, PublicationType::Event);
    }

    #[test]
    fn type_is_required_and_closed() {
        let body = json!({
            "title": "Town Hall Meeting",
            "content": "Meeting scheduled for next week",
            "type": "BLOG"
        });
        let err = CreatePublicationInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("type"), vec!["invalid_enum_value"]);
    }
}
