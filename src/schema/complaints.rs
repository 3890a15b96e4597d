use serde_json::Value;

use super::enums::{ComplaintStatus, Priority};
use super::validate::{Email, FromPayload, Payload, ValidationFailure};
use super::{ADDRESS, BODY, PERSON_NAME, TITLE};
use crate::database::models::Complaint;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateComplaintInput {
    pub title: String,
    pub description: String,
    pub citizen_name: String,
    pub citizen_email: String,
    pub citizen_phone: Option<String>,
    pub address: String,
    pub priority: Priority,
}

impl FromPayload for CreateComplaintInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let title = p.required::<String>("title", &[&TITLE]);
        let description = p.required::<String>("description", &[&BODY]);
        let citizen_name = p.required::<String>("citizen_name", &[&PERSON_NAME]);
        let citizen_email = p.required::<String>("citizen_email", &[&Email]);
        let citizen_phone = p.nullable::<String>("citizen_phone", &[]);
        let address = p.required::<String>("address", &[&ADDRESS]);
        let priority = p.defaulted::<Priority>("priority", Priority::Medium, &[]);

        p.finish(|| {
            Some(Self {
                title: title?,
                description: description?,
                citizen_name: citizen_name?,
                citizen_email: citizen_email?,
                citizen_phone: citizen_phone?,
                address: address?,
                priority: priority?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateComplaintInput {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub priority: Option<Priority>,
    /// `Some(None)` unassigns; `None` leaves the assignment alone.
    pub assigned_to: Option<Option<i32>>,
}

impl FromPayload for UpdateComplaintInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let id = p.required::<i32>("id", &[]);
        let title = p.optional::<String>("title", &[&TITLE]);
        let description = p.optional::<String>("description", &[&BODY]);
        let status = p.optional::<ComplaintStatus>("status", &[]);
        let priority = p.optional::<Priority>("priority", &[]);
        let assigned_to = p.optional_nullable::<i32>("assigned_to", &[]);

        p.finish(|| {
            Some(Self {
                id: id?,
                title: title?,
                description: description?,
                status: status?,
                priority: priority?,
                assigned_to: assigned_to?,
            })
        })
    }
}

impl UpdateComplaintInput {
    /// Merges the supplied fields into `complaint`. Does not touch timestamps.
    pub fn apply_to(self, complaint: &mut Complaint) {
        if let Some(title) = self.title {
            complaint.title = title;
        }
        if let Some(description) = self.description {
            complaint.description = description;
        }
        if let Some(status) = self.status {
            complaint.status = status;
        }
        if let Some(priority) = self.priority {
            complaint.priority = priority;
        }
        if let Some(assigned_to) = self.assigned_to {
            complaint.assigned_to = assigned_to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn streetlight() -> Value {
        json!({
            "title": "Broken streetlight",
            "description": "Streetlight has been out for two weeks",
            "citizen_name": "Jane Doe",
            "citizen_email": "jane@example.com",
            "citizen_phone": null,
            "address": "123 Main St"
        })
    }

    #[test]
    fn create_defaults_priority_to_medium() {
        let input = CreateComplaintInput::from_payload(&streetlight()).unwrap();
        assert_eq!(input.priority, Priority::Medium);
        assert_eq!(input.citizen_phone, None);
    }

    #[test]
    fn create_names_the_single_violated_field() {
        let mut body = streetlight();
        body["title"] = json!("Lamp");
        let err = CreateComplaintInput::from_payload(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);
        assert_eq!(err.codes_for("title"), vec!["too_short"]);
    }

    #[test]
    fn citizen_phone_must_be_present_even_when_null() {
        let mut body = streetlight();
        body.as_object_mut().unwrap().remove("citizen_phone");
        let err = CreateComplaintInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("citizen_phone"), vec!["required"]);
    }

    #[test]
    fn create_rejects_invalid_priority_instead_of_defaulting() {
        let mut body = streetlight();
        body["priority"] = json!("SOMEDAY");
        let err = CreateComplaintInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("priority"), vec!["invalid_enum_value"]);
    }

    #[test]
    fn update_distinguishes_unassign_from_untouched() {
        let unassign = UpdateComplaintInput::from_payload(&json!({ "id": 1, "assigned_to": null })).unwrap();
        assert_eq!(unassign.assigned_to, Some(None));

        let untouched = UpdateComplaintInput::from_payload(&json!({ "id": 1 })).unwrap();
        assert_eq!(untouched.assigned_to, None);

        let assign = UpdateComplaintInput::from_payload(&json!({ "id": 1, "assigned_to": 9 })).unwrap();
        assert_eq!(assign.assigned_to, Some(Some(9)));
    }
}
