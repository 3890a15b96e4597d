use rust_decimal::Decimal;
use serde_json::Value;

use super::enums::InfrastructureStatus;
use super::validate::{FromPayload, Payload, Positive, ValidationFailure};
use super::{ADDRESS, BODY, COST, TITLE};

/// The reporting user is not part of this shape; it comes from the caller's
/// session.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInfrastructureReportInput {
    pub title: String,
    pub description: String,
    pub location: String,
    pub coordinates: Option<String>,
    pub status: InfrastructureStatus,
    pub maintenance_required: bool,
    pub estimated_cost: Option<Decimal>,
}

impl FromPayload for CreateInfrastructureReportInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let title = p.required::<String>("title", &[&TITLE]);
        let description = p.required::<String>("description", &[&BODY]);
        let location = p.required::<String>("location", &[&ADDRESS]);
        let coordinates = p.nullable::<String>("coordinates", &[]);
        let status = p.required::<InfrastructureStatus>("status", &[]);
        let maintenance_required = p.defaulted::<bool>("maintenance_required", false, &[]);
        let estimated_cost = p.nullable::<Decimal>("estimated_cost", &[&Positive, &COST]);

        p.finish(|| {
            Some(Self {
                title: title?,
                description: description?,
                location: location?,
                coordinates: coordinates?,
                status: status?,
                maintenance_required: maintenance_required?,
                estimated_cost: estimated_cost?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bridge() -> Value {
        json!({
            "title": "Bridge inspection",
            "description": "Cracks found along the east support beam",
            "location": "River Road bridge",
            "coordinates": "-7.2279,107.9087",
            "status": "DAMAGED",
            "estimated_cost": 15000.5
        })
    }

    #[test]
    fn create_defaults_maintenance_flag_and_keeps_cost_exact() {
        let input = CreateInfrastructureReportInput::from_payload(&bridge()).unwrap();
        assert!(!input.maintenance_required);
        assert_eq!(input.estimated_cost, Some(Decimal::new(150005, 1)));
    }

    #[test]
    fn cost_must_be_positive_when_present() {
        let mut body = bridge();
        body["estimated_cost"] = json!(0);
        let err = CreateInfrastructureReportInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("estimated_cost"), vec!["not_positive"]);

        body["estimated_cost"] = json!("10000000000.00");
        let err = CreateInfrastructureReportInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("estimated_cost"), vec!["too_big"]);

        body["estimated_cost"] = json!(null);
        let input = CreateInfrastructureReportInput::from_payload(&body).unwrap();
        assert_eq!(input.estimated_cost, None);
    }

    #[test]
    fn status_has_no_default() {
        let mut body = bridge();
        body.as_object_mut().unwrap().remove("status");
        let err = CreateInfrastructureReportInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("status"), vec!["required"]);
    }

    #[test]
    fn client_supplied_reporter_is_not_part_of_the_shape() {
        let mut body = bridge();
        body["reported_by"] = json!(99);
        assert!(CreateInfrastructureReportInput::from_payload(&body).is_ok());
    }
}
