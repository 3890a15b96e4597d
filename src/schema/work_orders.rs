use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use super::enums::Priority;
use super::validate::{FromPayload, Payload, Positive, ValidationFailure};
use super::{BODY, COST, TITLE};

/// Status, actual cost and completion date are server-controlled and not
/// accepted here.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateWorkOrderInput {
    pub title: String,
    pub description: String,
    pub complaint_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub priority: Priority,
    pub estimated_cost: Option<Decimal>,
    pub scheduled_date: Option<DateTime<Utc>>,
}

impl FromPayload for CreateWorkOrderInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let title = p.required::<String>("title", &[&TITLE]);
        let description = p.required::<String>("description", &[&BODY]);
        let complaint_id = p.nullable::<i32>("complaint_id", &[]);
        let assigned_to = p.nullable::<i32>("assigned_to", &[]);
        let priority = p.defaulted::<Priority>("priority", Priority::Medium, &[]);
        let estimated_cost = p.nullable::<Decimal>("estimated_cost", &[&Positive, &COST]);
        let scheduled_date = p.nullable::<DateTime<Utc>>("scheduled_date", &[]);

        p.finish(|| {
            Some(Self {
                title: title?,
                description: description?,
                complaint_id: complaint_id?,
                assigned_to: assigned_to?,
                priority: priority?,
                estimated_cost: estimated_cost?,
                scheduled_date: scheduled_date?,
            })
        })
    }
}
