use rust_decimal::Decimal;
use serde_json::Value;

use super::enums::OccupancyStatus;
use super::validate::{len_between, numeric, FromPayload, Length, NonNegative, Payload, Positive, Precision, ValidationFailure};
use super::ADDRESS;

const UNIT_NUMBER: Length = len_between(1, 50);
const UNIT_TYPE: Length = len_between(2, 50);
const SIZE_SQM: Precision = numeric(8, 2);
const MONTHLY_RENT: Precision = numeric(10, 2);

#[derive(Debug, Clone, PartialEq)]
pub struct CreateHousingUnitInput {
    pub unit_number: String,
    pub address: String,
    pub unit_type: String,
    pub size_sqm: Decimal,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub occupancy_status: OccupancyStatus,
    pub monthly_rent: Option<Decimal>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
}

impl FromPayload for CreateHousingUnitInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let unit_number = p.required::<String>("unit_number", &[&UNIT_NUMBER]);
        let address = p.required::<String>("address", &[&ADDRESS]);
        let unit_type = p.required::<String>("unit_type", &[&UNIT_TYPE]);
        let size_sqm = p.required::<Decimal>("size_sqm", &[&Positive, &SIZE_SQM]);
        let bedrooms = p.required::<i32>("bedrooms", &[&NonNegative]);
        let bathrooms = p.required::<i32>("bathrooms", &[&NonNegative]);
        let occupancy_status = p.defaulted::<OccupancyStatus>("occupancy_status", OccupancyStatus::Vacant, &[]);
        let monthly_rent = p.nullable::<Decimal>("monthly_rent", &[&Positive, &MONTHLY_RENT]);
        let owner_name = p.nullable::<String>("owner_name", &[]);
        let owner_contact = p.nullable::<String>("owner_contact", &[]);

        p.finish(|| {
            Some(Self {
                unit_number: unit_number?,
                address: address?,
                unit_type: unit_type?,
                size_sqm: size_sqm?,
                bedrooms: bedrooms?,
                bathrooms: bathrooms?,
                occupancy_status: occupancy_status?,
                monthly_rent: monthly_rent?,
                owner_name: owner_name?,
                owner_contact: owner_contact?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit() -> Value {
        json!({
            "unit_number": "A-101",
            "address": "45 Garden Lane",
            "unit_type": "Apartment",
            "size_sqm": 54.5,
            "bedrooms": 2,
            "bathrooms": 1,
            "monthly_rent": "1250000.00",
            "owner_name": null,
            "owner_contact": null
        })
    }

    #[test]
    fn create_defaults_to_vacant() {
        let input = CreateHousingUnitInput::from_payload(&unit()).unwrap();
        assert_eq!(input.occupancy_status, OccupancyStatus::Vacant);
        assert_eq!(input.monthly_rent, Some(Decimal::new(125000000, 2)));
    }

    #[test]
    fn counts_must_be_non_negative_integers() {
        let mut body = unit();
        body["bedrooms"] = json!(-1);
        body["bathrooms"] = json!(1.5);
        let err = CreateHousingUnitInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("bedrooms"), vec!["negative"]);
        assert_eq!(err.codes_for("bathrooms"), vec!["not_integer"]);
    }

    #[test]
    fn zero_bedrooms_is_allowed_but_zero_size_is_not() {
        let mut body = unit();
        body["bedrooms"] = json!(0);
        body["size_sqm"] = json!(0);
        let err = CreateHousingUnitInput::from_payload(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["size_sqm"]);
    }

    #[test]
    fn decimals_must_fit_their_columns() {
        let mut body = unit();
        body["monthly_rent"] = json!("0.001");
        body["size_sqm"] = json!("123456789.999");
        let err = CreateHousingUnitInput::from_payload(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["size_sqm", "monthly_rent"]);
        assert_eq!(err.codes_for("size_sqm"), vec!["too_precise"]);
        assert_eq!(err.codes_for("monthly_rent"), vec!["too_precise"]);

        body["monthly_rent"] = json!("99999999.99");
        body["size_sqm"] = json!("54.50");
        assert!(CreateHousingUnitInput::from_payload(&body).is_ok());
    }

    #[test]
    fn owner_fields_are_nullable_not_optional() {
        let mut body = unit();
        body.as_object_mut().unwrap().remove("owner_contact");
        let err = CreateHousingUnitInput::from_payload(&body).unwrap_err();
        assert_eq!(err.codes_for("owner_contact"), vec!["required"]);
    }
}
