use serde_json::Value;

use super::validate::{FromPayload, Payload, ValidationFailure};

/// Writes `value` under `key`. An omitted description keeps the stored one;
/// an explicit null clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSystemSettingInput {
    pub key: String,
    pub value: String,
    pub description: Option<Option<String>>,
}

impl FromPayload for UpdateSystemSettingInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let key = p.required::<String>("key", &[]);
        let setting_value = p.required::<String>("value", &[]);
        let description = p.optional_nullable::<String>("description", &[]);

        p.finish(|| {
            Some(Self {
                key: key?,
                value: setting_value?,
                description: description?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn description_has_three_states() {
        let keep = UpdateSystemSettingInput::from_payload(&json!({ "key": "k", "value": "v" })).unwrap();
        assert_eq!(keep.description, None);

        let clear =
            UpdateSystemSettingInput::from_payload(&json!({ "key": "k", "value": "v", "description": null })).unwrap();
        assert_eq!(clear.description, Some(None));

        let set = UpdateSystemSettingInput::from_payload(&json!({ "key": "k", "value": "v", "description": "d" }))
            .unwrap();
        assert_eq!(set.description, Some(Some("d".to_string())));
    }

    #[test]
    fn value_must_be_a_string() {
        let err = UpdateSystemSettingInput::from_payload(&json!({ "key": "k", "value": 5 })).unwrap_err();
        assert_eq!(err.codes_for("value"), vec!["invalid_type"]);
    }
}
