//! Payload validation: decodes a JSON object field by field, applying
//! presence rules, type coercions and constraints, and collects every
//! violation before rejecting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use validator::ValidateEmail;

/// One violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: &'static str,
    pub message: String,
}

/// Every violation found in a payload, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("input failed validation on {} field(s)", .violations.len())]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn single(field: impl Into<String>, reject: Reject) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.into(),
                code: reject.code,
                message: reject.message,
            }],
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn codes_for(&self, field: &str) -> Vec<&'static str> {
        self.violations
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.code)
            .collect()
    }

    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for v in &self.violations {
            if !fields.contains(&v.field.as_str()) {
                fields.push(&v.field);
            }
        }
        fields
    }
}

/// Reason a single value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reject {
    pub code: &'static str,
    pub message: String,
}

impl Reject {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Self::new("required", "field is required")
    }

    pub fn invalid_type(expected: &str, received: &Value) -> Self {
        Self::new(
            "invalid_type",
            format!("expected {}, received {}", expected, json_type(received)),
        )
    }
}

pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Input shapes that can be built from a raw JSON payload.
pub trait FromPayload: Sized {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure>;
}

/// Conversion of one JSON value into a typed field.
pub trait Decode: Sized {
    fn decode(value: &Value) -> Result<Self, Reject>;
}

impl Decode for String {
    fn decode(value: &Value) -> Result<Self, Reject> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(Reject::invalid_type("string", other)),
        }
    }
}

impl Decode for bool {
    fn decode(value: &Value) -> Result<Self, Reject> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(Reject::invalid_type("boolean", other)),
        }
    }
}

impl Decode for i64 {
    fn decode(value: &Value) -> Result<Self, Reject> {
        let Value::Number(n) = value else {
            return Err(Reject::invalid_type("integer", value));
        };

        match n.as_i64() {
            Some(i) => Ok(i),
            None => match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                Some(f) if f.is_finite() && f.fract() == 0.0 => {
                    Err(Reject::new("too_big", format!("{} is outside the supported integer range", n)))
                }
                _ => Err(Reject::new("not_integer", format!("expected an integer, received {}", n))),
            },
        }
    }
}

impl Decode for i32 {
    fn decode(value: &Value) -> Result<Self, Reject> {
        let whole = i64::decode(value)?;
        i32::try_from(whole)
            .map_err(|_| Reject::new("too_big", format!("{} is outside the supported integer range", whole)))
    }
}

impl Decode for Decimal {
    fn decode(value: &Value) -> Result<Self, Reject> {
        let parsed = match value {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            other => return Err(Reject::invalid_type("number", other)),
        };
        parsed.ok_or_else(|| Reject::new("invalid_type", format!("expected a decimal number, received {}", value)))
    }
}

impl Decode for DateTime<Utc> {
    fn decode(value: &Value) -> Result<Self, Reject> {
        coerce_date(value)
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

/// Normalizes the accepted date representations to a UTC timestamp:
/// RFC 3339, naive date-times (read as UTC), plain dates (midnight UTC) and
/// epoch milliseconds.
pub fn coerce_date(value: &Value) -> Result<DateTime<Utc>, Reject> {
    match value {
        Value::String(raw) => parse_date(raw.trim())
            .ok_or_else(|| Reject::new("invalid_date", format!("'{}' is not a recognised date", raw))),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .ok_or_else(|| Reject::new("invalid_date", format!("{} is not a valid epoch timestamp", n))),
        other => Err(Reject::invalid_type("date", other)),
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A constraint applied after a field decodes.
pub trait Rule<T: ?Sized> {
    fn check(&self, value: &T) -> Result<(), Reject>;
}

/// String length bounds, counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

pub const fn min_len(min: usize) -> Length {
    Length { min: Some(min), max: None }
}

pub const fn len_between(min: usize, max: usize) -> Length {
    Length { min: Some(min), max: Some(max) }
}

impl Rule<String> for Length {
    fn check(&self, value: &String) -> Result<(), Reject> {
        let count = value.chars().count();
        if let Some(min) = self.min {
            if count < min {
                return Err(Reject::new(
                    "too_short",
                    format!("must contain at least {} character(s)", min),
                ));
            }
        }
        if let Some(max) = self.max {
            if count > max {
                return Err(Reject::new(
                    "too_long",
                    format!("must contain at most {} character(s)", max),
                ));
            }
        }
        Ok(())
    }
}

pub struct Email;

impl Rule<String> for Email {
    fn check(&self, value: &String) -> Result<(), Reject> {
        if value.validate_email() {
            Ok(())
        } else {
            Err(Reject::new("invalid_email", "must be a valid email address"))
        }
    }
}

pub struct Positive;

impl Rule<Decimal> for Positive {
    fn check(&self, value: &Decimal) -> Result<(), Reject> {
        if *value > Decimal::ZERO {
            Ok(())
        } else {
            Err(Reject::new("not_positive", "must be greater than 0"))
        }
    }
}

impl Rule<i32> for Positive {
    fn check(&self, value: &i32) -> Result<(), Reject> {
        if *value > 0 {
            Ok(())
        } else {
            Err(Reject::new("not_positive", "must be greater than 0"))
        }
    }
}

impl Rule<i64> for Positive {
    fn check(&self, value: &i64) -> Result<(), Reject> {
        if *value > 0 {
            Ok(())
        } else {
            Err(Reject::new("not_positive", "must be greater than 0"))
        }
    }
}

/// Fixed-point bounds of a `NUMERIC(precision, scale)` column. Trailing
/// fractional zeros do not count against the scale.
#[derive(Debug, Clone, Copy)]
pub struct Precision {
    pub max_scale: u32,
    pub max_integer_digits: u32,
}

pub const fn numeric(precision: u32, scale: u32) -> Precision {
    Precision {
        max_scale: scale,
        max_integer_digits: precision - scale,
    }
}

impl Rule<Decimal> for Precision {
    fn check(&self, value: &Decimal) -> Result<(), Reject> {
        if value.normalize().scale() > self.max_scale {
            return Err(Reject::new(
                "too_precise",
                format!("must have at most {} decimal place(s)", self.max_scale),
            ));
        }

        let limit = Decimal::from(10u64.pow(self.max_integer_digits));
        if value.abs() >= limit {
            return Err(Reject::new(
                "too_big",
                format!("must be less than {}", limit),
            ));
        }
        Ok(())
    }
}

pub struct NonNegative;

impl Rule<i32> for NonNegative {
    fn check(&self, value: &i32) -> Result<(), Reject> {
        if *value >= 0 {
            Ok(())
        } else {
            Err(Reject::new("negative", "must be greater than or equal to 0"))
        }
    }
}

/// Field-by-field reader over a JSON object.
///
/// Every accessor returns `None` when the field failed; the violation is
/// recorded and decoding carries on so that one pass reports all of them.
/// Keys the shape does not ask for are ignored.
pub struct Payload<'a> {
    fields: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> Payload<'a> {
    pub fn new(value: &'a Value) -> Result<Self, ValidationFailure> {
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
                violations: Vec::new(),
            }),
            other => Err(ValidationFailure::single("", Reject::invalid_type("object", other))),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Present and not null.
    pub fn required<T: Decode>(&mut self, name: &'static str, rules: &[&dyn Rule<T>]) -> Option<T> {
        let fields = self.fields;
        match fields.get(name) {
            None => {
                self.reject(name, Reject::required());
                None
            }
            Some(Value::Null) => {
                self.reject(name, Reject::invalid_type("a value", &Value::Null));
                None
            }
            Some(value) => self.decode(name, value, rules),
        }
    }

    /// Present, either null or a value.
    pub fn nullable<T: Decode>(&mut self, name: &'static str, rules: &[&dyn Rule<T>]) -> Option<Option<T>> {
        let fields = self.fields;
        match fields.get(name) {
            None => {
                self.reject(name, Reject::required());
                None
            }
            Some(Value::Null) => Some(None),
            Some(value) => self.decode(name, value, rules).map(Some),
        }
    }

    /// May be omitted; null is not a value.
    pub fn optional<T: Decode>(&mut self, name: &'static str, rules: &[&dyn Rule<T>]) -> Option<Option<T>> {
        let fields = self.fields;
        match fields.get(name) {
            None => Some(None),
            Some(Value::Null) => {
                self.reject(name, Reject::invalid_type("a value", &Value::Null));
                None
            }
            Some(value) => self.decode(name, value, rules).map(Some),
        }
    }

    /// May be omitted (`Some(None)`) or explicitly null (`Some(Some(None))`).
    pub fn optional_nullable<T: Decode>(
        &mut self,
        name: &'static str,
        rules: &[&dyn Rule<T>],
    ) -> Option<Option<Option<T>>> {
        let fields = self.fields;
        match fields.get(name) {
            None => Some(None),
            Some(Value::Null) => Some(Some(None)),
            Some(value) => self.decode(name, value, rules).map(|v| Some(Some(v))),
        }
    }

    /// Falls back to `default` when omitted; null is not a value.
    pub fn defaulted<T: Decode>(&mut self, name: &'static str, default: T, rules: &[&dyn Rule<T>]) -> Option<T> {
        let fields = self.fields;
        match fields.get(name) {
            None => Some(default),
            Some(Value::Null) => {
                self.reject(name, Reject::invalid_type("a value", &Value::Null));
                None
            }
            Some(value) => self.decode(name, value, rules),
        }
    }

    /// Rejects with everything collected, or assembles the typed input.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationFailure> {
        if !self.violations.is_empty() {
            return Err(ValidationFailure {
                violations: self.violations,
            });
        }
        build().ok_or_else(|| ValidationFailure::single("", Reject::new("incomplete", "input could not be assembled")))
    }

    fn decode<T: Decode>(&mut self, name: &'static str, value: &Value, rules: &[&dyn Rule<T>]) -> Option<T> {
        let decoded = match T::decode(value) {
            Ok(decoded) => decoded,
            Err(reject) => {
                self.reject(name, reject);
                return None;
            }
        };

        let mut passed = true;
        for rule in rules {
            if let Err(reject) = rule.check(&decoded) {
                self.reject(name, reject);
                passed = false;
            }
        }
        passed.then_some(decoded)
    }

    fn reject(&mut self, name: &str, reject: Reject) {
        self.violations.push(FieldViolation {
            field: name.to_string(),
            code: reject.code,
            message: reject.message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn non_object_payload_is_rejected_at_the_root() {
        let err = Payload::new(&json!([1, 2])).err().unwrap();
        assert_eq!(err.violations[0].field, "");
        assert_eq!(err.violations[0].code, "invalid_type");
    }

    #[test]
    fn presence_rules_distinguish_nullable_from_optional() {
        let body = json!({ "a": null, "b": null });
        let mut p = Payload::new(&body).unwrap();

        assert_eq!(p.nullable::<String>("a", &[]), Some(None));
        assert_eq!(p.optional::<String>("b", &[]), None);
        assert_eq!(p.optional::<String>("c", &[]), Some(None));
        assert_eq!(p.nullable::<String>("d", &[]), None);
        assert_eq!(p.optional_nullable::<i32>("b", &[]), Some(Some(None)));
        assert_eq!(p.optional_nullable::<i32>("e", &[]), Some(None));

        let err = p.finish(|| Some(())).unwrap_err();
        assert_eq!(err.fields(), vec!["b", "d"]);
        assert_eq!(err.codes_for("d"), vec!["required"]);
    }

    #[test]
    fn defaults_apply_only_when_omitted() {
        let body = json!({ "flag": null });
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.defaulted::<bool>("missing", true, &[]), Some(true));
        assert_eq!(p.defaulted::<bool>("flag", true, &[]), None);
    }

    #[test]
    fn all_failing_rules_are_reported() {
        let body = json!({ "email": "no" });
        let mut p = Payload::new(&body).unwrap();
        let _ = p.required::<String>("email", &[&Email, &min_len(5)]);
        let err = p.finish(|| Some(())).unwrap_err();
        assert_eq!(err.codes_for("email"), vec!["invalid_email", "too_short"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(len_between(2, 3).check(&"éé".to_string()).is_ok());
        assert_eq!(len_between(5, 200).check(&"four".to_string()).unwrap_err().code, "too_short");
        assert_eq!(len_between(1, 2).check(&"abc".to_string()).unwrap_err().code, "too_long");
    }

    #[test]
    fn integers_accept_whole_floats_only() {
        assert_eq!(i32::decode(&json!(3)).unwrap(), 3);
        assert_eq!(i32::decode(&json!(3.0)).unwrap(), 3);
        assert_eq!(i32::decode(&json!(2.5)).unwrap_err().code, "not_integer");
        assert_eq!(i32::decode(&json!(10_000_000_000i64)).unwrap_err().code, "too_big");
        assert_eq!(i64::decode(&json!(10_000_000_000i64)).unwrap(), 10_000_000_000);
        assert_eq!(i64::decode(&json!(1e20)).unwrap_err().code, "too_big");
        assert_eq!(i32::decode(&json!("3")).unwrap_err().code, "invalid_type");
    }

    #[test]
    fn decimals_parse_exactly_from_numbers_and_strings() {
        assert_eq!(Decimal::decode(&json!(0.1)).unwrap(), Decimal::new(1, 1));
        assert_eq!(Decimal::decode(&json!("1250.50")).unwrap(), Decimal::new(125050, 2));
        assert_eq!(Decimal::decode(&json!(1e3)).unwrap(), Decimal::new(1000, 0));
        assert!(Decimal::decode(&json!("abc")).is_err());
        assert!(Decimal::decode(&json!(true)).is_err());
        assert_eq!(Positive.check(&Decimal::ZERO).unwrap_err().code, "not_positive");
    }

    #[test]
    fn precision_bounds_scale_and_magnitude() {
        let rent = numeric(10, 2);
        assert!(rent.check(&Decimal::new(125050, 2)).is_ok());
        assert!(rent.check(&Decimal::new(1_250_500, 3)).is_ok());
        assert!(rent.check(&Decimal::new(9_999_999_999, 2)).is_ok());
        assert_eq!(rent.check(&Decimal::new(1, 3)).unwrap_err().code, "too_precise");
        assert_eq!(rent.check(&Decimal::new(100_000_000, 0)).unwrap_err().code, "too_big");

        let size = numeric(8, 2);
        assert_eq!(size.check(&Decimal::new(123_456_789_999, 3)).unwrap_err().code, "too_precise");
        assert_eq!(size.check(&Decimal::new(123_456_789, 0)).unwrap_err().code, "too_big");
    }

    #[test]
    fn dates_coerce_from_several_representations() {
        let rfc = coerce_date(&json!("2024-03-01T08:30:00+02:00")).unwrap();
        assert_eq!((rfc.hour(), rfc.minute()), (6, 30));

        let naive = coerce_date(&json!("2024-03-01 08:30:00")).unwrap();
        assert_eq!(naive.hour(), 8);

        let fractional = coerce_date(&json!("2024-03-01T08:30:00.250")).unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 250);

        let day = coerce_date(&json!("2024-03-01")).unwrap();
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2024, 3, 1, 0));

        let epoch = coerce_date(&json!(1_709_251_200_000i64)).unwrap();
        assert_eq!(epoch, day);

        assert_eq!(coerce_date(&json!("next tuesday")).unwrap_err().code, "invalid_date");
        assert_eq!(coerce_date(&json!(true)).unwrap_err().code, "invalid_type");
    }
}
