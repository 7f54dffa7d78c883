//! Payload validation for employee writes.
//!
//! Checks are deliberately coarse: a field must be present and have the right JSON
//! shape. Ranges, formats and the contents of `qualifications`/`projects` are not
//! inspected.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::EmployeeRecord;

/// Keys every `addressDetails` object must carry.
pub const ADDRESS_DETAILS_KEYS: [&str; 4] = ["hno", "street", "city", "state"];

/// Keys every `workExperience` entry must carry.
pub const WORK_EXPERIENCE_KEYS: [&str; 4] = ["companyName", "fromDate", "toDate", "address"];

/// Coarse JSON shape expected for a top-level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Text,
    Integer,
    Object,
    Sequence,
}

/// Top-level fields in the order they are checked.
const EMPLOYEE_FIELDS: [(&str, Shape); 9] = [
    ("name", Shape::Text),
    ("email", Shape::Text),
    ("age", Shape::Integer),
    ("gender", Shape::Text),
    ("phoneNo", Shape::Text),
    ("addressDetails", Shape::Object),
    ("workExperience", Shape::Sequence),
    ("qualifications", Shape::Sequence),
    ("projects", Shape::Sequence),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing or incorrect data type for key: {key}")]
    MissingOrMistyped { key: &'static str },
    #[error("Missing key(s) in addressDetails")]
    AddressDetailsKeys,
    #[error("Missing key(s) in workExperience")]
    WorkExperienceKeys,
}

impl Shape {
    /// Booleans and floats are not integers; `null` matches nothing.
    fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Text => value.is_string(),
            Shape::Integer => value.as_i64().is_some(),
            Shape::Object => value.is_object(),
            Shape::Sequence => value.is_array(),
        }
    }
}

/// Validate the shape of every top-level field and build a record.
///
/// This is the check applied to updates. Nested keys are not inspected.
pub fn validate_fields(payload: &Value) -> Result<EmployeeRecord, ValidationError> {
    let body = payload.as_object().ok_or(ValidationError::NotAnObject)?;

    for (key, shape) in EMPLOYEE_FIELDS {
        match body.get(key) {
            Some(value) if shape.matches(value) => {}
            _ => return Err(ValidationError::MissingOrMistyped { key }),
        }
    }

    Ok(record_from(body))
}

/// Full create-time validation: field shapes, then `addressDetails` keys, then
/// the keys of each `workExperience` entry.
pub fn validate_employee(payload: &Value) -> Result<EmployeeRecord, ValidationError> {
    let record = validate_fields(payload)?;

    if !has_keys(&record.address_details, &ADDRESS_DETAILS_KEYS) {
        return Err(ValidationError::AddressDetailsKeys);
    }

    let complete = record.work_experience.iter().all(|entry| {
        entry
            .as_object()
            .is_some_and(|entry| has_keys(entry, &WORK_EXPERIENCE_KEYS))
    });
    if !complete {
        return Err(ValidationError::WorkExperienceKeys);
    }

    Ok(record)
}

/// The `email` of a payload, when it is a string. Used for the duplicate check
/// that runs before validation.
pub fn email_of(payload: &Value) -> Option<&str> {
    payload.get("email").and_then(Value::as_str)
}

fn has_keys(object: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().all(|key| object.contains_key(*key))
}

// Only called after every field passed `Shape::matches`.
fn record_from(body: &Map<String, Value>) -> EmployeeRecord {
    let text = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let sequence = |key: &str| {
        body.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };

    EmployeeRecord {
        name: text("name"),
        email: text("email"),
        age: body.get("age").and_then(Value::as_i64).unwrap_or_default(),
        gender: text("gender"),
        phone_no: text("phoneNo"),
        address_details: body
            .get("addressDetails")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
        work_experience: sequence("workExperience"),
        qualifications: sequence("qualifications"),
        projects: sequence("projects"),
        photo: body.get("photo").cloned(),
    }
}

/// How a `regid` supplied in a request body should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegidArg {
    /// The key is not present.
    Missing,
    /// Present but falsy: `null`, `0`, `""` or `false`.
    Blank,
    Id(i64),
    Malformed,
}

/// Interpret the `regid` key of a DELETE or GET body.
pub fn regid_of(body: &Value) -> RegidArg {
    let Some(value) = body.get("regid") else {
        return RegidArg::Missing;
    };

    match value {
        Value::Null => RegidArg::Blank,
        Value::Bool(false) => RegidArg::Blank,
        // 7.0 names employee 7; 7.5 names nobody.
        Value::Number(n) => match n.as_i64().or_else(|| integral(n.as_f64()?)) {
            Some(0) => RegidArg::Blank,
            Some(id) => RegidArg::Id(id),
            None => RegidArg::Malformed,
        },
        Value::String(s) if s.is_empty() => RegidArg::Blank,
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(id) => RegidArg::Id(id),
            Err(_) => RegidArg::Malformed,
        },
        _ => RegidArg::Malformed,
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "age": 31,
            "gender": "female",
            "phoneNo": "9876543210",
            "addressDetails": {
                "hno": "12B",
                "street": "MG Road",
                "city": "Pune",
                "state": "MH"
            },
            "workExperience": [{
                "companyName": "Acme",
                "fromDate": "2018-01-01",
                "toDate": "2021-06-30",
                "address": "Mumbai"
            }],
            "qualifications": [{ "degree": "BE" }],
            "projects": ["billing"]
        })
    }

    #[test]
    fn test_valid_payload_builds_record() {
        let record = validate_employee(&valid_payload()).unwrap();
        assert_eq!(record.name, "Asha Rao");
        assert_eq!(record.email, "asha@example.com");
        assert_eq!(record.age, 31);
        assert_eq!(record.phone_no, "9876543210");
        assert_eq!(record.address_details["city"], "Pune");
        assert_eq!(record.work_experience.len(), 1);
        assert_eq!(record.projects, vec![json!("billing")]);
        assert!(record.photo.is_none());
    }

    #[test]
    fn test_photo_is_carried_unvalidated() {
        let mut payload = valid_payload();
        payload["photo"] = json!({ "url": 42 });
        let record = validate_employee(&payload).unwrap();
        assert_eq!(record.photo, Some(json!({ "url": 42 })));
    }

    #[test]
    fn test_first_failing_field_is_reported() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("gender");
        payload["age"] = json!("31");

        assert_eq!(
            validate_fields(&payload),
            Err(ValidationError::MissingOrMistyped { key: "age" })
        );
    }

    #[test]
    fn test_integer_shape_is_strict() {
        for age in [json!(31.5), json!(true), json!(null), json!("31")] {
            let mut payload = valid_payload();
            payload["age"] = age;
            assert_eq!(
                validate_fields(&payload),
                Err(ValidationError::MissingOrMistyped { key: "age" })
            );
        }
    }

    #[test]
    fn test_object_is_not_a_sequence() {
        let mut payload = valid_payload();
        payload["projects"] = json!({ "billing": true });
        assert_eq!(
            validate_fields(&payload),
            Err(ValidationError::MissingOrMistyped { key: "projects" })
        );

        let mut payload = valid_payload();
        payload["addressDetails"] = json!(["12B", "MG Road"]);
        assert_eq!(
            validate_fields(&payload),
            Err(ValidationError::MissingOrMistyped {
                key: "addressDetails"
            })
        );
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert_eq!(
            validate_employee(&json!([1, 2, 3])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn test_each_address_key_is_required() {
        for key in ADDRESS_DETAILS_KEYS {
            let mut payload = valid_payload();
            payload["addressDetails"].as_object_mut().unwrap().remove(key);
            assert_eq!(
                validate_employee(&payload),
                Err(ValidationError::AddressDetailsKeys),
                "missing {key}"
            );
        }
    }

    #[test]
    fn test_each_work_experience_key_is_required() {
        for key in WORK_EXPERIENCE_KEYS {
            let mut payload = valid_payload();
            payload["workExperience"][0]
                .as_object_mut()
                .unwrap()
                .remove(key);
            assert_eq!(
                validate_employee(&payload),
                Err(ValidationError::WorkExperienceKeys),
                "missing {key}"
            );
        }
    }

    #[test]
    fn test_non_object_work_experience_entry_is_rejected() {
        let mut payload = valid_payload();
        payload["workExperience"] = json!(["Acme, 2018-2021"]);
        assert_eq!(
            validate_employee(&payload),
            Err(ValidationError::WorkExperienceKeys)
        );
    }

    #[test]
    fn test_empty_work_experience_is_accepted() {
        let mut payload = valid_payload();
        payload["workExperience"] = json!([]);
        assert!(validate_employee(&payload).is_ok());
    }

    #[test]
    fn test_field_check_skips_nested_keys() {
        let mut payload = valid_payload();
        payload["addressDetails"] = json!({});
        payload["workExperience"] = json!([{}]);
        assert!(validate_fields(&payload).is_ok());
        assert_eq!(
            validate_employee(&payload),
            Err(ValidationError::AddressDetailsKeys)
        );
    }

    #[test]
    fn test_email_of() {
        assert_eq!(email_of(&valid_payload()), Some("asha@example.com"));
        assert_eq!(email_of(&json!({ "email": 7 })), None);
        assert_eq!(email_of(&json!({})), None);
    }

    #[test]
    fn test_regid_of() {
        assert_eq!(regid_of(&json!({})), RegidArg::Missing);
        assert_eq!(regid_of(&json!({ "regid": null })), RegidArg::Blank);
        assert_eq!(regid_of(&json!({ "regid": 0 })), RegidArg::Blank);
        assert_eq!(regid_of(&json!({ "regid": "" })), RegidArg::Blank);
        assert_eq!(regid_of(&json!({ "regid": 7 })), RegidArg::Id(7));
        assert_eq!(regid_of(&json!({ "regid": "7" })), RegidArg::Id(7));
        assert_eq!(regid_of(&json!({ "regid": "seven" })), RegidArg::Malformed);
        assert_eq!(regid_of(&json!({ "regid": 7.0 })), RegidArg::Id(7));
        assert_eq!(regid_of(&json!({ "regid": 0.0 })), RegidArg::Blank);
        assert_eq!(regid_of(&json!({ "regid": 1.5 })), RegidArg::Malformed);
        assert_eq!(regid_of(&json!({ "regid": true })), RegidArg::Malformed);
        assert_eq!(regid_of(&json!({ "regid": [7] })), RegidArg::Malformed);
    }
}
