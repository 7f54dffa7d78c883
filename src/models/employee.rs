//! Employee write model and its display projection.

use serde::Serialize;
use serde_json::{Map, Value};

/// A validated employee payload, as accepted by create and update.
///
/// Values of this type are only produced by [`crate::validation`]; the
/// repository persists them without further checks.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub gender: String,
    pub phone_no: String,
    pub address_details: Map<String, Value>,
    pub work_experience: Vec<Value>,
    pub qualifications: Vec<Value>,
    pub projects: Vec<Value>,
    /// Opaque photo value. `None` when the payload carried no `photo` key.
    pub photo: Option<Value>,
}

/// The fields returned by the retrieve endpoint. Email and regid are never exposed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub phone_no: String,
    pub address_details: Map<String, Value>,
    pub work_experience: Vec<Value>,
    pub qualifications: Vec<Value>,
    pub projects: Vec<Value>,
    pub photo: Value,
}
