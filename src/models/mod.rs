//! Data models for the employee records service.
//!
//! Wire names follow the camelCase keys clients already send (`phoneNo`,
//! `addressDetails`, `workExperience`).

mod employee;

pub use employee::*;
