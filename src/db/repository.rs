//! Database repository for employee CRUD operations.
//!
//! Uses prepared statements; each operation is a single statement, so SQLite's
//! statement atomicity is the only coordination between concurrent requests.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{EmployeeDetails, EmployeeRecord};

/// Outcome of an operation addressed by regid.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

// Display columns only; email and the timestamps stay in the table.
const DETAIL_COLUMNS: &str = "name, age, gender, phone_no, address_details, \
     work_experience, qualifications, projects, photo";

/// Database repository for all employee operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether any employee already uses this email.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM employees WHERE email = ?) AS taken")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        let taken: i64 = row.get("taken");
        Ok(taken != 0)
    }

    /// Insert a new employee and return its regid.
    ///
    /// The insert only happens if no row with the same email exists, so of two
    /// racing creates one fails with [`AppError::DuplicateEmail`].
    pub async fn create(&self, record: &EmployeeRecord) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"INSERT INTO employees (name, email, age, gender, phone_no, address_details,
                                      work_experience, qualifications, projects, photo,
                                      created_at, updated_at)
               SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
               WHERE NOT EXISTS (SELECT 1 FROM employees WHERE email = ?)"#,
        )
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.age)
        .bind(&record.gender)
        .bind(&record.phone_no)
        .bind(to_json(&record.address_details))
        .bind(to_json(&record.work_experience))
        .bind(to_json(&record.qualifications))
        .bind(to_json(&record.projects))
        .bind(record.photo.as_ref().map(to_json))
        .bind(&now)
        .bind(&now)
        .bind(&record.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::DuplicateEmail);
        }

        Ok(result.last_insert_rowid())
    }

    /// Get an employee by regid.
    pub async fn get(&self, regid: i64) -> Result<Lookup<EmployeeDetails>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            DETAIL_COLUMNS
        ))
        .bind(regid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(details_from_row).into())
    }

    /// List all employees in regid order.
    pub async fn list_all(&self) -> Result<Vec<EmployeeDetails>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM employees ORDER BY id",
            DETAIL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }

    /// Overwrite every field of an existing employee.
    ///
    /// A record without a photo keeps the stored photo.
    pub async fn save(&self, regid: i64, record: &EmployeeRecord) -> Result<Lookup<()>, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE employees
               SET name = ?, email = ?, age = ?, gender = ?, phone_no = ?,
                   address_details = ?, work_experience = ?, qualifications = ?,
                   projects = ?, photo = COALESCE(?, photo), updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.age)
        .bind(&record.gender)
        .bind(&record.phone_no)
        .bind(to_json(&record.address_details))
        .bind(to_json(&record.work_experience))
        .bind(to_json(&record.qualifications))
        .bind(to_json(&record.projects))
        .bind(record.photo.as_ref().map(to_json))
        .bind(&now)
        .bind(regid)
        .execute(&self.pool)
        .await?;

        Ok(found_if(result.rows_affected() > 0))
    }

    /// Delete an employee.
    pub async fn delete(&self, regid: i64) -> Result<Lookup<()>, AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(regid)
            .execute(&self.pool)
            .await?;

        Ok(found_if(result.rows_affected() > 0))
    }
}

fn found_if(affected: bool) -> Lookup<()> {
    if affected {
        Lookup::Found(())
    } else {
        Lookup::NotFound
    }
}

// Helper functions for row conversion

fn details_from_row(row: &sqlx::sqlite::SqliteRow) -> EmployeeDetails {
    let address_details: String = row.get("address_details");
    let work_experience: String = row.get("work_experience");
    let qualifications: String = row.get("qualifications");
    let projects: String = row.get("projects");
    let photo: Option<String> = row.get("photo");

    EmployeeDetails {
        name: row.get("name"),
        age: row.get("age"),
        gender: row.get("gender"),
        phone_no: row.get("phone_no"),
        address_details: parse_json_object(&address_details),
        work_experience: parse_json_array(&work_experience),
        qualifications: parse_json_array(&qualifications),
        projects: parse_json_array(&projects),
        photo: photo
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or(Value::Null),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn parse_json_object(s: &str) -> Map<String, Value> {
    serde_json::from_str(s).unwrap_or_default()
}

fn parse_json_array(s: &str) -> Vec<Value> {
    serde_json::from_str(s).unwrap_or_default()
}
