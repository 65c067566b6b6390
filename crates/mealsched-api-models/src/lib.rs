#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
//! Shared HTTP DTOs for the Mealsched public API.
//!
//! These types are used by both the server handlers and the browser client so the
//! wire contract (camelCase JSON, ISO-8601 timestamps) has a single definition.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of free-form schedule notes.
pub const MAX_NOTES_LEN: usize = 250;
/// Maximum length of an employee display name.
pub const MAX_EMPLOYEE_NAME_LEN: usize = 100;
/// Maximum length of an employee code.
pub const MAX_EMPLOYEE_CODE_LEN: usize = 50;

/// Credentials submitted to `POST /api/login`.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plain-text password; never logged.
    pub password: String,
}

impl LoginRequest {
    /// Convenience constructor.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Instant the token stops being accepted.
    pub expiration: DateTime<Utc>,
}

/// Error body returned on server-side failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Short, human-readable summary.
    pub error: String,
    /// Diagnostic message when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

const fn default_active() -> bool {
    true
}

/// Meal schedule entry as exchanged over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealScheduleDto {
    /// Server-assigned identifier; zero on create.
    #[serde(default)]
    pub schedule_id: i32,
    /// Owning employee's numeric id.
    pub employee_id: i32,
    /// Employee display name, resolved by the server on reads.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Day the meal is scheduled for.
    #[serde(default)]
    pub meal_date: Option<NaiveDate>,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Whether the entry is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl MealScheduleDto {
    /// First validation failure, if any.
    #[must_use]
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.meal_date.is_none() {
            return Some("Meal date is required");
        }
        if self
            .notes
            .as_deref()
            .is_some_and(|notes| notes.chars().count() > MAX_NOTES_LEN)
        {
            return Some("Notes cannot exceed 250 characters");
        }
        None
    }
}

/// Employee record as exchanged over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    /// Server-assigned numeric id; zero on create.
    #[serde(default)]
    pub id: i32,
    /// Stable external identifier (UUID); generated when blank.
    #[serde(default)]
    pub employee_id: String,
    /// Display name.
    #[serde(default)]
    pub employee_name: String,
    /// Optional payroll/badge code.
    #[serde(default)]
    pub employee_code: Option<String>,
    /// Whether the employee is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl EmployeeDto {
    /// First validation failure, if any.
    #[must_use]
    pub fn validation_error(&self) -> Option<&'static str> {
        let name = self.employee_name.trim();
        if name.is_empty() {
            return Some("Employee name is required");
        }
        if name.chars().count() > MAX_EMPLOYEE_NAME_LEN {
            return Some("Employee name cannot exceed 100 characters");
        }
        if self
            .employee_code
            .as_deref()
            .is_some_and(|code| code.chars().count() > MAX_EMPLOYEE_CODE_LEN)
        {
            return Some("Employee code cannot exceed 50 characters");
        }
        None
    }
}
