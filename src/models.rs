use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Profile of a registered user as the portal needs it after login.
/// The password hash never leaves the directory layer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub employee_number: String,
    pub department: Option<String>,
}

/// Registration payload handed to the directory.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub employee_number: String,
    pub email: String,
    pub department: Option<String>,
}

/// One fortnightly pay period. Generated on demand, never persisted;
/// `available` is an existence check against the master directory at
/// generation time.
#[derive(Serialize, Debug, Clone)]
pub struct PayPeriod {
    pub pay_date: NaiveDate,
    /// Display label, e.g. "24-Jul-2025". Also the master filename stem.
    pub label: String,
    pub filepath: PathBuf,
    pub available: bool,
}

/// An already-extracted payslip found in the output directory.
#[derive(Serialize, Debug, Clone)]
pub struct ExtractedFile {
    pub pay_date: String,
    pub filename: String,
}

/// Authenticated-user snapshot stored in the session.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionUser {
    pub username: String,
    pub employee_number: String,
    pub department: Option<String>,
}

/// One-shot notice rendered on the next page, then discarded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Flash {
    /// "success", "danger", "info" or "warning" (styling hook only).
    pub level: String,
    pub message: String,
}

impl Flash {
    pub fn new(level: &str, message: impl Into<String>) -> Self {
        Self {
            level: level.to_string(),
            message: message.into(),
        }
    }
}
