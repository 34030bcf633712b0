use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub child_name: String,
    pub dob: NaiveDate,
    pub program: String,
    pub parent_name: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub login_email: Option<String>,
    pub login_password: Option<String>,
}

/// The only transition is Pending -> Accepted, performed by the enrollment
/// service. There is no rejected state and no way back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[validate(length(min = 1, message = "Child name is required"))]
    pub child_name: String,
    pub dob: NaiveDate,
    #[validate(length(min = 1, message = "Program is required"))]
    pub program: String,
    #[validate(length(min = 1, message = "Parent name is required"))]
    pub parent_name: String,
    pub phone: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub address: Option<String>,
}
