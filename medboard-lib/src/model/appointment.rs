use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::UserRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(default)]
    pub patient: Option<UserRef>,
    #[serde(default)]
    pub doctor: Option<UserRef>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub appointment_type: String,
    #[serde(default)]
    pub status: String,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: DateTime<Utc>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub is_upcoming: bool,
    #[serde(default)]
    pub is_past: bool,
    #[serde(default)]
    pub cancelled_by: Option<String>,
    #[serde(default)]
    pub technical_issues_reported: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST appointments/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookAppointment {
    pub doctor: String,
    pub appointment_type: String,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: DateTime<Utc>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
