use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMember {
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub meet_id: String,
    #[serde(default)]
    pub is_appointment: bool,
    #[serde(default)]
    pub appointment_id: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub notes: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<CalendarMember>,
}
