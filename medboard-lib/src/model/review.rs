use serde::Deserialize;
use serde::Serialize;

use super::UserRef;

/// A review of a doctor or hospital.
///
/// The subject fields are filled for the matching kind only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user: UserRef,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub is_auth_user: bool,
    #[serde(default)]
    pub is_updated: bool,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasReviewed {
    pub has_reviewed: bool,
}
