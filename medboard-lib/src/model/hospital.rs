use serde::Deserialize;
use serde::Serialize;

use super::KycStatus;
use super::Rating;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub kyc_status: KycStatus,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub total_appointments: Option<u64>,
    #[serde(default)]
    pub total_doctors: Option<u64>,
    #[serde(default)]
    pub total_patients: Option<u64>,
    #[serde(default)]
    pub license_document: Option<String>,
    #[serde(default)]
    pub id_document: Option<String>,
    #[serde(default)]
    pub created_at: String,
}
