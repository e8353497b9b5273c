use serde::Deserialize;
use serde::Serialize;

use super::KycStatus;
use super::NamedRef;
use super::Rating;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub kyc_status: KycStatus,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub license_document: Option<String>,
    #[serde(default)]
    pub id_document: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub license_expiry_date: Option<String>,
    #[serde(default)]
    pub num_of_patients: Option<u64>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub num_of_appointments: Option<u64>,
    #[serde(default)]
    pub hospital: Option<NamedRef>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}
