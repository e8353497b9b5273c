//! Dashboard counters
//!
//! The stats endpoints answer with a base set of counters plus extra fields
//! that depend on the caller's role (admin, doctor, hospital). Each payload
//! decodes into one struct whose role-specific fields are `Option`.

use serde::Deserialize;
use serde::Serialize;

use super::CityCount;
use super::SpecialtyCount;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientStats {
    #[serde(default)]
    pub total_patients: u64,
    #[serde(default)]
    pub active_patients: u64,
    #[serde(default)]
    pub pending_kyc: u64,
    #[serde(default)]
    pub verified_patients: u64,

    // doctor and hospital roles
    #[serde(default)]
    pub patients_this_month: Option<u64>,
    #[serde(default)]
    pub new_patients_today: Option<u64>,
    #[serde(default)]
    pub appointment_conversion_rate: Option<f64>,
    #[serde(default)]
    pub patients_this_week: Option<u64>,
    #[serde(default)]
    pub kyc_completion_rate: Option<f64>,

    // admin
    #[serde(default)]
    pub total_hospitals_with_patients: Option<u64>,
    #[serde(default)]
    pub system_wide_kyc_completion: Option<f64>,
    #[serde(default)]
    pub patients_growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorStats {
    #[serde(default)]
    pub total_doctors: u64,
    #[serde(default)]
    pub active_doctors: u64,
    #[serde(default)]
    pub verified_doctors: u64,
    #[serde(default)]
    pub pending_kyc: u64,

    // hospital
    #[serde(default)]
    pub doctors_this_month: Option<u64>,
    #[serde(default)]
    pub average_patients_per_doctor: Option<f64>,
    #[serde(default)]
    pub top_specialties: Option<Vec<SpecialtyCount>>,

    // admin
    #[serde(default)]
    pub total_hospitals_with_doctors: Option<u64>,
    #[serde(default)]
    pub system_wide_kyc_completion: Option<f64>,
    #[serde(default)]
    pub doctors_growth_rate: Option<f64>,
    #[serde(default)]
    pub specialties_distribution: Option<Vec<SpecialtyCount>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HospitalStats {
    #[serde(default)]
    pub total_hospitals: u64,
    #[serde(default)]
    pub verified_hospitals: u64,
    #[serde(default)]
    pub active_hospitals: u64,
    #[serde(default)]
    pub pending_kyc: u64,

    // hospital
    #[serde(default)]
    pub hospital_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u64>,
    #[serde(default)]
    pub doctors_this_month: Option<u64>,
    #[serde(default)]
    pub appointments_this_month: Option<u64>,
    #[serde(default)]
    pub top_specialties: Option<Vec<SpecialtyCount>>,

    // admin
    #[serde(default)]
    pub total_hospitals_with_doctors: Option<u64>,
    #[serde(default)]
    pub total_cities: Option<u64>,
    #[serde(default)]
    pub system_wide_kyc_completion: Option<f64>,
    #[serde(default)]
    pub hospitals_growth_rate: Option<f64>,
    #[serde(default)]
    pub total_specialties: Option<u64>,
    #[serde(default)]
    pub top_cities: Option<Vec<CityCount>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentStats {
    #[serde(default)]
    pub total_appointments: u64,
    #[serde(default)]
    pub today_appointments: u64,
    #[serde(default)]
    pub upcoming_appointments: u64,
    #[serde(default)]
    pub pending_confirmation: u64,

    // doctor
    #[serde(default)]
    pub completed_this_week: Option<u64>,
    #[serde(default)]
    pub cancellation_rate: Option<f64>,
    #[serde(default)]
    pub average_daily_appointments: Option<f64>,

    // hospital
    #[serde(default)]
    pub total_doctors_with_appointments: Option<u64>,
    #[serde(default)]
    pub completed_this_month: Option<u64>,
    #[serde(default)]
    pub revenue_this_month: Option<f64>,

    // admin
    #[serde(default)]
    pub total_hospitals_with_appointments: Option<u64>,
    #[serde(default)]
    pub system_wide_completed: Option<u64>,
    #[serde(default)]
    pub system_wide_cancellation_rate: Option<f64>,
}
