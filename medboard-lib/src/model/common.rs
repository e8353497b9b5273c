//! Shared payload fragments

use serde::Deserialize;
use serde::Serialize;

/// Aggregated review score of a doctor or hospital.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
}

/// A user as embedded in appointments and reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// An `{id, name}` pair, e.g. a doctor's hospital.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// `{specialty, count}` histogram bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyCount {
    pub specialty: String,
    pub count: u64,
}

/// `{city, state, count}` histogram bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub count: u64,
}
