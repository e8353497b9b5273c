//! Doctor pages

use super::ListResource;
use super::StatCard;
use super::TableEntity;
use super::avatar_column;
use super::location_column;
use super::or_default;
use super::or_not_specified;
use crate::api::DoctorFilter;
use crate::api::Doctors;
use crate::api::Endpoint;
use crate::api::Kyc;
use crate::api::ListParams;
use crate::api::ReviewTarget;
use crate::api::Reviews;
use crate::api::Stats;
use crate::error::Error;
use crate::model::Doctor;
use crate::model::DoctorStats;
use crate::model::KycRecord;
use crate::model::KycSubject;
use crate::model::Paginated;
use crate::model::Review;
use crate::store::AppStore;
use crate::table::Column;
use crate::table::Row;

impl TableEntity for Doctor {
    fn columns() -> Vec<Column> {
        vec![
            avatar_column(),
            Column::key("name", "Name").hideable(false),
            Column::key("email", "Email"),
            Column::key("phone_number", "Phone"),
            Column::key("specialty", "Specialty"),
            location_column(),
            Column::key("kyc_status", "KYC Status"),
            Column::key("is_active", "Active"),
            Column::key("is_visible", "Visible"),
        ]
    }

    fn to_row(&self) -> Row {
        Row::new(&self.id)
            .with("name", or_default(Some(self.name.as_str()), "Unknown Doctor"))
            .with("email", or_default(Some(self.email.as_str()), "No email"))
            .with("phone_number", or_default(Some(self.phone_number.as_str()), "No phone"))
            .with("photo", or_default(self.photo.as_deref(), ""))
            .with("specialty", or_not_specified(Some(self.specialty.as_str())))
            .with("gender", or_not_specified(self.gender.as_deref()))
            .with("city", or_not_specified(Some(self.city.as_str())))
            .with("state", or_not_specified(Some(self.state.as_str())))
            .with("country", or_not_specified(Some(self.country.as_str())))
            .with("is_active", self.is_active.unwrap_or(false))
            .with("is_visible", self.is_visible.unwrap_or(false))
            .with("kyc_status", self.kyc_status.as_str())
            .with("hospital", self.hospital.as_ref().map(|h| h.name.clone()))
            .with("created_at", self.created_at.as_str())
    }
}

impl ListResource for Doctor {
    const NAME: &'static str = "doctors";

    type Filter = DoctorFilter;
    type Stats = DoctorStats;

    fn list_endpoint(params: &ListParams, filter: &DoctorFilter) -> Endpoint<Paginated<Self>> {
        Doctors::list(params, filter)
    }

    fn stats_endpoint() -> Endpoint<DoctorStats> {
        Stats::doctors()
    }

    fn stat_cards(stats: Option<&DoctorStats>, list: &Paginated<Self>) -> Vec<StatCard> {
        match stats {
            Some(stats) => vec![
                StatCard::new("Total Doctors", stats.total_doctors, "System-wide doctors"),
                StatCard::new("Active Doctors", stats.active_doctors, "Currently active"),
                StatCard::percent(
                    "System KYC Rate",
                    stats.system_wide_kyc_completion,
                    "Verification compliance",
                ),
                StatCard::new(
                    "Active Hospitals",
                    stats.total_hospitals_with_doctors.unwrap_or(0),
                    "Hospitals with doctors",
                ),
            ],
            None => vec![
                StatCard::new("Total Doctors", list.count, "System-wide doctors"),
                StatCard::new("Active Doctors", 0, "Currently active"),
                StatCard::new("KYC Completion", "0%", "System verification rate"),
                StatCard::new("Verified Doctors", 0, "KYC verified"),
            ],
        }
    }

    fn insight_cards(stats: &DoctorStats) -> Vec<StatCard> {
        if stats.doctors_growth_rate.is_none() {
            return Vec::new();
        }
        vec![
            StatCard::percent("Monthly Growth", stats.doctors_growth_rate, "Doctor growth rate"),
            StatCard::new("Verified Doctors", stats.verified_doctors, "KYC verified"),
            StatCard::new("Pending KYC", stats.pending_kyc, "Awaiting verification"),
        ]
    }
}

/// One doctor with reviews and KYC history.
#[derive(Debug, Clone)]
pub struct DoctorDetail {
    pub doctor: Doctor,
    pub reviews: Paginated<Review>,
    pub kyc_records: Vec<KycRecord>,
}

impl DoctorDetail {
    /// Fetches the doctor, the first page of reviews and the KYC history.
    ///
    /// Only a failure to fetch the doctor itself is an error.
    pub async fn load(store: &AppStore, id: &str) -> Result<Self, Error> {
        let doctor_endpoint = Doctors::get(id);
        let reviews_endpoint = Reviews::list(ReviewTarget::Doctor, id, Some(1), None);
        let records_endpoint = Kyc::records(&KycSubject::Doctor(id.to_string()));
        let (doctor, reviews, records) = tokio::join!(
            store.query(&doctor_endpoint),
            store.query(&reviews_endpoint),
            store.query(&records_endpoint)
        );

        let reviews = reviews.map(|r| r.into_inner()).unwrap_or_else(|e| {
            log::warn!("failed to load reviews of doctor {}: {}", id, e);
            Paginated::empty()
        });
        let kyc_records = records.map(|r| r.into_inner().results).unwrap_or_else(|e| {
            log::warn!("failed to load KYC records of doctor {}: {}", id, e);
            Vec::new()
        });

        Ok(Self {
            doctor: doctor?.into_inner(),
            reviews,
            kyc_records,
        })
    }

    pub fn subject(&self) -> KycSubject {
        KycSubject::Doctor(self.doctor.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::table::Value;

    #[test]
    fn test_row_defaults() {
        let doctor: Doctor = serde_json::from_value(json!({
            "id": "d1",
            "name": "Dr. Bea Ade",
            "email": "",
            "phone_number": "+2348000000001",
            "specialty": "",
            "city": "Ikeja",
            "state": "Lagos",
            "country": "Nigeria",
            "kyc_status": "PENDING",
            "created_at": "2025-03-01T09:00:00Z",
            "updated_at": "2025-03-01T09:00:00Z"
        }))
        .unwrap();

        let row = doctor.to_row();
        assert_eq!(row.get("email"), &Value::from("No email"));
        assert_eq!(row.get("specialty"), &Value::from("Not specified"));
        assert_eq!(row.get("gender"), &Value::from("Not specified"));
        assert_eq!(row.get("is_active"), &Value::Bool(false));
        assert_eq!(row.get("is_visible"), &Value::Bool(false));
        assert!(row.get("hospital").is_null());
    }

    #[test]
    fn test_insights_only_for_admin_stats() {
        let base = DoctorStats {
            total_doctors: 12,
            ..Default::default()
        };
        assert!(Doctor::insight_cards(&base).is_empty());

        let admin = DoctorStats {
            doctors_growth_rate: Some(4.5),
            verified_doctors: 9,
            ..base
        };
        let cards = Doctor::insight_cards(&admin);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].value, "4.5%");
        assert_eq!(cards[1].value, "9");
    }
}
