//! Hospital pages

use super::ListResource;
use super::StatCard;
use super::TableEntity;
use super::avatar_column;
use super::location_column;
use super::or_default;
use super::or_not_specified;
use crate::api::Endpoint;
use crate::api::HospitalFilter;
use crate::api::Hospitals;
use crate::api::Kyc;
use crate::api::ListParams;
use crate::api::ReviewTarget;
use crate::api::Reviews;
use crate::api::Stats;
use crate::error::Error;
use crate::model::Hospital;
use crate::model::HospitalStats;
use crate::model::KycRecord;
use crate::model::KycSubject;
use crate::model::Paginated;
use crate::model::Rating;
use crate::model::Review;
use crate::store::AppStore;
use crate::table::Column;
use crate::table::Row;

impl TableEntity for Hospital {
    fn columns() -> Vec<Column> {
        vec![
            avatar_column(),
            Column::key("name", "Hospital Name").hideable(false),
            Column::key("email", "Email"),
            Column::key("phone_number", "Phone"),
            Column::key("specialties", "Specialties"),
            location_column(),
            Column::key("kyc_status", "KYC Status"),
            Column::key("is_active", "Active"),
            Column::key("is_visible", "Visible"),
        ]
    }

    fn to_row(&self) -> Row {
        let rating = self.rating.unwrap_or_default();
        Row::new(&self.id)
            .with("name", or_default(Some(self.name.as_str()), "Unknown Hospital"))
            .with("email", or_default(Some(self.email.as_str()), "No email"))
            .with("phone_number", or_default(Some(self.phone_number.as_str()), "No phone"))
            .with("photo", or_default(self.photo.as_deref(), ""))
            .with("specialties", self.specialties.clone())
            .with("city", or_not_specified(Some(self.city.as_str())))
            .with("state", or_not_specified(Some(self.state.as_str())))
            .with("country", or_not_specified(Some(self.country.as_str())))
            .with("is_active", self.is_active.unwrap_or(true))
            .with("is_visible", self.is_visible.unwrap_or(true))
            .with("kyc_status", self.kyc_status.as_str())
            .with("average_rating", rating.average_rating)
            .with("total_reviews", rating.total_reviews)
            .with("created_at", self.created_at.as_str())
    }
}

impl ListResource for Hospital {
    const NAME: &'static str = "hospitals";

    type Filter = HospitalFilter;
    type Stats = HospitalStats;

    fn list_endpoint(params: &ListParams, filter: &HospitalFilter) -> Endpoint<Paginated<Self>> {
        Hospitals::list(params, filter)
    }

    fn stats_endpoint() -> Endpoint<HospitalStats> {
        Stats::hospitals()
    }

    fn stat_cards(stats: Option<&HospitalStats>, list: &Paginated<Self>) -> Vec<StatCard> {
        match stats {
            Some(stats) => vec![
                StatCard::new("Total Hospitals", stats.total_hospitals, "System-wide hospitals"),
                StatCard::new("Verified Hospitals", stats.verified_hospitals, "KYC verified"),
                StatCard::new("Active Hospitals", stats.active_hospitals, "Currently active"),
                StatCard::percent(
                    "Monthly Growth",
                    stats.hospitals_growth_rate,
                    "Hospital growth rate",
                ),
            ],
            None => vec![
                StatCard::new("Total Hospitals", list.count, "System-wide hospitals"),
                StatCard::new("Verified Hospitals", 0, "KYC verified"),
                StatCard::new("Active Hospitals", 0, "Currently active"),
                StatCard::new("Monthly Growth", "0%", "Hospital growth rate"),
            ],
        }
    }

    fn insight_cards(stats: &HospitalStats) -> Vec<StatCard> {
        if stats.system_wide_kyc_completion.is_none() {
            return Vec::new();
        }
        vec![
            StatCard::percent(
                "System KYC Rate",
                stats.system_wide_kyc_completion,
                "Verification compliance",
            ),
            StatCard::new("Cities", stats.total_cities.unwrap_or(0), "Cities with hospitals"),
            StatCard::new("Pending KYC", stats.pending_kyc, "Awaiting verification"),
        ]
    }
}

/// One hospital with reviews and KYC history.
#[derive(Debug, Clone)]
pub struct HospitalDetail {
    pub hospital: Hospital,
    pub reviews: Paginated<Review>,
    pub kyc_records: Vec<KycRecord>,
}

impl HospitalDetail {
    /// Fetches the hospital, the first page of reviews and the KYC history.
    pub async fn load(store: &AppStore, id: &str) -> Result<Self, Error> {
        let hospital_endpoint = Hospitals::get(id);
        let reviews_endpoint = Reviews::list(ReviewTarget::Hospital, id, Some(1), None);
        let records_endpoint = Kyc::records(&KycSubject::Hospital(id.to_string()));
        let (hospital, reviews, records) = tokio::join!(
            store.query(&hospital_endpoint),
            store.query(&reviews_endpoint),
            store.query(&records_endpoint)
        );

        let reviews = reviews.map(|r| r.into_inner()).unwrap_or_else(|e| {
            log::warn!("failed to load reviews of hospital {}: {}", id, e);
            Paginated::empty()
        });
        let kyc_records = records.map(|r| r.into_inner().results).unwrap_or_else(|e| {
            log::warn!("failed to load KYC records of hospital {}: {}", id, e);
            Vec::new()
        });

        Ok(Self {
            hospital: hospital?.into_inner(),
            reviews,
            kyc_records,
        })
    }

    pub fn subject(&self) -> KycSubject {
        KycSubject::Hospital(self.hospital.id.clone())
    }

    /// The rating, `0.0` from zero reviews when the backend sent none.
    pub fn rating(&self) -> Rating {
        self.hospital.rating.unwrap_or_default()
    }
}
