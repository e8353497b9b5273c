//! Patient pages

use super::ListResource;
use super::StatCard;
use super::TableEntity;
use super::avatar_column;
use super::location_column;
use super::or_default;
use super::or_not_specified;
use crate::api::AppointmentFilter;
use crate::api::Appointments;
use crate::api::ListParams;
use crate::api::Patients;
use crate::api::Stats;
use crate::api::Endpoint;
use crate::error::Error;
use crate::model::Appointment;
use crate::model::Paginated;
use crate::model::Patient;
use crate::model::PatientStats;
use crate::store::AppStore;
use crate::table::Column;
use crate::table::Row;

impl TableEntity for Patient {
    fn columns() -> Vec<Column> {
        vec![
            avatar_column(),
            Column::key("name", "Name").hideable(false),
            Column::key("email", "Email"),
            Column::key("gender", "Gender"),
            location_column(),
            Column::key("is_active", "Active"),
            Column::key("kyc_status", "KYC Status"),
        ]
    }

    fn to_row(&self) -> Row {
        Row::new(&self.id)
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("phone_number", self.phone_number.as_str())
            .with("photo", or_default(self.photo.as_deref(), ""))
            .with("gender", or_not_specified(self.gender.as_deref()))
            .with("city", or_not_specified(Some(self.city.as_str())))
            .with("state", or_not_specified(Some(self.state.as_str())))
            .with("country", or_not_specified(Some(self.country.as_str())))
            .with("is_active", self.is_active)
            .with("is_visible", self.is_visible)
            .with("kyc_status", self.kyc_status.as_str())
            .with("created_at", self.created_at.as_str())
    }
}

impl ListResource for Patient {
    const NAME: &'static str = "patients";

    type Filter = ();
    type Stats = PatientStats;

    fn list_endpoint(params: &ListParams, _filter: &()) -> Endpoint<Paginated<Self>> {
        Patients::list(params)
    }

    fn stats_endpoint() -> Endpoint<PatientStats> {
        Stats::patients()
    }

    fn stat_cards(stats: Option<&PatientStats>, list: &Paginated<Self>) -> Vec<StatCard> {
        match stats {
            Some(stats) => vec![
                StatCard::new("Total Patients", stats.total_patients, "System-wide patients"),
                StatCard::new("Active Patients", stats.active_patients, "Currently active"),
                StatCard::percent(
                    "System KYC Rate",
                    stats.system_wide_kyc_completion,
                    "Verification compliance",
                ),
                StatCard::new(
                    "Active Hospitals",
                    stats.total_hospitals_with_patients.unwrap_or(0),
                    "Hospitals with patients",
                ),
            ],
            None => vec![
                StatCard::new("Total Patients", list.count, "System-wide patients"),
                StatCard::new("Active Patients", 0, "Currently active"),
                StatCard::new("KYC Completion", "0%", "System verification rate"),
                StatCard::new("Growth Rate", "0%", "Monthly growth"),
            ],
        }
    }

    fn insight_cards(stats: &PatientStats) -> Vec<StatCard> {
        if stats.patients_growth_rate.is_none() {
            return Vec::new();
        }
        vec![
            StatCard::percent("Monthly Growth", stats.patients_growth_rate, "Patient growth rate"),
            StatCard::new("Verified Patients", stats.verified_patients, "KYC verified"),
            StatCard::new("Pending KYC", stats.pending_kyc, "Awaiting verification"),
        ]
    }
}

/// One patient with their appointments.
#[derive(Debug, Clone)]
pub struct PatientDetail {
    pub patient: Patient,
    pub appointments: Paginated<Appointment>,
}

impl PatientDetail {
    /// Fetches the patient and the first page of their appointments.
    pub async fn load(store: &AppStore, id: &str) -> Result<Self, Error> {
        let filter = AppointmentFilter {
            patient_id: Some(id.to_string()),
            ..Default::default()
        };
        let patient_endpoint = Patients::get(id);
        let appointments_endpoint = Appointments::list(&ListParams::new().page(1), &filter);
        let (patient, appointments) = tokio::join!(
            store.query(&patient_endpoint),
            store.query(&appointments_endpoint)
        );

        let appointments = match appointments {
            Ok(response) => response.into_inner(),
            Err(e) => {
                log::warn!("failed to load appointments of patient {}: {}", id, e);
                Paginated::empty()
            }
        };
        Ok(Self {
            patient: patient?.into_inner(),
            appointments,
        })
    }
}
