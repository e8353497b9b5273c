//! Appointment pages

use chrono::DateTime;
use chrono::Utc;

use super::ListResource;
use super::StatCard;
use super::TableEntity;
use super::or_default;
use crate::api::AppointmentFilter;
use crate::api::Appointments;
use crate::api::Endpoint;
use crate::api::ListParams;
use crate::api::Stats;
use crate::error::Error;
use crate::model::Appointment;
use crate::model::AppointmentStats;
use crate::model::Paginated;
use crate::model::UserRef;
use crate::store::AppStore;
use crate::table::Column;
use crate::table::Row;

/// e.g. `Mar 1, 2025`
const DATE_FORMAT: &str = "%b %-d, %Y";

/// e.g. `9:00 AM`
const TIME_FORMAT: &str = "%-I:%M %p";

/// `"Mar 1, 2025"`
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// `"9:00 AM - 9:30 AM"`
pub fn format_time_range(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    format!("{} - {}", start.format(TIME_FORMAT), end.format(TIME_FORMAT))
}

fn participant_name(user: Option<&UserRef>, fallback: &str) -> String {
    or_default(user.map(|u| u.name.as_str()), fallback)
}

impl TableEntity for Appointment {
    fn columns() -> Vec<Column> {
        vec![
            Column::key("doctor_name", "Doctor").hideable(false),
            Column::key("patient_name", "Patient").hideable(false),
            Column::key("date", "Date"),
            Column::key("time", "Time").sortable(false),
            Column::key("reason", "Reason"),
            Column::key("status", "Status"),
            Column::key("appointment_type", "Type"),
        ]
    }

    fn to_row(&self) -> Row {
        Row::new(&self.id)
            .with(
                "doctor_name",
                participant_name(self.doctor.as_ref(), "Unknown Doctor"),
            )
            .with(
                "patient_name",
                participant_name(self.patient.as_ref(), "Unknown Patient"),
            )
            .with("date", format_date(&self.scheduled_start_time))
            .with(
                "time",
                format_time_range(&self.scheduled_start_time, &self.scheduled_end_time),
            )
            .with("start", self.scheduled_start_time.to_rfc3339())
            .with("reason", or_default(Some(self.reason.as_str()), "No reason provided"))
            .with("status", self.status.as_str())
            .with("appointment_type", self.appointment_type.as_str())
    }
}

impl ListResource for Appointment {
    const NAME: &'static str = "appointments";

    type Filter = AppointmentFilter;
    type Stats = AppointmentStats;

    fn list_endpoint(
        params: &ListParams,
        filter: &AppointmentFilter,
    ) -> Endpoint<Paginated<Self>> {
        Appointments::list(params, filter)
    }

    fn stats_endpoint() -> Endpoint<AppointmentStats> {
        Stats::appointments()
    }

    fn stat_cards(stats: Option<&AppointmentStats>, list: &Paginated<Self>) -> Vec<StatCard> {
        let Some(stats) = stats else {
            return vec![
                StatCard::new("Total Appointments", list.count, "All appointments"),
                StatCard::new("Today's Appointments", 0, "Scheduled for today"),
                StatCard::new("Active Doctors", 0, "Doctors with appointments"),
                StatCard::new("Completion Rate", "0%", "Completed appointments"),
            ];
        };

        let last = match stats.total_hospitals_with_appointments {
            Some(hospitals) => {
                StatCard::new("Active Hospitals", hospitals, "Hospitals with appointments")
            }
            None => StatCard::new(
                "Pending Confirmation",
                stats.pending_confirmation,
                "Awaiting confirmation",
            ),
        };
        vec![
            StatCard::new("Total Appointments", stats.total_appointments, "All appointments"),
            StatCard::new("Today's Appointments", stats.today_appointments, "Scheduled for today"),
            StatCard::new(
                "Upcoming Appointments",
                stats.upcoming_appointments,
                "Scheduled ahead",
            ),
            last,
        ]
    }

    fn insight_cards(stats: &AppointmentStats) -> Vec<StatCard> {
        let Some(completed) = stats.system_wide_completed else {
            return Vec::new();
        };
        vec![
            StatCard::new("Completed This Month", completed, "System-wide completions"),
            StatCard::percent(
                "Cancellation Rate",
                stats.system_wide_cancellation_rate,
                "System-wide cancellations",
            ),
            StatCard::new(
                "Pending Confirmation",
                stats.pending_confirmation,
                "Awaiting confirmation",
            ),
        ]
    }
}

/// One appointment.
#[derive(Debug, Clone)]
pub struct AppointmentDetail {
    pub appointment: Appointment,
}

impl AppointmentDetail {
    pub async fn load(store: &AppStore, id: &str) -> Result<Self, Error> {
        let appointment = store.query(&Appointments::get(id)).await?.into_inner();
        Ok(Self { appointment })
    }

    pub fn date(&self) -> String {
        format_date(&self.appointment.scheduled_start_time)
    }

    pub fn time(&self) -> String {
        format_time_range(
            &self.appointment.scheduled_start_time,
            &self.appointment.scheduled_end_time,
        )
    }
}

/// Cancels an appointment. Appointment lists and details refetch on next use.
pub async fn cancel_appointment(store: &AppStore, id: &str, reason: &str) -> Result<(), Error> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(Error::CancellationReasonRequired);
    }
    store.mutate(&Appointments::cancel(id, reason)).await?;
    log::info!("appointment {} cancelled", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::store::StoreConfig;
    use crate::table::Value;

    fn appointment(extra: serde_json::Value) -> Appointment {
        let mut base = json!({
            "id": "a1",
            "doctor": {"id": "d1", "name": "Dr. Bea Ade"},
            "patient": {"id": "p1", "name": "Ada Obi"},
            "reason": "Follow-up",
            "appointment_type": "VIDEO",
            "status": "CONFIRMED",
            "scheduled_start_time": "2025-03-01T09:00:00Z",
            "scheduled_end_time": "2025-03-01T09:30:00Z"
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_formats() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 1, 21, 30, 0).unwrap();
        assert_eq!(format_date(&start), "Mar 1, 2025");
        assert_eq!(format_time_range(&start, &end), "9:00 AM - 9:30 PM");
    }

    #[test]
    fn test_row() {
        let row = appointment(json!({})).to_row();
        assert_eq!(row.get("doctor_name"), &Value::from("Dr. Bea Ade"));
        assert_eq!(row.get("date"), &Value::from("Mar 1, 2025"));
        assert_eq!(row.get("time"), &Value::from("9:00 AM - 9:30 AM"));
        assert_eq!(row.get("reason"), &Value::from("Follow-up"));
    }

    #[test]
    fn test_row_fallbacks() {
        let row = appointment(json!({"doctor": null, "patient": {"id": "p1", "name": ""}, "reason": " "}))
            .to_row();
        assert_eq!(row.get("doctor_name"), &Value::from("Unknown Doctor"));
        assert_eq!(row.get("patient_name"), &Value::from("Unknown Patient"));
        assert_eq!(row.get("reason"), &Value::from("No reason provided"));
    }

    #[test]
    fn test_stat_cards() {
        let list = Paginated::<Appointment>::empty();
        let cards = Appointment::stat_cards(None, &list);
        assert_eq!(cards[3].title, "Completion Rate");

        let mut stats = AppointmentStats {
            total_appointments: 30,
            pending_confirmation: 4,
            ..Default::default()
        };
        let cards = Appointment::stat_cards(Some(&stats), &list);
        assert_eq!(cards[0].value, "30");
        assert_eq!(cards[3].title, "Pending Confirmation");
        assert!(Appointment::insight_cards(&stats).is_empty());

        stats.total_hospitals_with_appointments = Some(5);
        stats.system_wide_completed = Some(12);
        let cards = Appointment::stat_cards(Some(&stats), &list);
        assert_eq!(cards[3].title, "Active Hospitals");
        assert_eq!(Appointment::insight_cards(&stats)[0].value, "12");
    }

    #[tokio::test]
    async fn test_cancel_requires_reason() {
        let store = AppStore::open(StoreConfig::new("http://127.0.0.1:9/api/v1"))
            .await
            .unwrap();
        let err = cancel_appointment(&store, "a1", "  ").await.unwrap_err();
        assert!(matches!(err, Error::CancellationReasonRequired));
    }
}
