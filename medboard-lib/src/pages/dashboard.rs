//! Admin dashboard page

use chrono::DateTime;
use chrono::Utc;

use super::StatCard;
use super::appointments::format_date;
use crate::api::Dashboard;
use crate::error::Error;
use crate::model::DashboardData;
use crate::model::PendingApproval;
use crate::model::RecentAppointment;
use crate::store::AppStore;
use crate::table::Column;
use crate::table::DataTable;
use crate::table::Row;
use crate::table::TableOptions;

/// System totals, recent appointments and pending approvals.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    data: DashboardData,
    cards: Vec<StatCard>,
}

impl DashboardPage {
    pub async fn load(store: &AppStore) -> Result<Self, Error> {
        let data = store.query(&Dashboard::admin_stats()).await?.into_inner();
        Ok(Self::from_data(data))
    }

    pub fn from_data(data: DashboardData) -> Self {
        let cards = vec![
            StatCard::new("Total Patients", data.total_patients, "Registered patients"),
            StatCard::new("Total Doctors", data.total_doctors, "Registered doctors"),
            StatCard::new("Total Hospitals", data.total_hospitals, "Registered hospitals"),
            StatCard::new(
                "Pending Approvals",
                data.pending_approvals.len(),
                "Awaiting KYC review",
            ),
        ];
        Self { data, cards }
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn stat_cards(&self) -> &[StatCard] {
        &self.cards
    }

    pub fn recent_appointments(&self) -> &[RecentAppointment] {
        &self.data.recent_appointments
    }

    pub fn pending_approvals(&self) -> &[PendingApproval] {
        &self.data.pending_approvals
    }

    /// Recent appointments as an unpaginated table.
    pub fn recent_appointments_table(&self) -> Result<DataTable, Error> {
        let columns = vec![
            Column::key("patient_name", "Patient"),
            Column::key("doctor_name", "Doctor"),
            Column::key("date", "Date"),
            Column::key("status", "Status"),
            Column::key("appointment_type", "Type"),
        ];
        let rows = self
            .data
            .recent_appointments
            .iter()
            .map(|a| {
                Row::new(&a.id)
                    .with("patient_name", a.patient_name.as_str())
                    .with("doctor_name", a.doctor_name.as_str())
                    .with("date", display_date(&a.start_time))
                    .with("status", a.status.as_str())
                    .with("appointment_type", a.appointment_type.as_str())
            })
            .collect();
        unpaginated(columns, rows)
    }

    /// Pending approvals as an unpaginated table.
    pub fn pending_approvals_table(&self) -> Result<DataTable, Error> {
        let columns = vec![
            Column::key("name", "Name"),
            Column::key("role", "Role"),
            Column::key("submitted_at", "Submitted"),
        ];
        let rows = self
            .data
            .pending_approvals
            .iter()
            .map(|p| {
                Row::new(&p.id)
                    .with("name", p.name.as_str())
                    .with("role", p.role.as_str())
                    .with("submitted_at", display_date(&p.submitted_at))
            })
            .collect();
        unpaginated(columns, rows)
    }
}

fn unpaginated(columns: Vec<Column>, rows: Vec<Row>) -> Result<DataTable, Error> {
    let options = TableOptions::default()
        .with_pagination(false)
        .with_free_text_search(false)
        .with_column_visibility_toggle(false);
    let mut table = DataTable::new(columns, options)?;
    table.set_rows(rows)?;
    Ok(table)
}

/// Formats an RFC 3339 timestamp as a date, passing anything else through.
fn display_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => format_date(&at.with_timezone(&Utc)),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::table::Value;

    fn data() -> DashboardData {
        serde_json::from_value(json!({
            "total_patients": 120,
            "total_doctors": 14,
            "total_hospitals": 3,
            "recent_appointments": [{
                "id": "a1",
                "patient_name": "Ada Obi",
                "doctor_name": "Dr. Bea Ade",
                "start_time": "2025-03-01T09:00:00Z",
                "status": "CONFIRMED",
                "appointment_type": "VIDEO"
            }],
            "pending_approvals": [
                {"id": "d7", "role": "doctor", "name": "Dr. Chi", "submitted_at": "yesterday"},
                {"id": "h2", "role": "hospital", "name": "St. Mary", "submitted_at": "2025-02-27T10:00:00Z"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_cards() {
        let page = DashboardPage::from_data(data());
        let values: Vec<&str> = page.stat_cards().iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["120", "14", "3", "2"]);
    }

    #[test]
    fn test_tables() {
        let page = DashboardPage::from_data(data());
        let recent = page.recent_appointments_table().unwrap();
        assert_eq!(recent.rows()[0].get("date"), &Value::from("Mar 1, 2025"));

        let pending = page.pending_approvals_table().unwrap();
        assert_eq!(pending.page_rows().len(), 2);
        assert_eq!(pending.rows()[0].get("submitted_at"), &Value::from("yesterday"));
        assert_eq!(pending.rows()[1].get("submitted_at"), &Value::from("Feb 27, 2025"));
    }
}
