use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGrowth {
    pub month: String,
    #[serde(default)]
    pub patients: u64,
    #[serde(default)]
    pub doctors: u64,
    #[serde(default)]
    pub hospitals: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDistribution {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentAppointment {
    pub id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub appointment_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub submitted_at: String,
}

/// Payload of `dashboards/admin-stats/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub total_patients: u64,
    #[serde(default)]
    pub total_doctors: u64,
    #[serde(default)]
    pub total_hospitals: u64,
    #[serde(default)]
    pub recent_appointments: Vec<RecentAppointment>,
    #[serde(default)]
    pub pending_approvals: Vec<PendingApproval>,
    #[serde(default)]
    pub monthly_growth: Vec<MonthlyGrowth>,
    #[serde(default)]
    pub appointment_distribution: Vec<AppointmentDistribution>,
}
