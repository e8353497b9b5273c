use super::CacheClass;
use super::Endpoint;
use super::TagKind;
use crate::model::AppointmentStats;
use crate::model::DashboardData;
use crate::model::DoctorStats;
use crate::model::HospitalStats;
use crate::model::PatientStats;
use crate::model::Specialty;

/// Dashboard counter endpoints.
pub struct Stats;

impl Stats {
    pub fn patients() -> Endpoint<PatientStats> {
        Endpoint::get("patients/dashboard-stats/")
            .provides(TagKind::PatientStats)
            .cache_class(CacheClass::Stats)
    }

    pub fn doctors() -> Endpoint<DoctorStats> {
        Endpoint::get("doctors/dashboard-stats/")
            .provides(TagKind::DoctorStats)
            .cache_class(CacheClass::Stats)
    }

    pub fn hospitals() -> Endpoint<HospitalStats> {
        Endpoint::get("hospitals/dashboard-stats/")
            .provides(TagKind::HospitalStats)
            .cache_class(CacheClass::Stats)
    }

    pub fn appointments() -> Endpoint<AppointmentStats> {
        Endpoint::get("appointment-stats/dashboard-stats/")
            .provides(TagKind::AppointmentStats)
            .cache_class(CacheClass::Stats)
    }
}

/// Admin dashboard aggregate.
pub struct Dashboard;

impl Dashboard {
    /// `GET dashboards/admin-stats/`
    pub fn admin_stats() -> Endpoint<DashboardData> {
        Endpoint::get("dashboards/admin-stats/")
            .provides(TagKind::Dashboard)
            .cache_class(CacheClass::Stats)
    }
}

/// Medical specialty catalogue.
pub struct Specialties;

impl Specialties {
    /// `GET profiles/specialties/`
    pub fn list() -> Endpoint<Vec<Specialty>> {
        Endpoint::get("profiles/specialties/")
            .provides(TagKind::Specialties)
            .cache_class(CacheClass::List)
    }
}
