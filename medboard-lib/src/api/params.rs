//! Query parameters shared by list endpoints

/// Paging and free-text search for list endpoints.
///
/// Unset and empty values are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Extra filters for the doctor list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub hospital_id: Option<String>,
    pub specialty: Option<String>,
}

/// Extra filters for the hospital list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalFilter {
    /// Comma separated specialty names.
    pub specialties: Option<String>,
}

/// Extra filters for the appointment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: Option<String>,
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
    pub hospital_id: Option<String>,
}
