use serde_json::json;

use super::AppointmentFilter;
use super::CacheClass;
use super::Endpoint;
use super::ListParams;
use super::Tag;
use super::TagKind;
use super::endpoint::segment;
use crate::model::Appointment;
use crate::model::BookAppointment;
use crate::model::Paginated;

/// Appointment endpoints.
pub struct Appointments;

impl Appointments {
    /// `GET appointments/`
    pub fn list(
        params: &ListParams,
        filter: &AppointmentFilter,
    ) -> Endpoint<Paginated<Appointment>> {
        Endpoint::get("appointments/")
            .param_opt("page", params.page)
            .param_opt("search", params.search.as_deref())
            .param_opt("status", filter.status.as_deref())
            .param_opt("page_size", params.page_size)
            .param_opt("doctor_id", filter.doctor_id.as_deref())
            .param_opt("patient_id", filter.patient_id.as_deref())
            .param_opt("hospital_id", filter.hospital_id.as_deref())
            .provides(TagKind::Appointments)
            .cache_class(CacheClass::List)
    }

    /// `GET appointments/{id}/`
    pub fn get(id: &str) -> Endpoint<Appointment> {
        Endpoint::get(format!("appointments/{}/", segment(id)))
            .provides(TagKind::Appointments)
            .provides(Tag::id(TagKind::Appointments, id))
    }

    /// `POST appointments/`
    pub fn book(request: &BookAppointment) -> Endpoint<Appointment> {
        let mut body = json!({
            "doctor": request.doctor,
            "appointment_type": request.appointment_type,
            "scheduled_start_time": request.scheduled_start_time.to_rfc3339(),
            "scheduled_end_time": request.scheduled_end_time.to_rfc3339(),
            "reason": request.reason,
        });
        if let Some(notes) = &request.notes {
            body["notes"] = json!(notes);
        }
        Endpoint::post("appointments/", body).invalidates(TagKind::Appointments)
    }

    /// `POST appointments/{id}/cancel/`
    pub fn cancel(id: &str, cancellation_reason: &str) -> Endpoint<()> {
        Endpoint::post(
            format!("appointments/{}/cancel/", segment(id)),
            json!({ "cancellation_reason": cancellation_reason }),
        )
        .invalidates(TagKind::Appointments)
    }

    /// `POST appointments/{id}/reschedule/`
    pub fn reschedule(
        id: &str,
        new_start_time: chrono::DateTime<chrono::Utc>,
        new_end_time: chrono::DateTime<chrono::Utc>,
    ) -> Endpoint<Appointment> {
        Endpoint::post(
            format!("appointments/{}/reschedule/", segment(id)),
            json!({
                "new_start_time": new_start_time.to_rfc3339(),
                "new_end_time": new_end_time.to_rfc3339(),
            }),
        )
        .invalidates(TagKind::Appointments)
    }
}
