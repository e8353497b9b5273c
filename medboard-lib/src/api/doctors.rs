use super::CacheClass;
use super::DoctorFilter;
use super::Endpoint;
use super::ListParams;
use super::Tag;
use super::TagKind;
use super::endpoint::segment;
use crate::model::Doctor;
use crate::model::Paginated;

/// Doctor endpoints.
pub struct Doctors;

impl Doctors {
    /// `GET doctors/`
    pub fn list(params: &ListParams, filter: &DoctorFilter) -> Endpoint<Paginated<Doctor>> {
        Endpoint::get("doctors/")
            .param_opt("page", params.page)
            .param_opt("search", params.search.as_deref())
            .param_opt("hospital_id", filter.hospital_id.as_deref())
            .param_opt("specialty", filter.specialty.as_deref())
            .param_opt("page_size", params.page_size)
            .provides(TagKind::Doctors)
            .cache_class(CacheClass::List)
    }

    /// `GET doctors/{id}/`
    pub fn get(id: &str) -> Endpoint<Doctor> {
        Endpoint::get(format!("doctors/{}/", segment(id)))
            .provides(TagKind::Doctors)
            .provides(Tag::id(TagKind::Doctors, id))
    }
}
