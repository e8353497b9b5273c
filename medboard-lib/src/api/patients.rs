use super::CacheClass;
use super::Endpoint;
use super::ListParams;
use super::Tag;
use super::TagKind;
use super::endpoint::segment;
use crate::model::Paginated;
use crate::model::Patient;

/// Patient endpoints.
pub struct Patients;

impl Patients {
    /// `GET patients/`
    pub fn list(params: &ListParams) -> Endpoint<Paginated<Patient>> {
        Endpoint::get("patients/")
            .param_opt("page", params.page)
            .param_opt("search", params.search.as_deref())
            .param_opt("page_size", params.page_size)
            .provides(TagKind::Patients)
            .cache_class(CacheClass::List)
    }

    /// `GET patients/{id}/`
    pub fn get(id: &str) -> Endpoint<Patient> {
        Endpoint::get(format!("patients/{}/", segment(id)))
            .provides(TagKind::Patients)
            .provides(Tag::id(TagKind::Patients, id))
    }
}
