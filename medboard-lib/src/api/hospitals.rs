use super::CacheClass;
use super::Endpoint;
use super::HospitalFilter;
use super::ListParams;
use super::Tag;
use super::TagKind;
use super::endpoint::segment;
use crate::model::Hospital;
use crate::model::Paginated;

/// Hospital endpoints.
pub struct Hospitals;

impl Hospitals {
    /// `GET hospitals/`
    pub fn list(params: &ListParams, filter: &HospitalFilter) -> Endpoint<Paginated<Hospital>> {
        Endpoint::get("hospitals/")
            .param_opt("page", params.page)
            .param_opt("search", params.search.as_deref())
            .param_opt("specialties", filter.specialties.as_deref())
            .param_opt("page_size", params.page_size)
            .provides(TagKind::Hospitals)
            .cache_class(CacheClass::List)
    }

    /// `GET hospitals/{id}/`
    pub fn get(id: &str) -> Endpoint<Hospital> {
        Endpoint::get(format!("hospitals/{}/", segment(id)))
            .provides(TagKind::Hospitals)
            .provides(Tag::id(TagKind::Hospitals, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_specialties_filter() {
        let filter = HospitalFilter {
            specialties: Some("Cardiology,Oncology".into()),
        };
        let ep = Hospitals::list(&ListParams::new().search("st"), &filter);
        assert_eq!(
            ep.path_and_query(),
            "hospitals/?search=st&specialties=Cardiology%2COncology"
        );
    }
}
