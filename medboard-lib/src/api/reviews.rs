use serde_json::json;

use super::CacheClass;
use super::Endpoint;
use super::TagKind;
use super::endpoint::segment;
use crate::model::HasReviewed;
use crate::model::Paginated;
use crate::model::Review;

/// What a review is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    Doctor,
    Hospital,
}

impl ReviewTarget {
    fn collection(&self) -> &'static str {
        match self {
            ReviewTarget::Doctor => "doctors",
            ReviewTarget::Hospital => "hospitals",
        }
    }

    fn item_collection(&self) -> &'static str {
        match self {
            ReviewTarget::Doctor => "doctor-reviews",
            ReviewTarget::Hospital => "hospital-reviews",
        }
    }

    /// The tag family for reviews of this target.
    pub fn tag(&self) -> TagKind {
        match self {
            ReviewTarget::Doctor => TagKind::DoctorReviews,
            ReviewTarget::Hospital => TagKind::HospitalReviews,
        }
    }
}

/// Review endpoints for doctors and hospitals.
pub struct Reviews;

impl Reviews {
    /// `GET reviews/{doctors|hospitals}/{id}/has-reviewed/`
    pub fn has_reviewed(target: ReviewTarget, id: &str) -> Endpoint<HasReviewed> {
        Endpoint::get(format!(
            "reviews/{}/{}/has-reviewed/",
            target.collection(),
            segment(id)
        ))
    }

    /// `GET reviews/{doctors|hospitals}/{id}/`
    pub fn list(
        target: ReviewTarget,
        id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Endpoint<Paginated<Review>> {
        Endpoint::get(format!("reviews/{}/{}/", target.collection(), segment(id)))
            .param_opt("page", page)
            .param_opt("page_size", page_size)
            .provides(target.tag())
            .cache_class(CacheClass::List)
    }

    /// `POST reviews/{doctors|hospitals}/{id}/`
    pub fn create(target: ReviewTarget, id: &str, rating: u8, text: Option<&str>) -> Endpoint<Review> {
        let mut body = json!({ "rating": rating });
        if let Some(text) = text {
            body["text"] = json!(text);
        }
        Endpoint::post(format!("reviews/{}/{}/", target.collection(), segment(id)), body)
            .invalidates(target.tag())
    }

    /// `PATCH reviews/{doctor|hospital}-reviews/{review_id}/`
    pub fn update(
        target: ReviewTarget,
        review_id: &str,
        rating: Option<u8>,
        text: Option<&str>,
    ) -> Endpoint<Review> {
        let mut body = json!({});
        if let Some(rating) = rating {
            body["rating"] = json!(rating);
        }
        if let Some(text) = text {
            body["text"] = json!(text);
        }
        Endpoint::patch(
            format!("reviews/{}/{}/", target.item_collection(), segment(review_id)),
            body,
        )
        .invalidates(target.tag())
    }

    /// `DELETE reviews/{doctor|hospital}-reviews/{review_id}/`
    pub fn delete(target: ReviewTarget, review_id: &str) -> Endpoint<()> {
        Endpoint::delete(format!(
            "reviews/{}/{}/",
            target.item_collection(),
            segment(review_id)
        ))
        .invalidates(target.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Tag;

    #[test]
    fn test_paths() {
        assert_eq!(
            Reviews::has_reviewed(ReviewTarget::Doctor, "7").path(),
            "reviews/doctors/7/has-reviewed/"
        );
        assert_eq!(
            Reviews::list(ReviewTarget::Hospital, "h2", Some(2), None).path_and_query(),
            "reviews/hospitals/h2/?page=2"
        );
        assert_eq!(
            Reviews::delete(ReviewTarget::Hospital, "r5").path(),
            "reviews/hospital-reviews/r5/"
        );
    }

    #[test]
    fn test_update_sends_only_set_fields() {
        let ep = Reviews::update(ReviewTarget::Doctor, "r1", None, Some("better"));
        assert_eq!(ep.json_body(), Some(&json!({"text": "better"})));
        assert_eq!(ep.invalidated_tags(), &[Tag::kind(TagKind::DoctorReviews)]);
    }
}
