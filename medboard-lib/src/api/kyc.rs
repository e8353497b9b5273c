use serde_json::json;

use super::Endpoint;
use super::Tag;
use super::TagKind;
use crate::model::KycRecord;
use crate::model::KycStatus;
use crate::model::KycSubject;
use crate::model::ResultList;

/// KYC record endpoints.
pub struct Kyc;

impl Kyc {
    /// `POST {doctors|hospitals}/kyc-records/create/`
    ///
    /// Besides the KYC history this invalidates the subject's resource and
    /// stats, since the backend updates its `kyc_status` too.
    pub fn create(subject: &KycSubject, status: KycStatus, reason: Option<&str>) -> Endpoint<KycRecord> {
        let (path, field, id, resource, stats) = match subject {
            KycSubject::Doctor(id) => (
                "doctors/kyc-records/create/",
                "doctor",
                id,
                TagKind::Doctors,
                TagKind::DoctorStats,
            ),
            KycSubject::Hospital(id) => (
                "hospitals/kyc-records/create/",
                "hospital",
                id,
                TagKind::Hospitals,
                TagKind::HospitalStats,
            ),
        };

        let mut body = serde_json::Map::new();
        body.insert(field.to_string(), json!(id));
        body.insert("status".to_string(), json!(status.as_str()));
        if let Some(reason) = reason {
            body.insert("reason".to_string(), json!(reason));
        }
        let body = serde_json::Value::Object(body);

        Endpoint::post(path, body)
            .invalidates(TagKind::Kyc)
            .invalidates(Tag::kind(resource))
            .invalidates(stats)
    }

    /// `GET kyc-records/?doctor={id}` or `?hospital={id}`
    pub fn records(subject: &KycSubject) -> Endpoint<ResultList<KycRecord>> {
        let ep = Endpoint::get("kyc-records/");
        let ep = match subject {
            KycSubject::Doctor(id) => ep.param("doctor", id),
            KycSubject::Hospital(id) => ep.param("hospital", id),
        };
        ep.provides(TagKind::Kyc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_doctor_record() {
        let subject = KycSubject::Doctor("d1".into());
        let ep = Kyc::create(&subject, KycStatus::Verified, Some("documents ok"));
        assert_eq!(ep.path(), "doctors/kyc-records/create/");
        assert_eq!(
            ep.json_body(),
            Some(&json!({"doctor": "d1", "status": "VERIFIED", "reason": "documents ok"}))
        );
        assert_eq!(
            ep.invalidated_tags(),
            &[
                Tag::kind(TagKind::Kyc),
                Tag::kind(TagKind::Doctors),
                Tag::kind(TagKind::DoctorStats)
            ]
        );
    }

    #[test]
    fn test_records_query() {
        let ep = Kyc::records(&KycSubject::Hospital("h 1".into()));
        assert_eq!(ep.path_and_query(), "kyc-records/?hospital=h%201");
    }
}
