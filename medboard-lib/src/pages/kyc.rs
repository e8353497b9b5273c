//! KYC status changes

use crate::api::Kyc;
use crate::error::Error;
use crate::model::KycRecord;
use crate::model::KycStatus;
use crate::model::KycSubject;
use crate::store::AppStore;

/// A KYC status change awaiting confirmation.
///
/// # Example
///
/// ```ignore
/// let change = KycChange::new(KycSubject::Doctor(id), KycStatus::Rejected)
///     .reason("License expired");
/// println!("{}", change.prompt());
/// let record = change.confirm(&store).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycChange {
    subject: KycSubject,
    status: KycStatus,
    reason: Option<String>,
}

impl KycChange {
    pub fn new(subject: KycSubject, status: KycStatus) -> Self {
        Self {
            subject,
            status,
            reason: None,
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn subject(&self) -> &KycSubject {
        &self.subject
    }

    pub fn status(&self) -> KycStatus {
        self.status
    }

    /// The trimmed reason, if one was given.
    pub fn reason_text(&self) -> Option<&str> {
        self.reason.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }

    /// The confirmation question shown before applying the change.
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to change the KYC status of {} {} to {}?",
            self.subject.kind(),
            self.subject.id(),
            self.status.as_str().to_lowercase()
        )
    }

    /// Checks that a required reason is present.
    pub fn validate(&self) -> Result<(), Error> {
        if self.status.requires_reason() && self.reason_text().is_none() {
            return Err(Error::KycReasonRequired(self.status));
        }
        Ok(())
    }

    /// Creates the KYC record. The subject's list, detail and stats refetch
    /// on next use.
    pub async fn confirm(&self, store: &AppStore) -> Result<KycRecord, Error> {
        self.validate()?;
        let record = store
            .mutate(&Kyc::create(&self.subject, self.status, self.reason_text()))
            .await?;
        log::info!(
            "{} {} KYC status set to {}",
            self.subject.kind(),
            self.subject.id(),
            self.status
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt() {
        let change = KycChange::new(KycSubject::Hospital("h9".into()), KycStatus::Verified);
        assert_eq!(
            change.prompt(),
            "Are you sure you want to change the KYC status of hospital h9 to verified?"
        );
    }

    #[test]
    fn test_reason_required_for_rejection() {
        let change = KycChange::new(KycSubject::Doctor("d1".into()), KycStatus::Rejected);
        assert!(matches!(
            change.validate(),
            Err(Error::KycReasonRequired(KycStatus::Rejected))
        ));

        let blank = change.clone().reason("   ");
        assert!(blank.validate().is_err());

        let given = change.reason(" expired license ");
        assert!(given.validate().is_ok());
        assert_eq!(given.reason_text(), Some("expired license"));
    }

    #[test]
    fn test_verification_needs_no_reason() {
        let change = KycChange::new(KycSubject::Doctor("d1".into()), KycStatus::Verified);
        assert!(change.validate().is_ok());
        assert_eq!(change.reason_text(), None);
    }
}
