//! KYC statuses and records

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Verification status of a patient, doctor or hospital.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
    Suspended,
}

impl KycStatus {
    pub const ALL: [KycStatus; 4] = [
        KycStatus::Pending,
        KycStatus::Verified,
        KycStatus::Rejected,
        KycStatus::Suspended,
    ];

    /// The wire form, e.g. `"VERIFIED"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "PENDING",
            KycStatus::Verified => "VERIFIED",
            KycStatus::Rejected => "REJECTED",
            KycStatus::Suspended => "SUSPENDED",
        }
    }

    /// Rejections and suspensions must state a reason.
    pub fn requires_reason(&self) -> bool {
        matches!(self, KycStatus::Rejected | KycStatus::Suspended)
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KycStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KycStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown KYC status '{}', expected one of: pending, verified, rejected, suspended",
                    s
                )
            })
    }
}

/// One entry of a doctor's or hospital's KYC history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycRecord {
    pub id: String,
    pub status: KycStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// The subject of a KYC record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KycSubject {
    Doctor(String),
    Hospital(String),
}

impl KycSubject {
    pub fn id(&self) -> &str {
        match self {
            KycSubject::Doctor(id) | KycSubject::Hospital(id) => id,
        }
    }

    /// `"doctor"` or `"hospital"`.
    pub fn kind(&self) -> &'static str {
        match self {
            KycSubject::Doctor(_) => "doctor",
            KycSubject::Hospital(_) => "hospital",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&KycStatus::Verified).unwrap(), "\"VERIFIED\"");
        let status: KycStatus = serde_json::from_str("\"SUSPENDED\"").unwrap();
        assert_eq!(status, KycStatus::Suspended);
    }

    #[test]
    fn test_status_parse_ignores_case() {
        assert_eq!("rejected".parse::<KycStatus>(), Ok(KycStatus::Rejected));
        assert!("approved".parse::<KycStatus>().is_err());
    }

    #[test]
    fn test_requires_reason() {
        assert!(KycStatus::Rejected.requires_reason());
        assert!(KycStatus::Suspended.requires_reason());
        assert!(!KycStatus::Verified.requires_reason());
        assert!(!KycStatus::Pending.requires_reason());
    }
}
