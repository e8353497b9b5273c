use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetDetails {
    pub id: String,
    pub channel_name: String,
    #[serde(default)]
    pub created_at: String,
}

/// Short-lived token for joining a meet channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetToken {
    pub token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}
