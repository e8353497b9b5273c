use chrono::DateTime;
use chrono::Utc;
use serde_json::json;

use super::CacheClass;
use super::Endpoint;
use super::Tag;
use super::TagKind;
use super::endpoint::segment;
use crate::model::CalendarEvent;
use crate::model::MeetDetails;
use crate::model::MeetToken;

/// Calendar of meets and appointments.
pub struct Calendar;

impl Calendar {
    /// `GET meet/calendar/?start_datetime=..&end_datetime=..`
    pub fn events(start: DateTime<Utc>, end: DateTime<Utc>) -> Endpoint<Vec<CalendarEvent>> {
        Endpoint::get("meet/calendar/")
            .param("start_datetime", start.to_rfc3339())
            .param("end_datetime", end.to_rfc3339())
            .provides(TagKind::CalendarEvents)
            .cache_class(CacheClass::List)
    }
}

/// Video meet endpoints.
pub struct Meet;

impl Meet {
    /// `GET meet/{id}/`
    pub fn details(id: &str) -> Endpoint<MeetDetails> {
        Endpoint::get(format!("meet/{}/", segment(id)))
            .provides(TagKind::MeetDetails)
            .provides(Tag::id(TagKind::MeetDetails, id))
    }

    /// `POST meet/token/`
    pub fn token(channel_name: &str) -> Endpoint<MeetToken> {
        Endpoint::post("meet/token/", json!({ "channel_name": channel_name }))
    }
}
