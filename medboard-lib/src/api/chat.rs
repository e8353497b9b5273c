use serde_json::json;

use super::CacheClass;
use super::Endpoint;
use super::Tag;
use super::TagKind;
use super::endpoint::segment;
use crate::model::ChatRoom;
use crate::model::ChatUser;
use crate::model::Message;
use crate::model::Paginated;

/// Chat endpoints.
///
/// Room and message lists accumulate: page 1 replaces the cached list and
/// later pages append to it, under one cache entry for the room list and
/// one per room for messages.
pub struct Chat;

impl Chat {
    /// `GET chat/rooms/?page={page}`
    pub fn rooms(page: u32) -> Endpoint<Paginated<ChatRoom>> {
        let page = page.max(1);
        Endpoint::get("chat/rooms/")
            .param("page", page)
            .provides(TagKind::ChatRooms)
            .cache_class(CacheClass::List)
            .cache_key_override("chat:rooms")
            .merge_pages(page)
    }

    /// `GET chat/rooms/{id}/`
    pub fn room(id: &str) -> Endpoint<ChatRoom> {
        Endpoint::get(format!("chat/rooms/{}/", segment(id))).provides(Tag::id(TagKind::ChatRooms, id))
    }

    /// `POST chat/rooms/get_or_create_dm/`
    pub fn get_or_create_dm(user_id: &str) -> Endpoint<ChatRoom> {
        Endpoint::post("chat/rooms/get_or_create_dm/", json!({ "user_id": user_id }))
            .invalidates(TagKind::ChatRooms)
    }

    /// `GET chat/messages/?room_id={room}&page={page}`
    pub fn messages(room_id: &str, page: u32) -> Endpoint<Paginated<Message>> {
        let page = page.max(1);
        Endpoint::get("chat/messages/")
            .param("room_id", room_id)
            .param("page", page)
            .provides(Tag::id(TagKind::Messages, room_id))
            .cache_class(CacheClass::List)
            .cache_key_override(format!("chat:messages:{}", room_id))
            .merge_pages(page)
    }

    /// `POST chat/messages/`
    pub fn send_message(room: &str, content: &str, reply_to_id: Option<&str>) -> Endpoint<Message> {
        let mut body = json!({ "room": room, "content": content });
        if let Some(reply_to_id) = reply_to_id {
            body["reply_to_id"] = json!(reply_to_id);
        }
        Endpoint::post("chat/messages/", body).invalidates(Tag::id(TagKind::Messages, room))
    }

    /// `GET users/?search=..&online=..`
    pub fn search_users(search: Option<&str>, online: Option<bool>) -> Endpoint<Vec<ChatUser>> {
        Endpoint::get("users/")
            .param_opt("search", search)
            .param_opt("online", online)
            .cache_class(CacheClass::List)
    }
}
