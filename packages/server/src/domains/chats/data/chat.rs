//! GraphQL data types for chats.

use serde::{Deserialize, Serialize};

use crate::common::MemberId;
use crate::domains::chats::models::chat::Chat;
use crate::domains::member::data::MemberData;

/// GraphQL-friendly representation of a chat, oriented to the viewer
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
#[graphql(description = "A chat opened by a match")]
pub struct ChatData {
    /// Unique identifier
    pub id: String,

    /// The other member in the chat
    pub counterpart: MemberData,

    /// Whether either side's like was a mega-like
    pub is_mega_like: bool,

    /// Whether the viewer has unread activity
    pub unread: bool,

    /// Preview of the most recent message, if any
    pub last_message: Option<String>,

    /// When the most recent message arrived (ISO 8601)
    pub last_message_at: Option<String>,

    /// When the chat was opened (ISO 8601)
    pub created_at: String,
}

impl ChatData {
    /// Assemble from the row plus the resolver-fetched counterpart.
    pub fn for_viewer(chat: &Chat, viewer: MemberId, counterpart: MemberData) -> Self {
        let unread = !chat.read_flag_for(viewer).unwrap_or(true);
        Self {
            id: chat.id.to_string(),
            counterpart,
            is_mega_like: chat.is_mega_like,
            unread,
            last_message: chat.last_message.clone(),
            last_message_at: chat.last_message_at.map(|dt| dt.to_rfc3339()),
            created_at: chat.created_at.to_rfc3339(),
        }
    }
}
