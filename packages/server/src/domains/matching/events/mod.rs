//! Matching domain events.
//!
//! Actions collect these inside their transaction and hand them back to the
//! caller; the GraphQL edge dispatches them through `effects` strictly after
//! commit. An event describes fan-out to attempt, not delivery guaranteed.

use crate::common::{ChatId, MemberId};
use crate::domains::chats::models::chat::Chat;
use crate::domains::matching::models::like::Like;
use crate::domains::matching::models::matches::Match;

/// Matching domain events - facts recorded by a committed transition
#[derive(Debug, Clone)]
pub enum MatchingEvent {
    /// A mutual like was promoted into a match; both members hear about it.
    MatchCreated { match_record: Match, chat: Chat },

    /// A like is pending without reciprocation; only the target hears.
    LikeReceived { like: Like },

    /// A relationship was torn down (end, block, account deletion); the
    /// counterpart's live session should drop the chat.
    RelationshipEnded {
        ended_by: MemberId,
        counterpart: MemberId,
        chat_id: ChatId,
    },
}
