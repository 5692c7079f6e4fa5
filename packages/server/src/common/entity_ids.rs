//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use duet_core::common::{ChatId, MemberId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let member_id: MemberId = MemberId::new();
//! let chat_id: ChatId = ChatId::new();
//!
//! // This would be a compile error:
//! // let wrong: ChatId = member_id;
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (users).
pub struct Member;

/// Marker type for Like entities (pending likes and mega-likes).
pub struct Like;

/// Marker type for Dislike entities.
pub struct Dislike;

/// Marker type for Match entities (mutual likes).
pub struct Match;

/// Marker type for Chat entities (conversation shells).
pub struct Chat;

/// Marker type for Message entities (chat messages).
pub struct Message;

/// Marker type for BlockedMember entities (directional blocks).
pub struct BlockedMember;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Like entities.
pub type LikeId = Id<Like>;

/// Typed ID for Dislike entities.
pub type DislikeId = Id<Dislike>;

/// Typed ID for Match entities.
pub type MatchId = Id<Match>;

/// Typed ID for Chat entities.
pub type ChatId = Id<Chat>;

/// Typed ID for Message entities.
pub type MessageId = Id<Message>;

/// Typed ID for BlockedMember entities.
pub type BlockId = Id<BlockedMember>;
