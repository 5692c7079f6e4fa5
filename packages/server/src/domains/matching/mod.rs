//! Matching domain - likes, dislikes, match promotion, blocks, rewind.
//!
//! Every state transition for a pair runs in one transaction under the
//! pair's advisory lock; fan-out happens after commit via effects.

pub mod actions;
pub mod data;
pub mod effects;
pub mod events;
pub mod models;

// Re-export commonly used types
pub use events::MatchingEvent;
pub use models::like::{Like, LikeKind, MatchOrigin};
pub use models::matches::Match;
