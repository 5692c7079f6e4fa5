pub mod block;
pub mod dislike;
pub mod like;
pub mod matches;

pub use block::BlockedMember;
pub use dislike::Dislike;
pub use like::{Like, LikeKind, MatchOrigin};
pub use matches::Match;
