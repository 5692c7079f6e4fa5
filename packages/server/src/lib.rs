// Duet - Matching API Core
//
// This crate provides the backend API for the canonical-pair matching engine:
// likes, dislikes, match promotion, quotas, rewinds, termination cascades,
// and post-commit fan-out to live sessions and push notifications.
//
// Architecture follows domain-driven design; every relationship transition
// runs in a single transaction under the pair's advisory lock.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
