//! Member domain - profiles, quotas, account lifecycle.

pub mod actions;
pub mod data;
pub mod loader;
pub mod models;

// Re-export commonly used types
pub use data::MemberData;
pub use loader::MemberLoader;
pub use models::member::Member;
