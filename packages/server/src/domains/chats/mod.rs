//! Chats domain - conversations opened by matches.
//!
//! Chat rows are created and destroyed by the matching domain; this
//! domain owns reading them back for the inbox.

pub mod data;
pub mod models;

pub use data::ChatData;
pub use models::chat::Chat;
