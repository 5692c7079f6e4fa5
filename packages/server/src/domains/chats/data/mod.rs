//! GraphQL data types for the chats domain.

pub mod chat;

pub use chat::*;
