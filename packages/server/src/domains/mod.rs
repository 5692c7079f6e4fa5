// Business domains
pub mod auth;
pub mod chats;
pub mod matching;
pub mod member;
