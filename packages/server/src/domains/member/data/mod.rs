//! GraphQL data types for the member domain.

pub mod member;

pub use member::*;
