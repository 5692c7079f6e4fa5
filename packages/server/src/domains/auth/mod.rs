//! Auth domain - bearer-token identity for members.
//!
//! Responsibilities:
//! - JWT token creation and verification

pub mod jwt;

pub use jwt::{Claims, JwtService};
