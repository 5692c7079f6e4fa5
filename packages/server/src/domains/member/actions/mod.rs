//! Member domain actions - business logic functions
//!
//! Actions are async functions called directly from GraphQL mutations.
//! Quota helpers also run inside matching transactions.

pub mod delete_account;
pub mod quota;

pub use delete_account::{delete_account, DeleteAccountOutcome};
pub use quota::{redeem_ad_reward, QuotaCost, AD_REWARD_LIKES};
