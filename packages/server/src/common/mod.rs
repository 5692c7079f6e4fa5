// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod pagination;
pub mod pair;
pub mod utils;

pub use entity_ids::*;
pub use errors::TransitionError;
pub use id::Id;
pub use pagination::{build_page_info, trim_results, Cursor, PageInfo, PaginationArgs};
pub use pair::{MemberPair, PairSide};
