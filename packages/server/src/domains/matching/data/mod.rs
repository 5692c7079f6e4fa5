//! GraphQL data types for the matching domain.

pub mod like;
pub mod matches;
pub mod results;
pub mod track;

pub use like::*;
pub use matches::*;
pub use results::*;
pub use track::*;
