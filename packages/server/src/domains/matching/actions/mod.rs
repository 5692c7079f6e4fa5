pub mod rewind;
pub mod submit;
pub mod terminate;

pub use rewind::{rewind, RewindOutcome};
pub use submit::{submit_action, SubmitKind, SubmitOutcome};
pub use terminate::{
    block_member, end_match, unblock_member, BlockOutcome, TerminationOutcome,
};
