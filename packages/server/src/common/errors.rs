//! Typed errors for relationship transitions.
//!
//! Business refusals carry a stable wire code that mutation payloads expose
//! verbatim; clients branch on the code, so the strings here are contract.
//! Storage and internal failures carry no code and surface as generic
//! GraphQL errors instead of result objects.

use thiserror::Error;

/// Errors a relationship transition can refuse or fail with.
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("Invalid fields: {0}")]
    InvalidFields(String),

    #[error("Cannot target yourself")]
    SameUser,

    #[error("No like credit available")]
    NotEnoughLike,

    #[error("No mega-like credit available")]
    NotEnoughMegaLike,

    #[error("No ad credit available")]
    NotEnoughAd,

    #[error("Operation requires premium")]
    NoPermission,

    #[error("Pair already matched")]
    AlreadyMatch,

    #[error("No like to rewind")]
    NotFoundLike,

    #[error("No mega-like to rewind")]
    NotFoundMegaLike,

    #[error("No dislike to rewind")]
    NotFoundDislike,

    #[error("No match between these members")]
    NotFoundMatch,

    #[error("No block against this member")]
    NotFoundBlockUser,

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl TransitionError {
    /// Stable wire code for business refusals, `None` for infrastructure
    /// failures.
    pub fn refusal_code(&self) -> Option<&'static str> {
        match self {
            TransitionError::InvalidFields(_) => Some("INVALID_FIELDS"),
            TransitionError::SameUser => Some("SAME_USER"),
            TransitionError::NotEnoughLike => Some("NOT_ENOUGH_LIKE"),
            TransitionError::NotEnoughMegaLike => Some("NOT_ENOUGH_MEGALIKE"),
            TransitionError::NotEnoughAd => Some("NOT_ENOUGH_AD"),
            TransitionError::NoPermission => Some("NO_PERMISSION"),
            TransitionError::AlreadyMatch => Some("ALREADY_MATCH"),
            TransitionError::NotFoundLike => Some("NOT_FOUND_LIKE"),
            TransitionError::NotFoundMegaLike => Some("NOT_FOUND_MEGALIKE"),
            TransitionError::NotFoundDislike => Some("NOT_FOUND_DISLIKE"),
            TransitionError::NotFoundMatch => Some("NOT_FOUND_MATCH"),
            TransitionError::NotFoundBlockUser => Some("NOT_FOUND_BLOCK_USER"),
            TransitionError::Storage(_) | TransitionError::Internal(_) => None,
        }
    }

    /// Whether this is a business refusal (expected, not logged as failure).
    pub fn is_refusal(&self) -> bool {
        self.refusal_code().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_codes_are_stable() {
        assert_eq!(
            TransitionError::SameUser.refusal_code(),
            Some("SAME_USER")
        );
        assert_eq!(
            TransitionError::NotEnoughMegaLike.refusal_code(),
            Some("NOT_ENOUGH_MEGALIKE")
        );
        assert_eq!(
            TransitionError::NotFoundBlockUser.refusal_code(),
            Some("NOT_FOUND_BLOCK_USER")
        );
    }

    #[test]
    fn test_storage_errors_have_no_code() {
        let err = TransitionError::Storage(sqlx::Error::RowNotFound);
        assert_eq!(err.refusal_code(), None);
        assert!(!err.is_refusal());
    }
}
