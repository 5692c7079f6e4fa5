//! Mutation result objects.
//!
//! Business refusals come back as `success: false` plus a stable error
//! code the client can branch on. Storage and internal failures surface
//! as GraphQL field errors instead.

use juniper::GraphQLObject;

use crate::domains::matching::data::matches::MatchData;

// =============================================================================
// Like Result
// =============================================================================

/// Result of submitting a like or mega-like
#[derive(Debug, Clone, GraphQLObject)]
pub struct LikeResult {
    /// Whether the submission was accepted
    pub success: bool,

    /// The match, when this like completed a mutual pair
    pub matched: Option<MatchData>,

    /// Error code (if refused)
    pub error: Option<String>,
}

impl LikeResult {
    pub fn accepted() -> Self {
        Self {
            success: true,
            matched: None,
            error: None,
        }
    }

    pub fn matched(data: MatchData) -> Self {
        Self {
            success: true,
            matched: Some(data),
            error: None,
        }
    }

    pub fn refused(code: &str) -> Self {
        Self {
            success: false,
            matched: None,
            error: Some(code.to_string()),
        }
    }
}

// =============================================================================
// Rewind Result
// =============================================================================

/// Result of rewinding a previous swipe
#[derive(Debug, Clone, GraphQLObject)]
pub struct RewindResult {
    /// Whether the rewind was applied
    pub success: bool,

    /// Whether a mega-like was credited back
    pub refunded_mega_like: bool,

    /// Error code (if refused)
    pub error: Option<String>,
}

impl RewindResult {
    pub fn applied(refunded_mega_like: bool) -> Self {
        Self {
            success: true,
            refunded_mega_like,
            error: None,
        }
    }

    pub fn refused(code: &str) -> Self {
        Self {
            success: false,
            refunded_mega_like: false,
            error: Some(code.to_string()),
        }
    }
}

// =============================================================================
// Ad Reward Result
// =============================================================================

/// Result of redeeming a rewarded ad
#[derive(Debug, Clone, GraphQLObject)]
pub struct AdRewardResult {
    /// Whether the redemption was applied
    pub success: bool,

    /// Remaining likes after the credit
    pub like_count: Option<i32>,

    /// Remaining redemptions after this one
    pub ad_count: Option<i32>,

    /// Error code (if refused)
    pub error: Option<String>,
}

impl AdRewardResult {
    pub fn applied(like_count: i32, ad_count: i32) -> Self {
        Self {
            success: true,
            like_count: Some(like_count),
            ad_count: Some(ad_count),
            error: None,
        }
    }

    pub fn refused(code: &str) -> Self {
        Self {
            success: false,
            like_count: None,
            ad_count: None,
            error: Some(code.to_string()),
        }
    }
}

// =============================================================================
// Generic Action Result
// =============================================================================

/// Result of a mutation with no payload beyond success
#[derive(Debug, Clone, GraphQLObject)]
pub struct ActionResult {
    /// Whether the action was applied
    pub success: bool,

    /// Error code (if refused)
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn refused(code: &str) -> Self {
        Self {
            success: false,
            error: Some(code.to_string()),
        }
    }
}
