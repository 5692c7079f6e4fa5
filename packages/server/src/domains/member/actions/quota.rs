//! Renewable-quota guard for like submissions.
//!
//! Spending is two-phase: `cost_of_*` + `reserve` give a fast refusal
//! against the already-loaded member before any transaction is opened, and
//! `apply` re-verifies with a conditional decrement inside the submission
//! transaction. The conditional decrement is the authoritative check, so a
//! counter can never go below zero even when two submissions race.

use sqlx::PgConnection;

use crate::common::{MemberId, TransitionError};
use crate::domains::member::models::member::Member;

/// Likes credited per redeemed ad view.
pub const AD_REWARD_LIKES: i32 = 5;

/// What a submission will debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaCost {
    /// Nothing to spend (dislikes, premium plain likes).
    Free,
    /// One like credit.
    Like,
    /// One mega-like credit. Premium does not exempt these.
    MegaLike,
}

/// Cost of a plain like for this member. Premium members like for free.
pub fn cost_of_like(member: &Member) -> QuotaCost {
    if member.is_premium {
        QuotaCost::Free
    } else {
        QuotaCost::Like
    }
}

pub fn cost_of_mega_like(_member: &Member) -> QuotaCost {
    QuotaCost::MegaLike
}

/// Fast pre-transaction availability check against a loaded member.
pub fn reserve(member: &Member, cost: QuotaCost) -> Result<(), TransitionError> {
    match cost {
        QuotaCost::Free => Ok(()),
        QuotaCost::Like => {
            if member.like_count > 0 {
                Ok(())
            } else {
                Err(TransitionError::NotEnoughLike)
            }
        }
        QuotaCost::MegaLike => {
            if member.mega_like_count > 0 {
                Ok(())
            } else {
                Err(TransitionError::NotEnoughMegaLike)
            }
        }
    }
}

/// Debit the reserved cost inside the submission transaction.
///
/// The `WHERE count > 0` guard re-verifies availability atomically; a `None`
/// row here means another submission spent the last credit since `reserve`.
pub async fn apply(
    member_id: MemberId,
    cost: QuotaCost,
    conn: &mut PgConnection,
) -> Result<(), TransitionError> {
    let (sql, refusal) = match cost {
        QuotaCost::Free => return Ok(()),
        QuotaCost::Like => (
            "UPDATE members SET like_count = like_count - 1, updated_at = NOW()
             WHERE id = $1 AND like_count > 0
             RETURNING id",
            TransitionError::NotEnoughLike,
        ),
        QuotaCost::MegaLike => (
            "UPDATE members SET mega_like_count = mega_like_count - 1, updated_at = NOW()
             WHERE id = $1 AND mega_like_count > 0
             RETURNING id",
            TransitionError::NotEnoughMegaLike,
        ),
    };

    let debited: Option<(MemberId,)> = sqlx::query_as(sql)
        .bind(member_id)
        .fetch_optional(conn)
        .await
        .map_err(TransitionError::Storage)?;

    match debited {
        Some(_) => Ok(()),
        None => Err(refusal),
    }
}

/// Credit a mega-like back when a mega-like is rewound.
pub async fn refund_mega_like(
    member_id: MemberId,
    conn: &mut PgConnection,
) -> Result<(), TransitionError> {
    sqlx::query(
        "UPDATE members SET mega_like_count = mega_like_count + 1, updated_at = NOW()
         WHERE id = $1",
    )
    .bind(member_id)
    .execute(conn)
    .await
    .map_err(TransitionError::Storage)?;

    Ok(())
}

/// Convert one ad credit into like credits, atomically.
pub async fn redeem_ad_reward(
    member_id: MemberId,
    pool: &sqlx::PgPool,
) -> Result<Member, TransitionError> {
    let redeemed = sqlx::query_as::<_, Member>(
        "UPDATE members
         SET ad_count = ad_count - 1,
             like_count = like_count + $2,
             updated_at = NOW()
         WHERE id = $1 AND ad_count > 0
         RETURNING *",
    )
    .bind(member_id)
    .bind(AD_REWARD_LIKES)
    .fetch_optional(pool)
    .await
    .map_err(TransitionError::Storage)?;

    match redeemed {
        Some(member) => Ok(member),
        None => {
            // Distinguish an empty counter from an unknown member
            match Member::find_optional(member_id, pool)
                .await
                .map_err(TransitionError::Internal)?
            {
                Some(_) => Err(TransitionError::NotEnoughAd),
                None => Err(TransitionError::InvalidFields("member".to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member_with(like_count: i32, mega_like_count: i32, is_premium: bool) -> Member {
        Member {
            id: MemberId::new(),
            display_name: "Sam".to_string(),
            locale: "en".to_string(),
            push_token: None,
            notifications_enabled: true,
            is_premium,
            like_count,
            mega_like_count,
            ad_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_premium_likes_are_free() {
        let member = member_with(0, 0, true);
        assert_eq!(cost_of_like(&member), QuotaCost::Free);
        assert!(reserve(&member, cost_of_like(&member)).is_ok());
    }

    #[test]
    fn test_free_tier_likes_debit() {
        let member = member_with(1, 0, false);
        assert_eq!(cost_of_like(&member), QuotaCost::Like);
        assert!(reserve(&member, QuotaCost::Like).is_ok());

        let exhausted = member_with(0, 0, false);
        assert!(matches!(
            reserve(&exhausted, QuotaCost::Like),
            Err(TransitionError::NotEnoughLike)
        ));
    }

    #[test]
    fn test_mega_likes_debit_even_for_premium() {
        let member = member_with(0, 0, true);
        assert_eq!(cost_of_mega_like(&member), QuotaCost::MegaLike);
        assert!(matches!(
            reserve(&member, QuotaCost::MegaLike),
            Err(TransitionError::NotEnoughMegaLike)
        ));

        let stocked = member_with(0, 3, true);
        assert!(reserve(&stocked, QuotaCost::MegaLike).is_ok());
    }
}
