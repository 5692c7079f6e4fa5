//! Rewind: a premium member takes back a pending reaction.
//!
//! Only reaches records still waiting on the other side. Once a pair is
//! matched the submission was consumed, so there is nothing to take back
//! and the caller gets `ALREADY_MATCH`. Mega-likes are the only refunded
//! kind; plain likes renew on schedule and ad-credited likes are
//! indistinguishable once granted.

use sqlx::PgPool;

use crate::common::{MemberId, MemberPair, TransitionError};
use crate::domains::matching::actions::submit::SubmitKind;
use crate::domains::matching::models::like::LikeKind;
use crate::domains::member::actions::quota;
use crate::domains::member::models::member::Member;

/// Result of a rewind.
#[derive(Debug, Clone)]
pub struct RewindOutcome {
    pub kind: SubmitKind,
    pub refunded_mega_like: bool,
}

/// Take back the pending `kind` reaction from `actor` toward `target`.
pub async fn rewind(
    actor: MemberId,
    target: MemberId,
    kind: SubmitKind,
    pool: &PgPool,
) -> Result<RewindOutcome, TransitionError> {
    let pair = MemberPair::new(actor, target).ok_or(TransitionError::SameUser)?;

    let actor_member = Member::find_optional(actor, pool)
        .await
        .map_err(TransitionError::Internal)?
        .ok_or_else(|| TransitionError::InvalidFields("actor".to_string()))?;
    if !actor_member.is_premium {
        return Err(TransitionError::NoPermission);
    }
    if Member::find_optional(target, pool)
        .await
        .map_err(TransitionError::Internal)?
        .is_none()
    {
        return Err(TransitionError::InvalidFields("target".to_string()));
    }

    let mut tx = pool.begin().await.map_err(TransitionError::Storage)?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(pair.lock_key())
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    // A promotion may have landed since the client rendered its undo button
    let matched: Option<(MemberId,)> = sqlx::query_as(
        "SELECT lower_member_id FROM matches
         WHERE lower_member_id = $1 AND higher_member_id = $2",
    )
    .bind(pair.lower())
    .bind(pair.higher())
    .fetch_optional(&mut *tx)
    .await
    .map_err(TransitionError::Storage)?;
    if matched.is_some() {
        return Err(TransitionError::AlreadyMatch);
    }

    let refunded_mega_like = match kind {
        SubmitKind::Like | SubmitKind::MegaLike => {
            let like_kind = if kind == SubmitKind::MegaLike {
                LikeKind::MegaLike
            } else {
                LikeKind::Like
            };
            let removed: Option<(MemberId,)> = sqlx::query_as(
                "DELETE FROM likes
                 WHERE from_member = $1 AND to_member = $2 AND like_type = $3
                 RETURNING from_member",
            )
            .bind(actor)
            .bind(target)
            .bind(like_kind)
            .fetch_optional(&mut *tx)
            .await
            .map_err(TransitionError::Storage)?;

            if removed.is_none() {
                return Err(match kind {
                    SubmitKind::MegaLike => TransitionError::NotFoundMegaLike,
                    _ => TransitionError::NotFoundLike,
                });
            }

            if kind == SubmitKind::MegaLike {
                quota::refund_mega_like(actor, &mut *tx).await?;
                true
            } else {
                false
            }
        }
        SubmitKind::Dislike => {
            let removed: Option<(MemberId,)> = sqlx::query_as(
                "DELETE FROM dislikes
                 WHERE from_member = $1 AND to_member = $2
                 RETURNING from_member",
            )
            .bind(actor)
            .bind(target)
            .fetch_optional(&mut *tx)
            .await
            .map_err(TransitionError::Storage)?;

            if removed.is_none() {
                return Err(TransitionError::NotFoundDislike);
            }
            false
        }
    };

    tx.commit().await.map_err(TransitionError::Storage)?;

    Ok(RewindOutcome {
        kind,
        refunded_mega_like,
    })
}
