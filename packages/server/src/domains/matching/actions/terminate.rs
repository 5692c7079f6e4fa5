//! Relationship termination: ending a match, blocking, unblocking.
//!
//! Ending and blocking share one cascade: messages, then the match, then
//! the chat, all in the caller's transaction under the pair lock. Pending
//! likes and dislikes survive a plain end (either member may like again
//! later); a block freezes the pair instead.

use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::common::{BlockId, ChatId, MemberId, MemberPair, TransitionError};
use crate::domains::matching::events::MatchingEvent;
use crate::domains::matching::models::matches::Match;
use crate::domains::member::models::member::Member;

/// A relationship that was torn down.
#[derive(Debug, Clone)]
pub struct TerminationOutcome {
    pub ended_by: MemberId,
    pub counterpart: MemberId,
    pub chat_id: ChatId,
}

impl TerminationOutcome {
    pub fn fanout_events(&self) -> Vec<MatchingEvent> {
        vec![MatchingEvent::RelationshipEnded {
            ended_by: self.ended_by,
            counterpart: self.counterpart,
            chat_id: self.chat_id,
        }]
    }
}

/// Result of a block; `termination` is set when a live match was cascaded.
#[derive(Debug, Clone)]
pub struct BlockOutcome {
    pub termination: Option<TerminationOutcome>,
}

impl BlockOutcome {
    pub fn fanout_events(&self) -> Vec<MatchingEvent> {
        self.termination
            .as_ref()
            .map(TerminationOutcome::fanout_events)
            .unwrap_or_default()
    }
}

/// Delete a relationship's rows: messages, match, chat, in FK order.
async fn delete_relationship(
    match_record: &Match,
    conn: &mut PgConnection,
) -> Result<(), TransitionError> {
    sqlx::query("DELETE FROM messages WHERE chat_id = $1")
        .bind(match_record.chat_id)
        .execute(&mut *conn)
        .await
        .map_err(TransitionError::Storage)?;
    sqlx::query("DELETE FROM matches WHERE id = $1")
        .bind(match_record.id)
        .execute(&mut *conn)
        .await
        .map_err(TransitionError::Storage)?;
    sqlx::query("DELETE FROM chats WHERE id = $1")
        .bind(match_record.chat_id)
        .execute(&mut *conn)
        .await
        .map_err(TransitionError::Storage)?;
    Ok(())
}

async fn find_match_locked(
    pair: &MemberPair,
    conn: &mut PgConnection,
) -> Result<Option<Match>, TransitionError> {
    sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE lower_member_id = $1 AND higher_member_id = $2",
    )
    .bind(pair.lower())
    .bind(pair.higher())
    .fetch_optional(conn)
    .await
    .map_err(TransitionError::Storage)
}

async fn require_target(target: MemberId, pool: &PgPool) -> Result<(), TransitionError> {
    match Member::find_optional(target, pool)
        .await
        .map_err(TransitionError::Internal)?
    {
        Some(_) => Ok(()),
        None => Err(TransitionError::InvalidFields("target".to_string())),
    }
}

/// End the match between `actor` and `target`.
pub async fn end_match(
    actor: MemberId,
    target: MemberId,
    pool: &PgPool,
) -> Result<TerminationOutcome, TransitionError> {
    let pair = MemberPair::new(actor, target).ok_or(TransitionError::SameUser)?;
    require_target(target, pool).await?;

    let mut tx = pool.begin().await.map_err(TransitionError::Storage)?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(pair.lock_key())
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    let match_record = find_match_locked(&pair, &mut tx)
        .await?
        .ok_or(TransitionError::NotFoundMatch)?;

    delete_relationship(&match_record, &mut tx).await?;

    tx.commit().await.map_err(TransitionError::Storage)?;

    info!("Ended match {} (chat {})", match_record.id, match_record.chat_id);

    Ok(TerminationOutcome {
        ended_by: actor,
        counterpart: target,
        chat_id: match_record.chat_id,
    })
}

/// Block `target`. Cascades like `end_match` when a match exists; the pair
/// stays frozen until the block is lifted.
pub async fn block_member(
    actor: MemberId,
    target: MemberId,
    pool: &PgPool,
) -> Result<BlockOutcome, TransitionError> {
    let pair = MemberPair::new(actor, target).ok_or(TransitionError::SameUser)?;
    require_target(target, pool).await?;

    let mut tx = pool.begin().await.map_err(TransitionError::Storage)?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(pair.lock_key())
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    // Blocking twice is a quiet success
    sqlx::query(
        "INSERT INTO blocked_members (id, from_member, to_member)
         VALUES ($1, $2, $3)
         ON CONFLICT (from_member, to_member) DO NOTHING",
    )
    .bind(BlockId::new())
    .bind(actor)
    .bind(target)
    .execute(&mut *tx)
    .await
    .map_err(TransitionError::Storage)?;

    let termination = match find_match_locked(&pair, &mut tx).await? {
        Some(match_record) => {
            delete_relationship(&match_record, &mut tx).await?;
            info!(
                "Block cascaded match {} (chat {})",
                match_record.id, match_record.chat_id
            );
            Some(TerminationOutcome {
                ended_by: actor,
                counterpart: target,
                chat_id: match_record.chat_id,
            })
        }
        None => None,
    };

    tx.commit().await.map_err(TransitionError::Storage)?;

    Ok(BlockOutcome { termination })
}

/// Lift the block `actor` holds against `target`. Restores nothing.
pub async fn unblock_member(
    actor: MemberId,
    target: MemberId,
    pool: &PgPool,
) -> Result<(), TransitionError> {
    if actor == target {
        return Err(TransitionError::SameUser);
    }
    require_target(target, pool).await?;

    let removed: Option<(BlockId,)> = sqlx::query_as(
        "DELETE FROM blocked_members
         WHERE from_member = $1 AND to_member = $2
         RETURNING id",
    )
    .bind(actor)
    .bind(target)
    .fetch_optional(pool)
    .await
    .map_err(TransitionError::Storage)?;

    match removed {
        Some(_) => Ok(()),
        None => Err(TransitionError::NotFoundBlockUser),
    }
}
