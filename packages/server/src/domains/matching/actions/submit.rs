//! Reaction submission and match promotion.
//!
//! One entry point handles likes, mega-likes, and dislikes. The write path
//! runs in a single transaction serialized per canonical pair with a
//! transaction-scoped advisory lock, so the two directions of a pair can
//! never interleave: a mutual like promotes on exactly one side, and the
//! losing side sees the match and no-ops.
//!
//! Promotion consumes the reciprocal like row. A like that still exists is
//! therefore always unanswered, and a matched pair holds no like residue.

use sqlx::PgPool;
use tracing::info;

use crate::common::{
    ChatId, DislikeId, LikeId, MatchId, MemberId, MemberPair, PairSide, TransitionError,
};
use crate::domains::chats::models::chat::Chat;
use crate::domains::matching::events::MatchingEvent;
use crate::domains::matching::models::block::BlockedMember;
use crate::domains::matching::models::dislike::Dislike;
use crate::domains::matching::models::like::{Like, LikeKind, MatchOrigin};
use crate::domains::matching::models::matches::Match;
use crate::domains::member::actions::quota::{self, QuotaCost};
use crate::domains::member::models::member::Member;

/// What the actor submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Like,
    MegaLike,
    Dislike,
}

impl SubmitKind {
    fn as_like_kind(self) -> Option<LikeKind> {
        match self {
            SubmitKind::Like => Some(LikeKind::Like),
            SubmitKind::MegaLike => Some(LikeKind::MegaLike),
            SubmitKind::Dislike => None,
        }
    }
}

/// Result of a submission.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Precondition hit: the actor already reacted, the pair is matched, or
    /// a block stands. Nothing was written.
    Ignored,
    /// A dislike was recorded.
    Disliked(Dislike),
    /// The like was stored and waits on the other side.
    Pending(Like),
    /// Reciprocal likes were promoted into a match with its chat.
    Matched { match_record: Match, chat: Chat },
}

impl SubmitOutcome {
    /// Fan-out the caller should dispatch after commit.
    pub fn fanout_events(&self) -> Vec<MatchingEvent> {
        match self {
            SubmitOutcome::Ignored | SubmitOutcome::Disliked(_) => Vec::new(),
            SubmitOutcome::Pending(like) => vec![MatchingEvent::LikeReceived { like: like.clone() }],
            SubmitOutcome::Matched { match_record, chat } => vec![MatchingEvent::MatchCreated {
                match_record: match_record.clone(),
                chat: chat.clone(),
            }],
        }
    }
}

/// Submit a reaction from `actor` toward `target`.
pub async fn submit_action(
    actor: MemberId,
    target: MemberId,
    kind: SubmitKind,
    origin: MatchOrigin,
    track_ref: Option<String>,
    pool: &PgPool,
) -> Result<SubmitOutcome, TransitionError> {
    let pair = MemberPair::new(actor, target).ok_or(TransitionError::SameUser)?;

    // Validation, cheapest first
    if let Some(track) = &track_ref {
        if track.is_empty() {
            return Err(TransitionError::InvalidFields("trackRef".to_string()));
        }
    }
    if kind != SubmitKind::Dislike && origin == MatchOrigin::Live && track_ref.is_none() {
        // Live-session reactions always carry the track that was playing
        return Err(TransitionError::InvalidFields("trackRef".to_string()));
    }

    let actor_member = Member::find_optional(actor, pool)
        .await
        .map_err(TransitionError::Internal)?
        .ok_or_else(|| TransitionError::InvalidFields("actor".to_string()))?;
    if Member::find_optional(target, pool)
        .await
        .map_err(TransitionError::Internal)?
        .is_none()
    {
        return Err(TransitionError::InvalidFields("target".to_string()));
    }

    // Idempotent precondition check: an earlier reaction, an existing match,
    // or a block in either direction all make this submission a no-op.
    if Like::find_between(actor, target, pool)
        .await
        .map_err(TransitionError::Internal)?
        .is_some()
        || Dislike::find_between(actor, target, pool)
            .await
            .map_err(TransitionError::Internal)?
            .is_some()
        || Match::find_for_pair(&pair, pool)
            .await
            .map_err(TransitionError::Internal)?
            .is_some()
        || BlockedMember::any_between(actor, target, pool)
            .await
            .map_err(TransitionError::Internal)?
    {
        return Ok(SubmitOutcome::Ignored);
    }

    // Fast quota refusal before opening a transaction
    let cost = match kind {
        SubmitKind::Like => quota::cost_of_like(&actor_member),
        SubmitKind::MegaLike => quota::cost_of_mega_like(&actor_member),
        SubmitKind::Dislike => QuotaCost::Free,
    };
    quota::reserve(&actor_member, cost)?;

    let mut tx = pool.begin().await.map_err(TransitionError::Storage)?;

    // Serialize both directions of this pair
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(pair.lock_key())
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    // The pre-transaction checks raced; terminal states must be re-read
    // under the lock before anything is written.
    let matched: Option<Match> = sqlx::query_as(
        "SELECT * FROM matches WHERE lower_member_id = $1 AND higher_member_id = $2",
    )
    .bind(pair.lower())
    .bind(pair.higher())
    .fetch_optional(&mut *tx)
    .await
    .map_err(TransitionError::Storage)?;
    if matched.is_some() {
        return Ok(SubmitOutcome::Ignored);
    }

    let blocked: (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT 1 FROM blocked_members
            WHERE (from_member = $1 AND to_member = $2)
               OR (from_member = $2 AND to_member = $1)
         )",
    )
    .bind(actor)
    .bind(target)
    .fetch_one(&mut *tx)
    .await
    .map_err(TransitionError::Storage)?;
    if blocked.0 {
        return Ok(SubmitOutcome::Ignored);
    }

    let like_kind = match kind.as_like_kind() {
        None => {
            // Dislike: plain insert, conflict means a concurrent duplicate
            let dislike: Option<Dislike> = sqlx::query_as(
                "INSERT INTO dislikes (id, from_member, to_member)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (from_member, to_member) DO NOTHING
                 RETURNING *",
            )
            .bind(DislikeId::new())
            .bind(actor)
            .bind(target)
            .fetch_optional(&mut *tx)
            .await
            .map_err(TransitionError::Storage)?;

            return match dislike {
                Some(dislike) => {
                    tx.commit().await.map_err(TransitionError::Storage)?;
                    Ok(SubmitOutcome::Disliked(dislike))
                }
                None => Ok(SubmitOutcome::Ignored),
            };
        }
        Some(like_kind) => like_kind,
    };

    // Consume the reciprocal like if one is pending; deletion and promotion
    // commit or roll back together.
    let reciprocal: Option<Like> = sqlx::query_as(
        "DELETE FROM likes WHERE from_member = $1 AND to_member = $2 RETURNING *",
    )
    .bind(target)
    .bind(actor)
    .fetch_optional(&mut *tx)
    .await
    .map_err(TransitionError::Storage)?;

    match reciprocal {
        Some(their_like) => {
            quota::apply(actor, cost, &mut *tx).await?;

            let is_mega_like =
                like_kind == LikeKind::MegaLike || their_like.like_type == LikeKind::MegaLike;
            let chat: Chat = sqlx::query_as(
                "INSERT INTO chats (id, lower_member_id, higher_member_id, is_mega_like)
                 VALUES ($1, $2, $3, $4)
                 RETURNING *",
            )
            .bind(ChatId::new())
            .bind(pair.lower())
            .bind(pair.higher())
            .bind(is_mega_like)
            .fetch_one(&mut *tx)
            .await
            .map_err(TransitionError::Storage)?;

            // Route each side's attribution into its canonical slot
            let (lower_side, higher_side) = match pair.side_of(actor) {
                Some(PairSide::Lower) => (
                    (like_kind, origin, track_ref.clone()),
                    (their_like.like_type, their_like.match_type, their_like.track_ref.clone()),
                ),
                _ => (
                    (their_like.like_type, their_like.match_type, their_like.track_ref.clone()),
                    (like_kind, origin, track_ref.clone()),
                ),
            };

            let match_record: Match = sqlx::query_as(
                "INSERT INTO matches (
                    id, lower_member_id, higher_member_id, chat_id,
                    lower_like_type, higher_like_type,
                    lower_match_type, higher_match_type,
                    lower_track_ref, higher_track_ref
                 )
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                 RETURNING *",
            )
            .bind(MatchId::new())
            .bind(pair.lower())
            .bind(pair.higher())
            .bind(chat.id)
            .bind(lower_side.0)
            .bind(higher_side.0)
            .bind(lower_side.1)
            .bind(higher_side.1)
            .bind(&lower_side.2)
            .bind(&higher_side.2)
            .fetch_one(&mut *tx)
            .await
            .map_err(TransitionError::Storage)?;

            tx.commit().await.map_err(TransitionError::Storage)?;

            info!(
                "Promoted mutual like into match {} (chat {})",
                match_record.id, chat.id
            );

            Ok(SubmitOutcome::Matched { match_record, chat })
        }
        None => {
            let like: Option<Like> = sqlx::query_as(
                "INSERT INTO likes (id, from_member, to_member, like_type, match_type, track_ref)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT (from_member, to_member) DO NOTHING
                 RETURNING *",
            )
            .bind(LikeId::new())
            .bind(actor)
            .bind(target)
            .bind(like_kind)
            .bind(origin)
            .bind(&track_ref)
            .fetch_optional(&mut *tx)
            .await
            .map_err(TransitionError::Storage)?;

            match like {
                Some(like) => {
                    quota::apply(actor, cost, &mut *tx).await?;
                    tx.commit().await.map_err(TransitionError::Storage)?;
                    Ok(SubmitOutcome::Pending(like))
                }
                None => Ok(SubmitOutcome::Ignored),
            }
        }
    }
}
