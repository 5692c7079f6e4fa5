//! Account deletion. One transaction tears down everything the member
//! touches: matches and their chats and messages, pending likes and
//! dislikes in both directions, block rows in both directions, then the
//! member row itself. Counterparts of live matches each get an end event.

use sqlx::PgPool;
use tracing::info;

use crate::common::{MemberId, TransitionError};
use crate::domains::matching::events::MatchingEvent;
use crate::domains::matching::models::matches::Match;
use crate::domains::member::models::member::Member;

/// Everything fanned out after a deletion commits.
#[derive(Debug, Clone)]
pub struct DeleteAccountOutcome {
    pub deleted: MemberId,
    pub ended_matches: Vec<Match>,
}

impl DeleteAccountOutcome {
    pub fn fanout_events(&self) -> Vec<MatchingEvent> {
        self.ended_matches
            .iter()
            .filter_map(|m| {
                m.counterpart_of(self.deleted)
                    .map(|counterpart| MatchingEvent::RelationshipEnded {
                        ended_by: self.deleted,
                        counterpart,
                        chat_id: m.chat_id,
                    })
            })
            .collect()
    }
}

pub async fn delete_account(
    actor: MemberId,
    pool: &PgPool,
) -> Result<DeleteAccountOutcome, TransitionError> {
    if Member::find_optional(actor, pool)
        .await
        .map_err(TransitionError::Internal)?
        .is_none()
    {
        return Err(TransitionError::InvalidFields("actor".to_string()));
    }

    let mut tx = pool.begin().await.map_err(TransitionError::Storage)?;

    // Snapshot live matches first so counterparts can be notified after commit.
    // The member row goes last; concurrent writers racing this transaction
    // fail their FK check instead of resurrecting state.
    let ended_matches = sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE lower_member_id = $1 OR higher_member_id = $1",
    )
    .bind(actor)
    .fetch_all(&mut *tx)
    .await
    .map_err(TransitionError::Storage)?;

    sqlx::query(
        "DELETE FROM messages
         WHERE chat_id IN (
             SELECT id FROM chats WHERE lower_member_id = $1 OR higher_member_id = $1
         )",
    )
    .bind(actor)
    .execute(&mut *tx)
    .await
    .map_err(TransitionError::Storage)?;

    sqlx::query("DELETE FROM matches WHERE lower_member_id = $1 OR higher_member_id = $1")
        .bind(actor)
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    sqlx::query("DELETE FROM chats WHERE lower_member_id = $1 OR higher_member_id = $1")
        .bind(actor)
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    sqlx::query("DELETE FROM likes WHERE from_member = $1 OR to_member = $1")
        .bind(actor)
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    sqlx::query("DELETE FROM dislikes WHERE from_member = $1 OR to_member = $1")
        .bind(actor)
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    sqlx::query("DELETE FROM blocked_members WHERE from_member = $1 OR to_member = $1")
        .bind(actor)
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(actor)
        .execute(&mut *tx)
        .await
        .map_err(TransitionError::Storage)?;

    tx.commit().await.map_err(TransitionError::Storage)?;

    info!(
        "Deleted account {} ({} matches ended)",
        actor,
        ended_matches.len()
    );

    Ok(DeleteAccountOutcome {
        deleted: actor,
        ended_matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ChatId, MatchId};
    use crate::domains::matching::models::like::{LikeKind, MatchOrigin};

    fn match_between(lower: MemberId, higher: MemberId) -> Match {
        Match {
            id: MatchId::new(),
            lower_member_id: lower,
            higher_member_id: higher,
            chat_id: ChatId::new(),
            lower_like_type: LikeKind::Like,
            higher_like_type: LikeKind::Like,
            lower_match_type: MatchOrigin::Explore,
            higher_match_type: MatchOrigin::Explore,
            lower_track_ref: None,
            higher_track_ref: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn fanout_targets_each_counterpart() {
        let deleted = MemberId::new();
        let a = MemberId::new();
        let b = MemberId::new();

        let first = if deleted.into_uuid() < a.into_uuid() {
            match_between(deleted, a)
        } else {
            match_between(a, deleted)
        };
        let second = if deleted.into_uuid() < b.into_uuid() {
            match_between(deleted, b)
        } else {
            match_between(b, deleted)
        };

        let outcome = DeleteAccountOutcome {
            deleted,
            ended_matches: vec![first, second],
        };

        let events = outcome.fanout_events();
        assert_eq!(events.len(), 2);
        for event in events {
            match event {
                MatchingEvent::RelationshipEnded {
                    ended_by,
                    counterpart,
                    ..
                } => {
                    assert_eq!(ended_by, deleted);
                    assert!(counterpart == a || counterpart == b);
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }
}
