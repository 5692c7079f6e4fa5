use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ChatId, MatchId, MemberId, MemberPair, PairSide};
use crate::domains::matching::models::like::{LikeKind, MatchOrigin};

/// Match model - a mutual like, stored once under the canonical pair.
///
/// Each side keeps its own attribution: what kind of like it sent, from
/// which surface, and the track playing at the time. The chat is created in
/// the same transaction and lives exactly as long as the match.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: MatchId,
    pub lower_member_id: MemberId,
    pub higher_member_id: MemberId,
    pub chat_id: ChatId,
    pub lower_like_type: LikeKind,
    pub higher_like_type: LikeKind,
    pub lower_match_type: MatchOrigin,
    pub higher_match_type: MatchOrigin,
    pub lower_track_ref: Option<String>,
    pub higher_track_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Find the match for a canonical pair
    pub async fn find_for_pair(pair: &MemberPair, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM matches WHERE lower_member_id = $1 AND higher_member_id = $2",
        )
        .bind(pair.lower())
        .bind(pair.higher())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// All matches a member is part of, newest first
    pub async fn find_for_member(member: MemberId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM matches
             WHERE lower_member_id = $1 OR higher_member_id = $1
             ORDER BY created_at DESC",
        )
        .bind(member)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// The other member, `None` when `member` is not part of this match
    pub fn counterpart_of(&self, member: MemberId) -> Option<MemberId> {
        if member == self.lower_member_id {
            Some(self.higher_member_id)
        } else if member == self.higher_member_id {
            Some(self.lower_member_id)
        } else {
            None
        }
    }

    /// Attribution for one member's side of the match
    pub fn side_attribution(&self, side: PairSide) -> (LikeKind, MatchOrigin, Option<&str>) {
        match side {
            PairSide::Lower => (
                self.lower_like_type,
                self.lower_match_type,
                self.lower_track_ref.as_deref(),
            ),
            PairSide::Higher => (
                self.higher_like_type,
                self.higher_match_type,
                self.higher_track_ref.as_deref(),
            ),
        }
    }

    /// Whether either side reacted with a mega-like
    pub fn involves_mega_like(&self) -> bool {
        self.lower_like_type == LikeKind::MegaLike || self.higher_like_type == LikeKind::MegaLike
    }
}
