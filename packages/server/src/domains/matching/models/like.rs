use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{LikeId, MemberId};

// ============================================================================
// Enums
// ============================================================================

/// How strongly a member reacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "like_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LikeKind {
    #[default]
    Like,
    MegaLike,
}

impl std::fmt::Display for LikeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LikeKind::Like => write!(f, "like"),
            LikeKind::MegaLike => write!(f, "mega_like"),
        }
    }
}

impl std::str::FromStr for LikeKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "like" => Ok(LikeKind::Like),
            "mega_like" => Ok(LikeKind::MegaLike),
            _ => Err(anyhow::anyhow!("Invalid like kind: {}", s)),
        }
    }
}

/// Where in the product a reaction was submitted from.
///
/// `Live` reactions happen inside a listening session and carry the track
/// that was playing; the other surfaces browse profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "match_origin", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    Live,
    #[default]
    Explore,
    LikesMe,
}

impl std::fmt::Display for MatchOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOrigin::Live => write!(f, "live"),
            MatchOrigin::Explore => write!(f, "explore"),
            MatchOrigin::LikesMe => write!(f, "likes_me"),
        }
    }
}

impl std::str::FromStr for MatchOrigin {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "live" => Ok(MatchOrigin::Live),
            "explore" => Ok(MatchOrigin::Explore),
            "likes_me" => Ok(MatchOrigin::LikesMe),
            _ => Err(anyhow::anyhow!("Invalid match origin: {}", s)),
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// Like model - a pending, directional reaction awaiting reciprocation.
///
/// Promotion to a match consumes the row, so a like that still exists is by
/// definition unanswered.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: LikeId,
    pub from_member: MemberId,
    pub to_member: MemberId,
    pub like_type: LikeKind,
    pub match_type: MatchOrigin,
    pub track_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Find the like one member has pending toward another
    pub async fn find_between(
        from_member: MemberId,
        to_member: MemberId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM likes WHERE from_member = $1 AND to_member = $2",
        )
        .bind(from_member)
        .bind(to_member)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Incoming likes for a member, newest first, keyed for cursor paging
    pub async fn find_received_page(
        to_member: MemberId,
        cursor: Option<Uuid>,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        match cursor {
            Some(before) => sqlx::query_as::<_, Self>(
                "SELECT * FROM likes
                 WHERE to_member = $1 AND id < $2
                 ORDER BY id DESC
                 LIMIT $3",
            )
            .bind(to_member)
            .bind(before)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(Into::into),
            None => sqlx::query_as::<_, Self>(
                "SELECT * FROM likes
                 WHERE to_member = $1
                 ORDER BY id DESC
                 LIMIT $2",
            )
            .bind(to_member)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(Into::into),
        }
    }

    /// Insert new like
    ///
    /// Test and seed paths only; submissions go through the transition
    /// engine so quota and promotion rules apply.
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO likes (id, from_member, to_member, like_type, match_type, track_ref)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.from_member)
        .bind(self.to_member)
        .bind(self.like_type)
        .bind(self.match_type)
        .bind(&self.track_ref)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
