use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{DislikeId, MemberId};

/// Dislike model - a directional pass.
///
/// Exists so repeat submissions against the same profile are no-ops and so
/// premium members can rewind an accidental pass. Never promotes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dislike {
    pub id: DislikeId,
    pub from_member: MemberId,
    pub to_member: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Dislike {
    /// Find the dislike one member has recorded against another
    pub async fn find_between(
        from_member: MemberId,
        to_member: MemberId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM dislikes WHERE from_member = $1 AND to_member = $2",
        )
        .bind(from_member)
        .bind(to_member)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new dislike (test and seed paths; submissions go through the
    /// transition engine)
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO dislikes (id, from_member, to_member)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.from_member)
        .bind(self.to_member)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
