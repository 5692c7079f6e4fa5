use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{BlockId, MemberId};

/// BlockedMember model - a directional block.
///
/// A block in either direction freezes the pair: submissions between the
/// two silently no-op until the blocker lifts it. Only the member who
/// created the row can remove it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlockedMember {
    pub id: BlockId,
    pub from_member: MemberId,
    pub to_member: MemberId,
    pub created_at: DateTime<Utc>,
}

impl BlockedMember {
    /// Find the block `from_member` holds against `to_member`
    pub async fn find_directed(
        from_member: MemberId,
        to_member: MemberId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM blocked_members WHERE from_member = $1 AND to_member = $2",
        )
        .bind(from_member)
        .bind(to_member)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Whether a block exists between two members in either direction
    pub async fn any_between(a: MemberId, b: MemberId, pool: &PgPool) -> Result<bool> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM blocked_members
                WHERE (from_member = $1 AND to_member = $2)
                   OR (from_member = $2 AND to_member = $1)
             )",
        )
        .bind(a)
        .bind(b)
        .fetch_one(pool)
        .await?;

        Ok(row.0)
    }
}
