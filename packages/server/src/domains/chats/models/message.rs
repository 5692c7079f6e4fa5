use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ChatId, MemberId, MessageId};

/// Message model - a chat message.
///
/// Written by the chat service; the matching engine reads counts and
/// cascade-deletes rows when the surrounding relationship ends.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: MemberId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Number of messages in a chat
    pub async fn count_for_chat(chat_id: ChatId, pool: &PgPool) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE chat_id = $1")
            .bind(chat_id)
            .fetch_one(pool)
            .await?;

        Ok(row.0)
    }

    /// Insert new message (test fixtures; production writes come from the
    /// chat service)
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO messages (id, chat_id, sender_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.chat_id)
        .bind(self.sender_id)
        .bind(&self.content)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
