use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ChatId, MemberId, MemberPair, PairSide};

/// Chat model - the conversation shell created with a match.
///
/// Keyed by the canonical pair like the match itself. Message delivery and
/// the read/last-message bookkeeping belong to the chat service; the
/// matching engine creates these rows, lists them, and tears them down.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chat {
    pub id: ChatId,
    pub lower_member_id: MemberId,
    pub higher_member_id: MemberId,
    /// Set when either side of the founding likes was a mega-like; clients
    /// badge these conversations.
    pub is_mega_like: bool,
    pub lower_read: bool,
    pub higher_read: bool,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// Find chat by ID
    pub async fn find_by_id(id: ChatId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM chats WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find the chat for a canonical pair
    pub async fn find_for_pair(pair: &MemberPair, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM chats WHERE lower_member_id = $1 AND higher_member_id = $2",
        )
        .bind(pair.lower())
        .bind(pair.higher())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// A member's chats, most recently active first
    pub async fn find_for_member(member: MemberId, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM chats
             WHERE lower_member_id = $1 OR higher_member_id = $1
             ORDER BY COALESCE(last_message_at, created_at) DESC
             LIMIT $2",
        )
        .bind(member)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// The other member, `None` when `member` is not part of this chat
    pub fn counterpart_of(&self, member: MemberId) -> Option<MemberId> {
        if member == self.lower_member_id {
            Some(self.higher_member_id)
        } else if member == self.higher_member_id {
            Some(self.lower_member_id)
        } else {
            None
        }
    }

    /// The read flag for one member's side
    pub fn read_flag_for(&self, member: MemberId) -> Option<bool> {
        if member == self.lower_member_id {
            Some(self.lower_read)
        } else if member == self.higher_member_id {
            Some(self.higher_read)
        } else {
            None
        }
    }

    /// Which slot of the pair a member occupies in this chat
    pub fn side_of(&self, member: MemberId) -> Option<PairSide> {
        if member == self.lower_member_id {
            Some(PairSide::Lower)
        } else if member == self.higher_member_id {
            Some(PairSide::Higher)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_relative_accessors() {
        let a = MemberId::new();
        let b = MemberId::new();
        let pair = MemberPair::new(a, b).unwrap();

        let chat = Chat {
            id: ChatId::new(),
            lower_member_id: pair.lower(),
            higher_member_id: pair.higher(),
            is_mega_like: true,
            lower_read: true,
            higher_read: false,
            last_message: Some("hey!".to_string()),
            last_message_at: Some(Utc::now()),
            created_at: Utc::now(),
        };

        assert_eq!(chat.counterpart_of(pair.lower()), Some(pair.higher()));
        assert_eq!(chat.read_flag_for(pair.lower()), Some(true));
        assert_eq!(chat.read_flag_for(pair.higher()), Some(false));
        assert_eq!(chat.read_flag_for(MemberId::new()), None);
        assert_eq!(chat.side_of(pair.higher()), Some(PairSide::Higher));
    }
}
