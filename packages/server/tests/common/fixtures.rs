//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use chrono::Utc;
use duet_core::common::{ChatId, MemberId, MessageId};
use duet_core::domains::chats::models::message::Message;
use duet_core::domains::member::models::member::Member;
use sqlx::PgPool;

/// Create a free-tier member with full default quotas.
pub async fn create_member(pool: &PgPool, name: &str) -> Result<Member> {
    create_member_with(pool, name, false, 20, 5, 5).await
}

/// Create a premium member.
pub async fn create_premium_member(pool: &PgPool, name: &str) -> Result<Member> {
    create_member_with(pool, name, true, 20, 5, 5).await
}

/// Create a member with explicit premium flag and quota counters.
pub async fn create_member_with(
    pool: &PgPool,
    name: &str,
    is_premium: bool,
    like_count: i32,
    mega_like_count: i32,
    ad_count: i32,
) -> Result<Member> {
    let member = Member {
        id: MemberId::new(),
        display_name: name.to_string(),
        locale: "en".to_string(),
        push_token: None,
        notifications_enabled: true,
        is_premium,
        like_count,
        mega_like_count,
        ad_count,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    member.insert(pool).await
}

/// Create a member with an Expo push token registered.
pub async fn create_member_with_push(pool: &PgPool, name: &str, token: &str) -> Result<Member> {
    let member = create_member(pool, name).await?;
    Member::update_push_token(member.id, Some(token), pool).await
}

/// Insert a chat message (the chat service owns this in production).
pub async fn create_message(
    pool: &PgPool,
    chat_id: ChatId,
    sender_id: MemberId,
    content: &str,
) -> Result<Message> {
    let message = Message {
        id: MessageId::new(),
        chat_id,
        sender_id,
        content: content.to_string(),
        created_at: Utc::now(),
    };
    message.insert(pool).await
}
