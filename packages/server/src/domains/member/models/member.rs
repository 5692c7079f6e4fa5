use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::utils::l10n::Locale;
use crate::common::MemberId;

/// Member model - SQL persistence layer
///
/// The engine's slice of the member record: quota counters, the premium
/// flag, and the delivery fields fan-out needs. Profile content (photos,
/// bio, anthems) is owned by another service.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
    pub locale: String,
    pub push_token: Option<String>,
    pub notifications_enabled: bool,
    pub is_premium: bool,

    // Renewable quota counters, refilled by an external scheduler
    pub like_count: i32,
    pub mega_like_count: i32,
    pub ad_count: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Find member by ID
    pub async fn find_by_id(id: MemberId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find member by ID, `None` when the row does not exist
    pub async fn find_optional(id: MemberId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find several members at once (batch loader path)
    pub async fn find_many(ids: &[MemberId], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new member
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO members (
                id,
                display_name,
                locale,
                push_token,
                notifications_enabled,
                is_premium,
                like_count,
                mega_like_count,
                ad_count
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.display_name)
        .bind(&self.locale)
        .bind(&self.push_token)
        .bind(self.notifications_enabled)
        .bind(self.is_premium)
        .bind(self.like_count)
        .bind(self.mega_like_count)
        .bind(self.ad_count)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update the Expo push token (None clears it on logout)
    pub async fn update_push_token(
        id: MemberId,
        token: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE members SET push_token = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(token)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Toggle push notification delivery for this member
    pub async fn set_notifications_enabled(
        id: MemberId,
        enabled: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE members SET notifications_enabled = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(enabled)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Parsed notification locale
    pub fn notification_locale(&self) -> Locale {
        Locale::from_tag(&self.locale)
    }

    /// Whether fan-out may push to this member right now
    pub fn can_receive_push(&self) -> bool {
        self.notifications_enabled && self.push_token.is_some()
    }
}
