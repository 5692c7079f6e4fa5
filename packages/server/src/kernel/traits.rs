// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "promote a mutual like") should be domain functions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseCatalogService)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Push Notification Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BasePushNotificationService: Send + Sync {
    /// Send a push notification to a push token
    async fn send_notification(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
        channel: &str,
    ) -> Result<()>;

    /// Send multiple notifications in batch
    async fn send_batch(
        &self,
        notifications: Vec<(&str, &str, &str, serde_json::Value, &str)>,
    ) -> Result<()>;
}

// =============================================================================
// Catalog Trait (Infrastructure - track metadata lookups)
// =============================================================================

#[async_trait]
pub trait BaseCatalogService: Send + Sync {
    /// Look up track metadata by catalog id. Ok(None) when the id is unknown.
    async fn get_track(&self, track_id: &str) -> Result<Option<catalog::models::Track>>;
}
