// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    session_hub::SessionHub, BaseCatalogService, BasePushNotificationService, ServerDeps,
};
use crate::domains::auth::JwtService;

/// A recorded push send: (token, title, body, data, channel)
pub type SentPush = (String, String, String, serde_json::Value, String);

// =============================================================================
// Mock Push Notification Service
// =============================================================================

pub struct MockPushNotificationService {
    sent_notifications: Arc<Mutex<Vec<SentPush>>>,
}

impl MockPushNotificationService {
    pub fn new() -> Self {
        Self {
            sent_notifications: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all notifications that were sent
    pub fn sent_notifications(&self) -> Vec<SentPush> {
        self.sent_notifications.lock().unwrap().clone()
    }

    /// Check if a notification was sent to the given token
    pub fn was_sent_to(&self, push_token: &str) -> bool {
        self.sent_notifications
            .lock()
            .unwrap()
            .iter()
            .any(|(token, _, _, _, _)| token == push_token)
    }

    /// Check if a notification was sent with the given title
    pub fn was_sent_with_title(&self, title: &str) -> bool {
        self.sent_notifications
            .lock()
            .unwrap()
            .iter()
            .any(|(_, t, _, _, _)| t == title)
    }
}

impl Default for MockPushNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePushNotificationService for MockPushNotificationService {
    async fn send_notification(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
        channel: &str,
    ) -> Result<()> {
        self.sent_notifications.lock().unwrap().push((
            push_token.to_string(),
            title.to_string(),
            body.to_string(),
            data,
            channel.to_string(),
        ));
        Ok(())
    }

    async fn send_batch(
        &self,
        notifications: Vec<(&str, &str, &str, serde_json::Value, &str)>,
    ) -> Result<()> {
        for (token, title, body, data, channel) in notifications {
            self.send_notification(token, title, body, data, channel)
                .await?;
        }
        Ok(())
    }
}

// =============================================================================
// Mock Catalog Service
// =============================================================================

pub struct MockCatalogService {
    tracks: Arc<Mutex<HashMap<String, catalog::models::Track>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockCatalogService {
    pub fn new() -> Self {
        Self {
            tracks: Arc::new(Mutex::new(HashMap::new())),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a canned track for a catalog id
    pub fn with_track(self, id: u64, title: &str, artist: &str) -> Self {
        self.tracks.lock().unwrap().insert(
            id.to_string(),
            catalog::models::Track {
                id,
                title: title.to_string(),
                artist_name: artist.to_string(),
                artwork_url: None,
                preview_url: None,
            },
        );
        self
    }

    /// Get all ids that were looked up
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Default for MockCatalogService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCatalogService for MockCatalogService {
    async fn get_track(&self, track_id: &str) -> Result<Option<catalog::models::Track>> {
        self.lookups.lock().unwrap().push(track_id.to_string());
        Ok(self.tracks.lock().unwrap().get(track_id).cloned())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub push_service: Arc<MockPushNotificationService>,
    pub catalog_service: Arc<MockCatalogService>,
    pub session_hub: SessionHub,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            push_service: Arc::new(MockPushNotificationService::new()),
            catalog_service: Arc::new(MockCatalogService::new()),
            session_hub: SessionHub::new(),
        }
    }

    /// Set a mock push notification service
    pub fn mock_push(mut self, service: MockPushNotificationService) -> Self {
        self.push_service = Arc::new(service);
        self
    }

    /// Set a mock catalog service
    pub fn mock_catalog(mut self, service: MockCatalogService) -> Self {
        self.catalog_service = Arc::new(service);
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_deps(self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(
            db_pool,
            self.push_service,
            self.catalog_service,
            Arc::new(JwtService::new("test-secret", "duet-test")),
            self.session_hub,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
