//! Server dependencies for fan-out and resolvers (using traits for testability)
//!
//! This module provides the central dependency container shared by GraphQL
//! resolvers and post-commit effects. All external services use trait
//! abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use catalog::CatalogService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::common::utils::expo::ExpoClient;
use crate::domains::auth::JwtService;
use crate::kernel::{
    session_hub::SessionHub, BaseCatalogService, BasePushNotificationService,
};

// =============================================================================
// Expo Adapter (implements BasePushNotificationService trait)
// =============================================================================

/// Wrapper around ExpoClient that implements BasePushNotificationService trait
pub struct ExpoAdapter(pub ExpoClient);

impl ExpoAdapter {
    pub fn new(access_token: Option<String>) -> Self {
        Self(ExpoClient::new(access_token))
    }
}

#[async_trait]
impl BasePushNotificationService for ExpoAdapter {
    async fn send_notification(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
        channel: &str,
    ) -> Result<()> {
        self.0
            .send_notification(push_token, title, body, data, channel)
            .await
    }

    async fn send_batch(
        &self,
        notifications: Vec<(&str, &str, &str, serde_json::Value, &str)>,
    ) -> Result<()> {
        self.0.send_batch(notifications).await
    }
}

// =============================================================================
// CatalogService Adapter (implements BaseCatalogService trait)
// =============================================================================

/// Wrapper around CatalogService that implements BaseCatalogService trait
pub struct CatalogAdapter(pub Arc<CatalogService>);

impl CatalogAdapter {
    pub fn new(service: Arc<CatalogService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseCatalogService for CatalogAdapter {
    async fn get_track(&self, track_id: &str) -> Result<Option<catalog::models::Track>> {
        self.0
            .get_track(track_id)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to resolvers and effects
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub push_service: Arc<dyn BasePushNotificationService>,
    pub catalog_service: Arc<dyn BaseCatalogService>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    /// In-process pub/sub hub for real-time delivery to SSE endpoints
    pub session_hub: SessionHub,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        push_service: Arc<dyn BasePushNotificationService>,
        catalog_service: Arc<dyn BaseCatalogService>,
        jwt_service: Arc<JwtService>,
        session_hub: SessionHub,
    ) -> Self {
        Self {
            db_pool,
            push_service,
            catalog_service,
            jwt_service,
            session_hub,
        }
    }
}
