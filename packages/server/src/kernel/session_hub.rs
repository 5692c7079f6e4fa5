//! In-process pub/sub hub for real-time delivery to connected members.
//!
//! One broadcast channel per member, created on first subscribe. Payloads
//! are `serde_json::Value`; domains serialize their own types.
//!
//! Producers (post-commit fan-out):
//!   hub.publish(member_id, json!({"type": "new_match", ...})).await;
//!
//! Consumers (SSE endpoints):
//!   let rx = hub.subscribe(member_id).await;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::common::MemberId;

/// Member-keyed in-process pub/sub hub.
///
/// Thread-safe, cloneable.
#[derive(Clone)]
pub struct SessionHub {
    channels: Arc<RwLock<HashMap<MemberId, broadcast::Sender<serde_json::Value>>>>,
    capacity: usize,
}

impl SessionHub {
    /// Create a new SessionHub with default capacity (256 messages per channel).
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a new SessionHub with the given channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Publish a JSON value to a member's sessions.
    /// Returns whether at least one live session received it.
    pub async fn publish(&self, member: MemberId, value: serde_json::Value) -> bool {
        let channels = self.channels.read().await;
        match channels.get(&member) {
            // send errors mean no active receivers
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Subscribe to a member's channel. Creates it if it doesn't exist.
    pub async fn subscribe(&self, member: MemberId) -> broadcast::Receiver<serde_json::Value> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(member)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }

    /// Whether the member has at least one connected session.
    pub async fn is_live(&self, member: MemberId) -> bool {
        let channels = self.channels.read().await;
        channels
            .get(&member)
            .map(|tx| tx.receiver_count() > 0)
            .unwrap_or(false)
    }

    /// Remove channels with zero subscribers (housekeeping).
    pub async fn cleanup(&self) {
        let mut channels = self.channels.write().await;
        channels.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_subscribe_roundtrip() {
        let hub = SessionHub::new();
        let member = MemberId::new();
        let mut rx = hub.subscribe(member).await;

        let value = serde_json::json!({"type": "new_match", "chatId": "abc"});
        assert!(hub.publish(member, value.clone()).await);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, value);
    }

    #[tokio::test]
    async fn test_publish_without_sessions_reports_offline() {
        let hub = SessionHub::new();
        let offline = MemberId::new();
        assert!(!hub.publish(offline, serde_json::json!({"data": "dropped"})).await);
    }

    #[tokio::test]
    async fn test_is_live_tracks_receivers() {
        let hub = SessionHub::new();
        let member = MemberId::new();
        assert!(!hub.is_live(member).await);

        let rx = hub.subscribe(member).await;
        assert!(hub.is_live(member).await);

        drop(rx);
        assert!(!hub.is_live(member).await);
    }

    #[tokio::test]
    async fn test_cleanup_removes_empty_channels() {
        let hub = SessionHub::new();
        let member = MemberId::new();
        let rx = hub.subscribe(member).await;

        assert_eq!(hub.channels.read().await.len(), 1);

        drop(rx);
        hub.cleanup().await;

        assert_eq!(hub.channels.read().await.len(), 0);
    }

    #[tokio::test]
    async fn test_multiple_sessions_same_member() {
        let hub = SessionHub::new();
        let member = MemberId::new();
        let mut rx1 = hub.subscribe(member).await;
        let mut rx2 = hub.subscribe(member).await;

        let value = serde_json::json!({"type": "end_user"});
        assert!(hub.publish(member, value.clone()).await);

        assert_eq!(rx1.recv().await.unwrap(), value);
        assert_eq!(rx2.recv().await.unwrap(), value);
    }
}
