//! Session-change notifications.
//!
//! Login and logout publish a [`SessionEvent`] so interested components
//! (the editor shell, background tasks tied to a signed-in owner) can
//! react without polling. Backed by a `tokio::sync::broadcast` channel
//! shared via `Arc` across the application.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use vitrine_core::types::DbId;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionChange {
    LoggedIn,
    LoggedOut,
}

/// One authentication state transition.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    pub user_id: DbId,
    pub change: SessionChange,
    pub timestamp: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(user_id: DbId, change: SessionChange) -> Self {
        Self {
            user_id,
            change,
            timestamp: Utc::now(),
        }
    }
}

/// In-process fan-out of session events.
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all future session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let events = SessionEvents::default();
        let mut rx_a = events.subscribe();
        let mut rx_b = events.subscribe();

        let user_id = Uuid::new_v4();
        events.publish(SessionEvent::new(user_id, SessionChange::LoggedIn));

        let got_a = rx_a.recv().await.unwrap();
        let got_b = rx_b.recv().await.unwrap();
        assert_eq!(got_a.user_id, user_id);
        assert_eq!(got_a.change, SessionChange::LoggedIn);
        assert_eq!(got_b.change, SessionChange::LoggedIn);
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let events = SessionEvents::default();
        events.publish(SessionEvent::new(Uuid::new_v4(), SessionChange::LoggedOut));
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let events = SessionEvents::default();
        events.publish(SessionEvent::new(Uuid::new_v4(), SessionChange::LoggedIn));

        let mut rx = events.subscribe();
        let user_id = Uuid::new_v4();
        events.publish(SessionEvent::new(user_id, SessionChange::LoggedOut));

        let got = rx.recv().await.unwrap();
        assert_eq!(got.user_id, user_id);
    }
}
