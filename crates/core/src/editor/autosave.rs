//! Debounced autosave scheduling.
//!
//! Every settings mutation calls [`Autosave::schedule`], which replaces
//! the single pending timer task; only the last edit inside a quiet
//! window actually persists. [`Autosave::save_now`] is the explicit-save
//! path. Persist attempts are serialized through one async mutex so a
//! timer-fired save and a manual save can never interleave and write
//! stale data over a newer tree.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Quiet period after the last edit before the tree is persisted.
pub const DEFAULT_AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Where the settings tree is persisted to.
///
/// The production sink is the sites table behind the HTTP update
/// endpoint; tests substitute a recording sink.
#[async_trait]
pub trait SettingsSink: Send + Sync {
    async fn persist(&self, site_id: DbId, settings: &Value) -> Result<(), CoreError>;
}

/// Save-related session state, readable by the UI at any time.
#[derive(Debug, Clone, Default)]
pub struct SaveStatus {
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    pub last_saved_at: Option<Timestamp>,
    /// Message of the most recent failed persist, cleared on success.
    pub last_error: Option<String>,
}

/// Shared between the scheduler handle and its spawned timer tasks.
struct SaveCtx {
    site_id: DbId,
    sink: Arc<dyn SettingsSink>,
    status: Mutex<SaveStatus>,
    /// Serializes persist attempts (timer-fired and manual).
    persist_lock: tokio::sync::Mutex<()>,
}

/// Single-slot debounced save scheduler for one editing session.
pub struct Autosave {
    ctx: Arc<SaveCtx>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Autosave {
    pub fn new(site_id: DbId, sink: Arc<dyn SettingsSink>, debounce: Duration) -> Self {
        Self {
            ctx: Arc::new(SaveCtx {
                site_id,
                sink,
                status: Mutex::new(SaveStatus::default()),
                persist_lock: tokio::sync::Mutex::new(()),
            }),
            debounce,
            pending: Mutex::new(None),
        }
    }

    /// Mark the session dirty and (re)start the debounce timer with a
    /// snapshot of the current tree. Any previously pending timer is
    /// cancelled outright, not queued; a persist already under way is
    /// never cancelled and runs to completion behind the persist lock.
    pub fn schedule(&self, settings: Value) {
        {
            let mut status = self.ctx.status.lock().expect("save status poisoned");
            status.has_unsaved_changes = true;
        }
        self.cancel_pending();

        let ctx = Arc::clone(&self.ctx);
        let debounce = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Once the timer fires the persist runs detached, so the
            // stored handle only ever aborts an unexpired timer.
            tokio::spawn(async move {
                if let Err(error) = persist_snapshot(&ctx, &settings).await {
                    tracing::error!(site_id = %ctx.site_id, %error, "Autosave failed");
                }
            });
        });

        let mut pending = self.pending.lock().expect("pending slot poisoned");
        if let Some(old) = pending.replace(handle) {
            old.abort();
        }
    }

    /// Cancel any pending timer and persist immediately, propagating the
    /// sink's error to the caller.
    pub async fn save_now(&self, settings: Value) -> Result<(), CoreError> {
        self.cancel_pending();
        persist_snapshot(&self.ctx, &settings).await
    }

    /// Drop the pending timer task, if any.
    pub fn cancel_pending(&self) {
        let mut pending = self.pending.lock().expect("pending slot poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.ctx.status.lock().expect("save status poisoned").clone()
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Run one serialized persist attempt and update the save status.
///
/// On failure the unsaved flag stays set so a later edit or manual save
/// retries; the in-memory tree is never rolled back.
async fn persist_snapshot(ctx: &SaveCtx, settings: &Value) -> Result<(), CoreError> {
    let _guard = ctx.persist_lock.lock().await;

    {
        let mut status = ctx.status.lock().expect("save status poisoned");
        status.is_saving = true;
    }

    let result = ctx.sink.persist(ctx.site_id, settings).await;

    let mut status = ctx.status.lock().expect("save status poisoned");
    status.is_saving = false;
    match &result {
        Ok(()) => {
            status.has_unsaved_changes = false;
            status.last_saved_at = Some(chrono::Utc::now());
            status.last_error = None;
        }
        Err(error) => {
            status.last_error = Some(error.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Sink that records every persisted snapshot.
    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<Value>>,
    }

    impl RecordingSink {
        fn calls(&self) -> Vec<Value> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SettingsSink for RecordingSink {
        async fn persist(&self, _site_id: DbId, settings: &Value) -> Result<(), CoreError> {
            self.calls.lock().unwrap().push(settings.clone());
            Ok(())
        }
    }

    /// Sink that always fails.
    struct FailingSink;

    #[async_trait]
    impl SettingsSink for FailingSink {
        async fn persist(&self, _site_id: DbId, _settings: &Value) -> Result<(), CoreError> {
            Err(CoreError::Internal("backend unavailable".to_string()))
        }
    }

    fn autosave_with(sink: Arc<dyn SettingsSink>) -> Autosave {
        Autosave::new(DbId::new_v4(), sink, DEFAULT_AUTOSAVE_DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces_rapid_edits() {
        let sink = Arc::new(RecordingSink::default());
        let autosave = autosave_with(sink.clone());

        autosave.schedule(json!({"siteName": "Un"}));
        autosave.schedule(json!({"siteName": "Deux"}));
        autosave.schedule(json!({"siteName": "Trois"}));
        assert!(autosave.status().has_unsaved_changes);

        // Let the debounce window elapse (virtual time).
        tokio::time::sleep(Duration::from_secs(3)).await;

        // Exactly one persist, carrying the last scheduled tree.
        assert_eq!(sink.calls(), vec![json!({"siteName": "Trois"})]);

        let status = autosave.status();
        assert!(!status.has_unsaved_changes);
        assert!(!status.is_saving);
        assert!(status.last_saved_at.is_some());
        assert!(status.last_error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_within_window_restarts_timer() {
        let sink = Arc::new(RecordingSink::default());
        let autosave = autosave_with(sink.clone());

        autosave.schedule(json!({"v": 1}));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(sink.calls().is_empty(), "first timer must have been replaced");

        autosave.schedule(json!({"v": 2}));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(sink.calls().is_empty(), "second window has not elapsed yet");

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sink.calls(), vec![json!({"v": 2})]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_now_cancels_pending_timer() {
        let sink = Arc::new(RecordingSink::default());
        let autosave = autosave_with(sink.clone());

        autosave.schedule(json!({"v": "pending"}));
        autosave.save_now(json!({"v": "manual"})).await.unwrap();

        // Even after the old window would have fired, only the manual
        // save reached the sink.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sink.calls(), vec![json!({"v": "manual"})]);
        assert!(autosave.status().last_saved_at.is_some());
    }

    /// Sink that parks inside `persist` until the test releases it.
    struct GatedSink {
        gate: tokio::sync::Semaphore,
        calls: Mutex<Vec<Value>>,
    }

    impl GatedSink {
        fn new() -> Self {
            Self {
                gate: tokio::sync::Semaphore::new(0),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SettingsSink for GatedSink {
        async fn persist(&self, _site_id: DbId, settings: &Value) -> Result<(), CoreError> {
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|_| CoreError::Internal("gate closed".to_string()))?;
            self.calls.lock().unwrap().push(settings.clone());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_does_not_cancel_inflight_persist() {
        let sink = Arc::new(GatedSink::new());
        let autosave = autosave_with(sink.clone());

        autosave.schedule(json!({"v": 1}));
        // Let the timer fire; the persist is now parked inside the sink.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(autosave.status().is_saving);

        // A new edit replaces the timer slot but must leave the running
        // persist alone.
        autosave.schedule(json!({"v": 2}));
        assert!(autosave.status().is_saving);

        sink.gate.add_permits(2);
        tokio::time::sleep(Duration::from_secs(3)).await;

        // Both persists completed, oldest first, and the status settled.
        assert_eq!(
            sink.calls.lock().unwrap().clone(),
            vec![json!({"v": 1}), json!({"v": 2})]
        );
        let status = autosave.status();
        assert!(!status.is_saving);
        assert!(!status.has_unsaved_changes);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_keeps_unsaved_flag_and_surfaces_error() {
        let autosave = autosave_with(Arc::new(FailingSink));

        autosave.schedule(json!({"v": 1}));
        let result = autosave.save_now(json!({"v": 1})).await;
        assert!(result.is_err());

        let status = autosave.status();
        assert!(status.has_unsaved_changes, "edits must not be dropped on failure");
        assert!(!status.is_saving);
        assert!(status.last_error.as_deref().unwrap().contains("backend unavailable"));
        assert!(status.last_saved_at.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_failure_succeeds() {
        let autosave = autosave_with(Arc::new(FailingSink));
        let _ = autosave.save_now(json!({"v": 1})).await;

        // A later schedule against a healthy sink clears the error.
        let sink = Arc::new(RecordingSink::default());
        let healthy = autosave_with(sink.clone());
        healthy.schedule(json!({"v": 2}));
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(sink.calls().len(), 1);
        assert!(healthy.status().last_error.is_none());
    }
}
