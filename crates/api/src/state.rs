use std::sync::Arc;

use vitrine_core::editor::SettingsSink;
use vitrine_core::works::WorksService;
use vitrine_storage::ObjectStorage;

use crate::auth::session::SessionEvents;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitrine_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Object storage for uploaded media.
    pub storage: Arc<dyn ObjectStorage>,
    /// Works catalogue service.
    pub works: WorksService,
    /// Persistence target for site settings trees.
    pub settings_sink: Arc<dyn SettingsSink>,
    /// Fan-out of login/logout notifications.
    pub session_events: Arc<SessionEvents>,
}
