use std::sync::Arc;

use crate::config::ServerConfig;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: veriscore_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory quick-comparison sessions (24h TTL, swept on access).
    pub sessions: Arc<SessionStore>,
}
