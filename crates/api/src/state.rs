use std::sync::Arc;

use matstock_db::JsonStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store and config sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The JSON inventory document and its write lock.
    pub store: Arc<JsonStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
