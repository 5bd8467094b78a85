use std::sync::Arc;

use alumni_db::Stores;

use crate::config::ServerConfig;
use crate::storage::UploadStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Store handles for the configured backend.
    pub stores: Stores,
    pub config: Arc<ServerConfig>,
    /// Physical storage for uploaded files.
    pub uploads: UploadStorage,
}

impl AppState {
    pub fn new(stores: Stores, config: ServerConfig) -> Self {
        let uploads = UploadStorage::new(config.upload_dir.clone());
        Self {
            stores,
            config: Arc::new(config),
            uploads,
        }
    }
}
