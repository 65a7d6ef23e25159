use crate::errors::AppError;
use crate::models::AppData;
use crate::storage;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared server state: one mutex over the whole document gives each
/// handler an atomic read-modify-write, matching the single-writer model
/// of the persisted store.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Durably writes the document a handler just mutated. On failure the
    /// in-memory mutation is kept and the caller surfaces the 507 warning.
    pub async fn persist(&self, data: &AppData) -> Result<(), AppError> {
        storage::persist_data(&self.data_path, data).await
    }
}
