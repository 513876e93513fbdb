use canon_core::{CountryStore, DatasetError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("dataset loader stopped before reporting a result")]
    Interrupted,
}

/// Reads and validates the country feed without blocking the runtime
pub async fn load_store(path: &Path) -> Result<CountryStore, DatasetError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
    CountryStore::from_json(&json)
}

/// Starts a background load. The receiver yields exactly one outcome.
pub fn spawn_load(path: PathBuf) -> oneshot::Receiver<Result<CountryStore, DatasetError>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        tracing::info!(path = %path.display(), "loading country feed");
        let result = load_store(&path).await;
        if tx.send(result).is_err() {
            tracing::debug!("country feed result dropped; receiver gone");
        }
    });
    rx
}

/// Polls a pending load without waiting. `None` while still running.
pub fn try_finish(
    rx: &mut oneshot::Receiver<Result<CountryStore, DatasetError>>,
) -> Option<Result<CountryStore, LoadError>> {
    match rx.try_recv() {
        Ok(result) => Some(result.map_err(LoadError::from)),
        Err(oneshot::error::TryRecvError::Empty) => None,
        Err(oneshot::error::TryRecvError::Closed) => Some(Err(LoadError::Interrupted)),
    }
}
