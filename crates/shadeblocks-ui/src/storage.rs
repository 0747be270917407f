//! Browser `localStorage` snapshot store.

use gloo::console;
use gloo::storage::errors::StorageError as LocalStorageError;
use gloo::storage::{LocalStorage, Storage};
use serde_json::Value;
use shadeblocks_core::{SnapshotStore, StorageError, StorageResult};

/// [`SnapshotStore`] backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserStore;

impl SnapshotStore for BrowserStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        match LocalStorage::get::<Value>(key) {
            Ok(value) => Ok(Some(value.to_string())),
            Err(LocalStorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(storage_error("load", key, err)),
        }
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        let value: Value =
            serde_json::from_str(value).map_err(|source| StorageError::Serialization {
                operation: "save",
                source,
            })?;
        LocalStorage::set(key, value).map_err(|err| storage_error("save", key, err))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}

fn storage_error(operation: &'static str, key: &str, err: LocalStorageError) -> StorageError {
    let detail = err.to_string();
    log_storage_error(operation, key, &detail);
    match err {
        LocalStorageError::SerdeError(source) => StorageError::Serialization { operation, source },
        _ if operation == "save" => StorageError::WriteRejected {
            key: key.to_string(),
            detail: Some(detail),
        },
        _ => StorageError::Unavailable {
            operation,
            detail: Some(detail),
        },
    }
}

fn log_storage_error(operation: &'static str, key: &str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
