use std::path::Path;

use anyhow::{Context, Result};
use pdfchat_client::{load_last_upload, save_last_upload, FileStore, KeyValueStore};
use pdfchat_core::StoredUpload;
use pdfchat_logging::{chat_error, chat_info};

const STORE_FILENAME: &str = "store.json";

pub fn open_store(state_dir: &Path) -> Result<FileStore> {
    FileStore::in_dir(state_dir, STORE_FILENAME)
        .with_context(|| format!("could not open state directory {}", state_dir.display()))
}

/// Last upload as the chat screen consumes it. Malformed records come back as `None`.
pub fn load_stored_upload(store: &dyn KeyValueStore) -> Option<StoredUpload> {
    load_last_upload(store).map(|record| StoredUpload {
        doc_id: record.doc_id,
        filename: record.filename,
    })
}

/// Saves the last upload. Failures are logged; the session carries on
/// without a resumable record.
pub fn persist_last_upload(store: &dyn KeyValueStore, doc_id: &str, filename: &str) {
    match save_last_upload(store, doc_id, filename) {
        Ok(()) => chat_info!("Remembered last upload doc_id={}", doc_id),
        Err(err) => chat_error!("Failed to persist last upload doc_id={}: {}", doc_id, err),
    }
}
