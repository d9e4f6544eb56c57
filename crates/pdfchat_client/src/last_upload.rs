use pdfchat_logging::{chat_debug, chat_warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{KeyValueStore, StoreError};

pub const LAST_UPLOAD_KEY: &str = "chatpdf:lastUpload";

/// The most recent upload, stored as `{"docId": ..., "filename": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastUpload {
    pub doc_id: Option<String>,
    pub filename: Option<String>,
}

pub fn save_last_upload(
    store: &dyn KeyValueStore,
    doc_id: &str,
    filename: &str,
) -> Result<(), StoreError> {
    let record = LastUpload {
        doc_id: Some(doc_id.to_string()),
        filename: Some(filename.to_string()),
    };
    let value = serde_json::to_string(&record)?;
    store.set(LAST_UPLOAD_KEY, &value)?;
    chat_debug!("Saved last upload doc_id={}", doc_id);
    Ok(())
}

/// Reads the last upload. Missing, unreadable or malformed entries yield
/// `None`; string fields are taken individually so a partially valid record
/// still contributes what it has.
pub fn load_last_upload(store: &dyn KeyValueStore) -> Option<LastUpload> {
    let raw = match store.get(LAST_UPLOAD_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            chat_warn!("Ignoring unreadable last upload: {}", err);
            return None;
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            chat_warn!("Ignoring malformed last upload: {}", err);
            return None;
        }
    };
    let Some(object) = value.as_object() else {
        chat_warn!("Ignoring last upload that is not an object");
        return None;
    };

    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned)
    };
    Some(LastUpload {
        doc_id: field("docId"),
        filename: field("filename"),
    })
}
