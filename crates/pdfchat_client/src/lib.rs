//! PDF chat client: typed access to the backend's HTTP contract, the request
//! engine that runs it off the UI thread, and durable client-side state.
mod client;
mod config;
mod engine;
mod error;
mod last_upload;
mod store;
mod types;

pub use client::{PdfChatApi, ReqwestApiClient};
pub use config::{
    base_url_from_env_value, normalize_base_url, ClientSettings, BASE_URL_ENV, DEFAULT_BASE_URL,
};
pub use engine::{EngineError, EngineEvent, EngineHandle, RequestId};
pub use error::{status_message, ApiError, ConfigError, StoreError};
pub use last_upload::{load_last_upload, save_last_upload, LastUpload, LAST_UPLOAD_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{ChatAnswer, ChatRequest, UploadFile, UploadResult, MAX_TOP_K, MIN_TOP_K};
