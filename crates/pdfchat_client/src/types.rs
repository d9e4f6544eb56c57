use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ApiError;

pub const DEFAULT_TOP_K: u32 = 3;
pub const MIN_TOP_K: u32 = 1;
pub const MAX_TOP_K: u32 = 10;

const FALLBACK_FILENAME: &str = "uploaded.pdf";

/// Response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub doc_id: String,
    pub filename: String,
    pub chunks_indexed: u64,
}

impl UploadResult {
    pub(crate) fn validate(self) -> Result<Self, ApiError> {
        if self.doc_id.trim().is_empty() {
            return Err(ApiError::InvalidResponse(
                "upload response has an empty doc_id".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Body of `POST /chat`. Construct with [`ChatRequest::new`], which enforces
/// a non-empty `doc_id` and question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    doc_id: String,
    question: String,
    #[serde(rename = "k", skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_model: Option<String>,
}

impl ChatRequest {
    pub fn new(doc_id: &str, question: &str) -> Result<Self, ApiError> {
        let doc_id = doc_id.trim();
        if doc_id.is_empty() {
            return Err(ApiError::Validation("doc_id is required".to_string()));
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(ApiError::Validation("question is required".to_string()));
        }
        Ok(Self {
            doc_id: doc_id.to_string(),
            question: question.to_string(),
            top_k: Some(DEFAULT_TOP_K),
            chat_model: None,
        })
    }

    pub fn with_top_k(mut self, top_k: u32) -> Result<Self, ApiError> {
        if !(MIN_TOP_K..=MAX_TOP_K).contains(&top_k) {
            return Err(ApiError::Validation(format!(
                "k must be between {MIN_TOP_K} and {MAX_TOP_K}, got {top_k}"
            )));
        }
        self.top_k = Some(top_k);
        Ok(self)
    }

    pub fn with_chat_model(mut self, chat_model: Option<String>) -> Self {
        self.chat_model = chat_model.filter(|model| !model.trim().is_empty());
        self
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn top_k(&self) -> Option<u32> {
        self.top_k
    }

    pub fn chat_model(&self) -> Option<&str> {
        self.chat_model.as_deref()
    }
}

/// Response of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
}

/// File content sent as the `file` part of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub async fn read(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::Io(format!("{}: {err}", path.display())))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
        Ok(Self { filename, bytes })
    }
}
