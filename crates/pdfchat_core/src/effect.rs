use crate::{RequestId, Route, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UploadFile {
        request_id: RequestId,
        file: SelectedFile,
    },
    PersistLastUpload {
        doc_id: String,
        filename: String,
    },
    Navigate(Route),
    AskQuestion {
        request_id: RequestId,
        request: QuestionRequest,
    },
    CheckHealth {
        request_id: RequestId,
    },
}

/// Validated chat submission: `doc_id` and `question` are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    pub doc_id: String,
    pub question: String,
    pub top_k: u32,
    pub chat_model: Option<String>,
}
