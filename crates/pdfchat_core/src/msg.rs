use crate::{Answer, ChatQuery, RequestId, SelectedFile, StoredUpload, UploadOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked (or cleared) the file to upload.
    FileSelected(Option<SelectedFile>),
    /// User submitted the upload form.
    UploadSubmitted,
    /// Backend answered an upload request.
    UploadFinished {
        request_id: RequestId,
        result: Result<UploadOutcome, String>,
    },
    /// Chat screen mounted with its navigation parameters and the stored last upload.
    ChatOpened {
        query: ChatQuery,
        stored: Option<StoredUpload>,
    },
    /// User edited the doc id field.
    DocIdChanged(String),
    /// User edited the file label field.
    FilenameChanged(String),
    /// User edited the question box.
    QuestionChanged(String),
    /// User submitted the current question.
    QuestionSubmitted,
    /// Backend answered a chat request.
    AnswerReceived {
        request_id: RequestId,
        result: Result<Answer, String>,
    },
    /// User left chat for the upload screen.
    NavigateToUpload,
    /// User asked for the backend status.
    HealthRequested,
    /// Backend answered a health check.
    HealthReported {
        request_id: RequestId,
        result: Result<String, String>,
    },
}
