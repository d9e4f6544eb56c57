use crate::{BackendStatus, ChatTurn, Screen, UploadOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub screen: Screen,
    pub backend: BackendStatus,
    pub last_upload: Option<UploadOutcome>,
    pub upload: UploadView,
    pub chat: ChatView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub selected_file: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub doc_id: String,
    pub filename: String,
    pub question: String,
    pub turns: Vec<ChatTurn>,
    pub loading: bool,
    pub error: Option<String>,
    pub submit_label: &'static str,
}

impl ChatView {
    /// The submit control is disabled while a question is outstanding.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }
}
