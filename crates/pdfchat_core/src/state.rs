use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, ChatView, UploadView};
use crate::{ChatQuery, ChatTurn, TurnStatus};

pub type RequestId = u64;

pub const DEFAULT_TOP_K: u32 = 3;
pub const SELECT_FILE_FIRST: &str = "Select a PDF first.";
pub const DOC_ID_REQUIRED: &str = "doc_id is required. Upload a file first or paste it below.";

const FALLBACK_FILENAME: &str = "uploaded.pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Upload,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Checking,
    Up(String),
    Down(String),
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SelectedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
        Self { path, name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub doc_id: String,
    pub filename: String,
    pub chunks_indexed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Last-upload record as read back from durable storage. Either field may be
/// missing when the stored value was only partially usable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoredUpload {
    pub doc_id: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDefaults {
    pub top_k: u32,
    pub chat_model: Option<String>,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            chat_model: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct UploadPage {
    selected: Option<SelectedFile>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ChatPage {
    doc_id: String,
    filename: String,
    question: String,
    transcript: Vec<ChatTurn>,
    loading: bool,
    error: Option<String>,
}

/// Requests currently awaited, one slot per kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct InFlight {
    upload: Option<RequestId>,
    ask: Option<RequestId>,
    health: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    screen: Screen,
    upload: UploadPage,
    chat: ChatPage,
    defaults: ChatDefaults,
    backend: BackendStatus,
    last_upload: Option<UploadOutcome>,
    in_flight: InFlight,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat_defaults(mut self, top_k: u32, chat_model: Option<String>) -> Self {
        self.defaults = ChatDefaults { top_k, chat_model };
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            screen: self.screen,
            backend: self.backend.clone(),
            last_upload: self.last_upload.clone(),
            upload: UploadView {
                selected_file: self.upload.selected.as_ref().map(|file| file.name.clone()),
                loading: self.upload.loading,
                error: self.upload.error.clone(),
                submit_label: if self.upload.loading {
                    "Uploading..."
                } else {
                    "Upload and Continue"
                },
            },
            chat: ChatView {
                doc_id: self.chat.doc_id.clone(),
                filename: self.chat.filename.clone(),
                question: self.chat.question.clone(),
                turns: self.chat.transcript.clone(),
                loading: self.chat.loading,
                error: self.chat.error.clone(),
                submit_label: if self.chat.loading { "Thinking..." } else { "Ask" },
            },
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    // Upload screen

    pub(crate) fn select_file(&mut self, file: Option<SelectedFile>) {
        self.upload.selected = file;
        self.mark_dirty();
    }

    pub(crate) fn selected_file(&self) -> Option<&SelectedFile> {
        self.upload.selected.as_ref()
    }

    pub(crate) fn upload_loading(&self) -> bool {
        self.upload.loading
    }

    pub(crate) fn set_upload_error(&mut self, message: impl Into<String>) {
        self.upload.error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn begin_upload(&mut self) -> RequestId {
        let request_id = self.allocate_request_id();
        self.upload.error = None;
        self.upload.loading = true;
        self.in_flight.upload = Some(request_id);
        self.mark_dirty();
        request_id
    }

    /// Clears the outstanding upload if `request_id` is the awaited one.
    pub(crate) fn take_upload(&mut self, request_id: RequestId) -> bool {
        if self.in_flight.upload != Some(request_id) {
            return false;
        }
        self.in_flight.upload = None;
        self.upload.loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn complete_upload(&mut self, outcome: UploadOutcome) {
        self.upload = UploadPage::default();
        self.last_upload = Some(outcome);
        self.mark_dirty();
    }

    pub(crate) fn open_upload(&mut self) {
        self.screen = Screen::Upload;
        self.upload = UploadPage::default();
        self.chat = ChatPage::default();
        self.in_flight.ask = None;
        self.mark_dirty();
    }

    // Chat screen

    /// Mounts the chat screen: navigation parameters win, then the stored
    /// record, then blank fields.
    pub(crate) fn open_chat(&mut self, query: ChatQuery, stored: Option<StoredUpload>) {
        self.screen = Screen::Chat;
        self.chat = ChatPage::default();
        self.in_flight.ask = None;

        if let Some(doc_id) = query.effective_doc_id() {
            self.chat.doc_id = doc_id.to_string();
            self.chat.filename = query.filename.unwrap_or_default();
        } else if let Some(stored) = stored {
            if let Some(doc_id) = stored.doc_id.filter(|id| !id.is_empty()) {
                self.chat.doc_id = doc_id;
            }
            if let Some(filename) = stored.filename.filter(|name| !name.is_empty()) {
                self.chat.filename = filename;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn set_doc_id(&mut self, doc_id: String) {
        self.chat.doc_id = doc_id;
        self.mark_dirty();
    }

    pub(crate) fn set_filename(&mut self, filename: String) {
        self.chat.filename = filename;
        self.mark_dirty();
    }

    pub(crate) fn set_question(&mut self, question: String) {
        self.chat.question = question;
        self.mark_dirty();
    }

    pub(crate) fn doc_id(&self) -> &str {
        &self.chat.doc_id
    }

    pub(crate) fn question(&self) -> &str {
        &self.chat.question
    }

    pub(crate) fn chat_loading(&self) -> bool {
        self.chat.loading
    }

    pub(crate) fn defaults(&self) -> &ChatDefaults {
        &self.defaults
    }

    pub(crate) fn set_chat_error(&mut self, message: impl Into<String>) {
        self.chat.error = Some(message.into());
        self.mark_dirty();
    }

    /// Phase one of a chat turn: the question is shown immediately as pending.
    pub(crate) fn begin_question(&mut self, question: String) -> RequestId {
        let request_id = self.allocate_request_id();
        self.chat.error = None;
        self.chat.loading = true;
        self.chat.question.clear();
        self.chat.transcript.push(ChatTurn::pending_question(question));
        self.in_flight.ask = Some(request_id);
        self.mark_dirty();
        request_id
    }

    /// Clears the outstanding question if `request_id` is the awaited one.
    pub(crate) fn take_question(&mut self, request_id: RequestId) -> bool {
        if self.in_flight.ask != Some(request_id) {
            return false;
        }
        self.in_flight.ask = None;
        self.chat.loading = false;
        self.mark_dirty();
        true
    }

    /// Phase two, success: the pending turn is confirmed and the answer follows it.
    pub(crate) fn confirm_question(&mut self, answer: String, sources: Vec<String>) {
        self.settle_pending(TurnStatus::Confirmed);
        self.chat.transcript.push(ChatTurn::answer(answer, sources));
        self.mark_dirty();
    }

    /// Phase two, failure: the pending turn stays in place, marked failed.
    pub(crate) fn fail_question(&mut self, message: String) {
        self.settle_pending(TurnStatus::Failed);
        self.chat.error = Some(message);
        self.mark_dirty();
    }

    fn settle_pending(&mut self, status: TurnStatus) {
        if let Some(turn) = self
            .chat
            .transcript
            .iter_mut()
            .rev()
            .find(|turn| turn.status == TurnStatus::Pending)
        {
            turn.status = status;
        }
    }

    // Backend health

    pub(crate) fn begin_health_check(&mut self) -> Option<RequestId> {
        if self.in_flight.health.is_some() {
            return None;
        }
        let request_id = self.allocate_request_id();
        self.in_flight.health = Some(request_id);
        self.backend = BackendStatus::Checking;
        self.mark_dirty();
        Some(request_id)
    }

    pub(crate) fn finish_health_check(&mut self, request_id: RequestId, status: BackendStatus) -> bool {
        if self.in_flight.health != Some(request_id) {
            return false;
        }
        self.in_flight.health = None;
        self.backend = status;
        self.mark_dirty();
        true
    }
}
