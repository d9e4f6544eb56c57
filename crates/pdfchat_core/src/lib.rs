//! PDF chat core: pure page state machine and view-model helpers.
mod effect;
mod msg;
mod route;
mod state;
mod turn;
mod update;
mod view_model;

pub use effect::{Effect, QuestionRequest};
pub use msg::Msg;
pub use route::{ChatQuery, Route};
pub use state::{
    Answer, AppState, BackendStatus, ChatDefaults, RequestId, Screen, SelectedFile,
    StoredUpload, UploadOutcome, DEFAULT_TOP_K, DOC_ID_REQUIRED, SELECT_FILE_FIRST,
};
pub use turn::{ChatTurn, Role, TurnStatus};
pub use update::update;
pub use view_model::{AppViewModel, ChatView, UploadView};
