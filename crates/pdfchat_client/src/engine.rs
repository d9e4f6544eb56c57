use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use pdfchat_logging::{chat_debug, chat_warn};
use thiserror::Error;

use crate::{
    ApiError, ChatAnswer, ChatRequest, ClientSettings, PdfChatApi, ReqwestApiClient, UploadFile,
    UploadResult,
};

pub type RequestId = u64;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error(transparent)]
    Client(#[from] ApiError),
}

enum EngineCommand {
    Upload { request_id: RequestId, path: PathBuf },
    Ask { request_id: RequestId, request: ChatRequest },
    Health { request_id: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        request_id: RequestId,
        result: Result<UploadResult, ApiError>,
    },
    AnswerCompleted {
        request_id: RequestId,
        result: Result<ChatAnswer, ApiError>,
    },
    HealthCompleted {
        request_id: RequestId,
        result: Result<String, ApiError>,
    },
}

impl EngineEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineEvent::UploadCompleted { request_id, .. }
            | EngineEvent::AnswerCompleted { request_id, .. }
            | EngineEvent::HealthCompleted { request_id, .. } => *request_id,
        }
    }
}

/// Runs backend calls on a background tokio runtime. Commands are fire and
/// forget; each produces exactly one [`EngineEvent`] tagged with its id.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let api = ReqwestApiClient::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn PdfChatApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    if event_tx.send(event).is_err() {
                        chat_debug!("Engine event dropped; receiver gone");
                    }
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn upload(&self, request_id: RequestId, path: impl Into<PathBuf>) {
        self.send(EngineCommand::Upload {
            request_id,
            path: path.into(),
        });
    }

    pub fn ask(&self, request_id: RequestId, request: ChatRequest) {
        self.send(EngineCommand::Ask {
            request_id,
            request,
        });
    }

    pub fn check_health(&self, request_id: RequestId) {
        self.send(EngineCommand::Health { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            chat_warn!("Engine thread has stopped; command dropped");
        }
    }
}

async fn handle_command(api: &dyn PdfChatApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Upload { request_id, path } => {
            let result = match UploadFile::read(&path).await {
                Ok(file) => api.upload_document(&file).await,
                Err(err) => Err(err),
            };
            EngineEvent::UploadCompleted { request_id, result }
        }
        EngineCommand::Ask {
            request_id,
            request,
        } => {
            let result = api.ask_question(&request).await;
            EngineEvent::AnswerCompleted { request_id, result }
        }
        EngineCommand::Health { request_id } => {
            let result = api.health().await;
            EngineEvent::HealthCompleted { request_id, result }
        }
    }
}
