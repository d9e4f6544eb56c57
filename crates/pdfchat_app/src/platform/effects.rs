use std::sync::Arc;

use pdfchat_client::{ChatRequest, EngineEvent, EngineHandle, KeyValueStore};
use pdfchat_core::{Answer, Effect, Msg, QuestionRequest, Route, UploadOutcome};
use pdfchat_logging::{chat_debug, chat_info, chat_warn};

use super::persistence::{load_stored_upload, persist_last_upload};

/// Executes core effects: backend calls go to the engine, storage and
/// navigation are handled inline.
pub struct EffectRunner {
    engine: EngineHandle,
    store: Arc<dyn KeyValueStore>,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            engine,
            store,
            in_flight: 0,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Runs `effects` in order and returns messages that follow from them
    /// immediately (screen mounts, locally rejected requests).
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::UploadFile { request_id, file } => {
                    chat_info!(
                        "UploadFile request_id={} path={:?}",
                        request_id,
                        file.path
                    );
                    self.engine.upload(request_id, file.path);
                    self.in_flight += 1;
                }
                Effect::PersistLastUpload { doc_id, filename } => {
                    persist_last_upload(self.store.as_ref(), &doc_id, &filename);
                }
                Effect::Navigate(route) => {
                    chat_debug!("Navigate {}", route.location());
                    if let Route::Chat { .. } = route {
                        follow_ups.push(Msg::ChatOpened {
                            query: route.chat_query().unwrap_or_default(),
                            stored: load_stored_upload(self.store.as_ref()),
                        });
                    }
                }
                Effect::AskQuestion {
                    request_id,
                    request,
                } => match build_chat_request(&request) {
                    Ok(chat_request) => {
                        self.engine.ask(request_id, chat_request);
                        self.in_flight += 1;
                    }
                    Err(message) => {
                        chat_warn!("Rejected chat request {}: {}", request_id, message);
                        follow_ups.push(Msg::AnswerReceived {
                            request_id,
                            result: Err(message),
                        });
                    }
                },
                Effect::CheckHealth { request_id } => {
                    self.engine.check_health(request_id);
                    self.in_flight += 1;
                }
            }
        }
        follow_ups
    }

    /// Blocks until the next backend result arrives. `None` when nothing is
    /// outstanding or the engine stopped.
    pub fn wait_for_result(&mut self) -> Option<Msg> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.engine.recv()?;
        self.in_flight -= 1;
        Some(event_to_msg(event))
    }
}

fn build_chat_request(request: &QuestionRequest) -> Result<ChatRequest, String> {
    let chat_request = ChatRequest::new(&request.doc_id, &request.question)
        .and_then(|chat| chat.with_top_k(request.top_k))
        .map_err(|err| err.to_string())?;
    Ok(chat_request.with_chat_model(request.chat_model.clone()))
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { request_id, result } => Msg::UploadFinished {
            request_id,
            result: result
                .map(|upload| UploadOutcome {
                    doc_id: upload.doc_id,
                    filename: upload.filename,
                    chunks_indexed: upload.chunks_indexed,
                })
                .map_err(|err| err.to_string()),
        },
        EngineEvent::AnswerCompleted { request_id, result } => Msg::AnswerReceived {
            request_id,
            result: result
                .map(|answer| Answer {
                    answer: answer.answer,
                    sources: answer.sources,
                })
                .map_err(|err| err.to_string()),
        },
        EngineEvent::HealthCompleted { request_id, result } => Msg::HealthReported {
            request_id,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
