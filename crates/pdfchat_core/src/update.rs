use pdfchat_logging::{chat_debug, preview};

use crate::{
    Answer, AppState, BackendStatus, Effect, Msg, QuestionRequest, Route, UploadOutcome,
    DOC_ID_REQUIRED, SELECT_FILE_FIRST,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => {
            state.select_file(file);
            Vec::new()
        }
        Msg::UploadSubmitted => {
            if state.upload_loading() {
                return (state, Vec::new());
            }
            let Some(file) = state.selected_file().cloned() else {
                state.set_upload_error(SELECT_FILE_FIRST);
                return (state, Vec::new());
            };
            let request_id = state.begin_upload();
            vec![Effect::UploadFile { request_id, file }]
        }
        Msg::UploadFinished { request_id, result } => {
            if !state.take_upload(request_id) {
                chat_debug!("Discarding stale upload result request_id={}", request_id);
                return (state, Vec::new());
            }
            on_upload_finished(&mut state, result)
        }
        Msg::ChatOpened { query, stored } => {
            state.open_chat(query, stored);
            Vec::new()
        }
        Msg::DocIdChanged(doc_id) => {
            state.set_doc_id(doc_id);
            Vec::new()
        }
        Msg::FilenameChanged(filename) => {
            state.set_filename(filename);
            Vec::new()
        }
        Msg::QuestionChanged(question) => {
            state.set_question(question);
            Vec::new()
        }
        Msg::QuestionSubmitted => {
            if state.chat_loading() {
                return (state, Vec::new());
            }
            let doc_id = state.doc_id().trim().to_string();
            if doc_id.is_empty() {
                state.set_chat_error(DOC_ID_REQUIRED);
                return (state, Vec::new());
            }
            let question = state.question().trim().to_string();
            if question.is_empty() {
                return (state, Vec::new());
            }

            let defaults = state.defaults().clone();
            let request_id = state.begin_question(question.clone());
            vec![Effect::AskQuestion {
                request_id,
                request: QuestionRequest {
                    doc_id,
                    question,
                    top_k: defaults.top_k,
                    chat_model: defaults.chat_model,
                },
            }]
        }
        Msg::AnswerReceived { request_id, result } => {
            if !state.take_question(request_id) {
                chat_debug!("Discarding stale chat result request_id={}", request_id);
                return (state, Vec::new());
            }
            match result {
                Ok(Answer { answer, sources }) => {
                    chat_debug!(
                        "Answer request_id={} sources={} answer={}",
                        request_id,
                        sources.len(),
                        preview(&answer, 80)
                    );
                    state.confirm_question(answer, sources);
                }
                Err(message) => state.fail_question(message),
            }
            Vec::new()
        }
        Msg::NavigateToUpload => {
            state.open_upload();
            vec![Effect::Navigate(Route::Upload)]
        }
        Msg::HealthRequested => match state.begin_health_check() {
            Some(request_id) => vec![Effect::CheckHealth { request_id }],
            None => Vec::new(),
        },
        Msg::HealthReported { request_id, result } => {
            let status = match result {
                Ok(status) => BackendStatus::Up(status),
                Err(message) => BackendStatus::Down(message),
            };
            if !state.finish_health_check(request_id, status) {
                chat_debug!("Discarding stale health result request_id={}", request_id);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn on_upload_finished(state: &mut AppState, result: Result<UploadOutcome, String>) -> Vec<Effect> {
    match result {
        Ok(outcome) => {
            let doc_id = outcome.doc_id.clone();
            let filename = outcome.filename.clone();
            state.complete_upload(outcome);
            vec![
                Effect::PersistLastUpload {
                    doc_id: doc_id.clone(),
                    filename: filename.clone(),
                },
                Effect::Navigate(Route::Chat { doc_id, filename }),
            ]
        }
        Err(message) => {
            state.set_upload_error(message);
            Vec::new()
        }
    }
}
