use std::sync::Once;

use pdfchat_core::{
    update, Answer, AppState, ChatQuery, ChatTurn, Effect, Msg, QuestionRequest, Role, Screen,
    StoredUpload, TurnStatus, DOC_ID_REQUIRED,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pdfchat_logging::initialize_for_tests);
}

fn open_chat(doc_id: &str) -> AppState {
    let (mut state, _) = update(
        AppState::new(),
        Msg::ChatOpened {
            query: ChatQuery::new(Some(doc_id.to_string()), Some("f.pdf".to_string())),
            stored: None,
        },
    );
    state.consume_dirty();
    state
}

fn ask(state: AppState, question: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QuestionChanged(question.to_string()));
    update(state, Msg::QuestionSubmitted)
}

fn answer(text: &str, sources: &[&str]) -> Answer {
    Answer {
        answer: text.to_string(),
        sources: sources.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn empty_doc_id_blocks_submission() {
    init_logging();
    let state = open_chat("");
    let (state, effects) = ask(state, "What is this about?");

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.chat.error.as_deref(), Some(DOC_ID_REQUIRED));
    assert!(view.chat.turns.is_empty());
    assert!(!view.chat.loading);
}

#[test]
fn whitespace_doc_id_counts_as_empty() {
    init_logging();
    let state = open_chat("d1");
    let (state, _) = update(state, Msg::DocIdChanged("   ".to_string()));
    let (state, effects) = ask(state, "Q");

    assert!(effects.is_empty());
    assert_eq!(state.view().chat.error.as_deref(), Some(DOC_ID_REQUIRED));
}

#[test]
fn blank_question_changes_nothing() {
    init_logging();
    let state = open_chat("d1");
    let (state, _) = update(state, Msg::QuestionChanged("  \n\t ".to_string()));

    let (next, effects) = update(state.clone(), Msg::QuestionSubmitted);
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn submit_appends_pending_turn_and_emits_request() {
    init_logging();
    let state = open_chat(" d1 ");
    let (mut state, effects) = ask(state, "  What is the scope?  ");

    assert_eq!(
        effects,
        vec![Effect::AskQuestion {
            request_id: 1,
            request: QuestionRequest {
                doc_id: "d1".to_string(),
                question: "What is the scope?".to_string(),
                top_k: 3,
                chat_model: None,
            },
        }]
    );
    let view = state.view();
    assert!(view.chat.loading);
    assert!(!view.chat.can_submit());
    assert_eq!(view.chat.submit_label, "Thinking...");
    assert_eq!(view.chat.question, "");
    assert_eq!(
        view.chat.turns,
        vec![ChatTurn {
            role: Role::User,
            content: "What is the scope?".to_string(),
            sources: Vec::new(),
            status: TurnStatus::Pending,
        }]
    );
    assert!(state.consume_dirty());
}

#[test]
fn configured_defaults_flow_into_request() {
    init_logging();
    let (state, _) = update(
        AppState::new().with_chat_defaults(7, Some("gpt-4o".to_string())),
        Msg::ChatOpened {
            query: ChatQuery::new(Some("d1".to_string()), None),
            stored: None,
        },
    );
    let (_state, effects) = ask(state, "Q");

    let Some(Effect::AskQuestion { request, .. }) = effects.first() else {
        panic!("expected ask effect, got {effects:?}");
    };
    assert_eq!(request.top_k, 7);
    assert_eq!(request.chat_model.as_deref(), Some("gpt-4o"));
}

#[test]
fn answer_confirms_pending_turn_and_appends_assistant() {
    init_logging();
    let (state, _) = ask(open_chat("d1"), "Q1");
    let (state, effects) = update(
        state,
        Msg::AnswerReceived {
            request_id: 1,
            result: Ok(answer("A", &["s1", "s2"])),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.chat.loading);
    assert_eq!(view.chat.error, None);
    assert_eq!(
        view.chat.turns,
        vec![
            ChatTurn {
                role: Role::User,
                content: "Q1".to_string(),
                sources: Vec::new(),
                status: TurnStatus::Confirmed,
            },
            ChatTurn {
                role: Role::Assistant,
                content: "A".to_string(),
                sources: vec!["s1".to_string(), "s2".to_string()],
                status: TurnStatus::Confirmed,
            },
        ]
    );
}

#[test]
fn failure_keeps_user_turn_without_answer() {
    init_logging();
    let (state, _) = ask(open_chat("d1"), "Q1");
    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            request_id: 1,
            result: Err("No indexed chunks found for this doc_id. Upload the PDF first.".to_string()),
        },
    );

    let view = state.view();
    assert!(!view.chat.loading);
    assert_eq!(
        view.chat.error.as_deref(),
        Some("No indexed chunks found for this doc_id. Upload the PDF first.")
    );
    assert_eq!(view.chat.turns.len(), 1);
    assert_eq!(view.chat.turns[0].role, Role::User);
    assert_eq!(view.chat.turns[0].status, TurnStatus::Failed);

    // The next submission clears the error and starts a new pending turn.
    let (state, effects) = ask(state, "Q2");
    assert_eq!(effects.len(), 1);
    let view = state.view();
    assert_eq!(view.chat.error, None);
    assert_eq!(view.chat.turns.len(), 2);
    assert_eq!(view.chat.turns[1].status, TurnStatus::Pending);
}

#[test]
fn second_submit_while_loading_is_ignored() {
    init_logging();
    let (state, _) = ask(open_chat("d1"), "Q1");
    let (next, effects) = ask(state, "Q2");

    assert!(effects.is_empty());
    let view = next.view();
    assert_eq!(view.chat.turns.len(), 1);
    assert_eq!(view.chat.question, "Q2");
}

#[test]
fn stale_answer_never_touches_transcript() {
    init_logging();
    let (state, _) = ask(open_chat("d1"), "Q1");
    let (next, _) = update(
        state.clone(),
        Msg::AnswerReceived {
            request_id: 42,
            result: Ok(answer("late", &[])),
        },
    );
    assert_eq!(next, state);
}

#[test]
fn answer_after_leaving_chat_is_discarded() {
    init_logging();
    let (state, _) = ask(open_chat("d1"), "Q1");
    let (state, effects) = update(state, Msg::NavigateToUpload);
    assert_eq!(
        effects,
        vec![Effect::Navigate(pdfchat_core::Route::Upload)]
    );
    assert_eq!(state.view().screen, Screen::Upload);

    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            request_id: 1,
            result: Ok(answer("A", &[])),
        },
    );
    let view = state.view();
    assert!(view.chat.turns.is_empty());
    assert!(!view.chat.loading);
}

#[test]
fn reopening_chat_clears_transcript() {
    init_logging();
    let (state, _) = ask(open_chat("d1"), "Q1");
    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            request_id: 1,
            result: Ok(answer("A", &[])),
        },
    );
    let (state, _) = update(
        state,
        Msg::ChatOpened {
            query: ChatQuery::default(),
            stored: None,
        },
    );
    let view = state.view();
    assert!(view.chat.turns.is_empty());
    assert_eq!(view.chat.doc_id, "");
}

#[test]
fn stored_record_fills_fields_when_no_query() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ChatOpened {
            query: ChatQuery::default(),
            stored: Some(StoredUpload {
                doc_id: Some("d1".to_string()),
                filename: Some("f.pdf".to_string()),
            }),
        },
    );
    let view = state.view();
    assert_eq!(view.chat.doc_id, "d1");
    assert_eq!(view.chat.filename, "f.pdf");
}

#[test]
fn partial_stored_record_fills_what_it_has() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ChatOpened {
            query: ChatQuery::new(Some(String::new()), Some("ignored.pdf".to_string())),
            stored: Some(StoredUpload {
                doc_id: None,
                filename: Some("only-name.pdf".to_string()),
            }),
        },
    );
    let view = state.view();
    assert_eq!(view.chat.doc_id, "");
    assert_eq!(view.chat.filename, "only-name.pdf");
}

#[test]
fn query_doc_id_without_filename_leaves_label_blank() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ChatOpened {
            query: ChatQuery::new(Some("d2".to_string()), None),
            stored: Some(StoredUpload {
                doc_id: Some("d1".to_string()),
                filename: Some("f.pdf".to_string()),
            }),
        },
    );
    let view = state.view();
    assert_eq!(view.chat.doc_id, "d2");
    assert_eq!(view.chat.filename, "");
}
