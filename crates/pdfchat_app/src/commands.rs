//! Command handlers behind the `pdfchat` subcommands. Each returns whether
//! the command succeeded so the binary can pick its exit code.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use pdfchat_core::{BackendStatus, ChatQuery, Msg, Role, Screen, SelectedFile};

use crate::platform::app::Session;
use crate::platform::input::{parse_prompt_line, PromptInput, PROMPT_HELP};

const PROMPT: &str = "> ";
const EMPTY_QUESTION: &str = "Question is empty.";

pub fn health<W: Write>(session: &mut Session<W>) -> Result<bool> {
    session.perform(vec![Msg::HealthRequested])?;
    Ok(matches!(session.view().backend, BackendStatus::Up(_)))
}

/// Uploads `path`; on success the session ends up on the chat screen for the
/// new document.
pub fn upload<W: Write>(session: &mut Session<W>, path: &Path) -> Result<bool> {
    session.perform(vec![
        Msg::FileSelected(Some(SelectedFile::from_path(path))),
        Msg::UploadSubmitted,
    ])?;
    Ok(session.view().screen == Screen::Chat)
}

/// Asks a single question on the chat screen.
pub fn ask_once<W: Write>(session: &mut Session<W>, question: &str) -> Result<bool> {
    if question.trim().is_empty() {
        session.print(&format!("{EMPTY_QUESTION}\n"))?;
        return Ok(false);
    }
    session.perform(vec![
        Msg::QuestionChanged(question.to_string()),
        Msg::QuestionSubmitted,
    ])?;
    let view = session.view();
    let answered = view
        .chat
        .turns
        .last()
        .is_some_and(|turn| turn.role == Role::Assistant);
    Ok(view.chat.error.is_none() && answered)
}

/// Interactive chat prompt; returns when input ends or the user quits.
pub fn chat_loop<W: Write, R: BufRead>(session: &mut Session<W>, input: R) -> Result<()> {
    session.print(&format!("{PROMPT_HELP}\n{PROMPT}"))?;
    for line in input.lines() {
        let line = line?;
        match parse_prompt_line(&line) {
            PromptInput::Quit => break,
            PromptInput::Empty => {}
            PromptInput::Help => session.print(&format!("{PROMPT_HELP}\n"))?,
            PromptInput::Ask(question) => {
                session.perform(vec![Msg::QuestionChanged(question), Msg::QuestionSubmitted])?
            }
            PromptInput::SetDocId(doc_id) => session.perform(vec![Msg::DocIdChanged(doc_id)])?,
            PromptInput::SetFilename(filename) => {
                session.perform(vec![Msg::FilenameChanged(filename)])?
            }
            PromptInput::Upload(path) => upload_from_chat(session, &path)?,
            PromptInput::Health => session.perform(vec![Msg::HealthRequested])?,
        }
        session.print(PROMPT)?;
    }
    Ok(())
}

/// Leaves chat to upload another file. A failed upload returns to chat with
/// the previously stored document.
fn upload_from_chat<W: Write>(session: &mut Session<W>, path: &Path) -> Result<()> {
    session.perform(vec![Msg::NavigateToUpload])?;
    if !upload(session, path)? {
        session.open_chat(ChatQuery::default())?;
    }
    Ok(())
}
