use std::path::PathBuf;

pub const PROMPT_HELP: &str =
    "Type a question, or: :doc <id>, :file <name>, :upload <path>, :health, :help, exit";

/// One line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Quit,
    Ask(String),
    SetDocId(String),
    SetFilename(String),
    Upload(PathBuf),
    Health,
    Help,
    Empty,
}

pub fn parse_prompt_line(line: &str) -> PromptInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return PromptInput::Empty;
    }
    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return PromptInput::Quit;
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return PromptInput::Ask(line.to_string());
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "doc" => PromptInput::SetDocId(arg.to_string()),
        "file" => PromptInput::SetFilename(arg.to_string()),
        "upload" if !arg.is_empty() => PromptInput::Upload(PathBuf::from(arg)),
        "health" => PromptInput::Health,
        "upload" | "help" => PromptInput::Help,
        // Not a known command, so the line is a question that starts with ':'.
        _ => PromptInput::Ask(line.to_string()),
    }
}
