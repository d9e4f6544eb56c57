use pdfchat_core::{AppViewModel, BackendStatus, ChatTurn, Role, Screen};

/// Turns successive view models into terminal lines, printing only what
/// changed since the previous render.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    echo_user_turns: bool,
    shown_turns: usize,
    screen: Option<Screen>,
    chat_target: Option<(String, String)>,
    last_upload_doc: Option<String>,
    backend: BackendStatus,
    upload_loading: bool,
    chat_loading: bool,
    upload_error: Option<String>,
    chat_error: Option<String>,
}

impl TerminalRenderer {
    pub fn new(echo_user_turns: bool) -> Self {
        Self {
            echo_user_turns,
            ..Self::default()
        }
    }

    /// Forget shown errors so an identical error from the next action is printed again.
    pub fn begin_action(&mut self) {
        self.upload_error = None;
        self.chat_error = None;
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        if self.backend != view.backend {
            match &view.backend {
                BackendStatus::Up(status) => lines.push(format!("Backend status: {status}")),
                BackendStatus::Down(message) => {
                    lines.push(format!("Backend unavailable: {message}"))
                }
                BackendStatus::Unknown | BackendStatus::Checking => {}
            }
            self.backend = view.backend.clone();
        }

        let upload_doc = view.last_upload.as_ref().map(|upload| upload.doc_id.clone());
        if upload_doc.is_some() && upload_doc != self.last_upload_doc {
            if let Some(upload) = &view.last_upload {
                lines.push(format!(
                    "Indexed {} ({} chunks). doc_id: {}",
                    upload.filename, upload.chunks_indexed, upload.doc_id
                ));
            }
        }
        self.last_upload_doc = upload_doc;

        match view.screen {
            Screen::Upload => self.render_upload(view, &mut lines),
            Screen::Chat => self.render_chat(view, &mut lines),
        }
        self.screen = Some(view.screen);
        lines
    }

    fn render_upload(&mut self, view: &AppViewModel, lines: &mut Vec<String>) {
        let upload = &view.upload;
        if upload.loading && !self.upload_loading {
            if let Some(name) = &upload.selected_file {
                lines.push(format!("{} {}", upload.submit_label, name));
            }
        }
        self.upload_loading = upload.loading;
        push_error(&mut self.upload_error, &upload.error, lines);
    }

    fn render_chat(&mut self, view: &AppViewModel, lines: &mut Vec<String>) {
        let chat = &view.chat;
        let entered = self.screen != Some(Screen::Chat);
        if entered || chat.turns.len() < self.shown_turns {
            self.shown_turns = 0;
        }

        let target = (chat.doc_id.clone(), chat.filename.clone());
        if entered || self.chat_target.as_ref() != Some(&target) {
            if chat.doc_id.trim().is_empty() {
                lines.push(
                    "No doc_id yet. Upload a file with :upload <path> or set one with :doc <id>."
                        .to_string(),
                );
            } else {
                lines.push(format!("Chatting with doc_id {}", chat.doc_id));
            }
            if !chat.filename.is_empty() {
                lines.push(format!("Current file: {}", chat.filename));
            }
            self.chat_target = Some(target);
        }

        let busy = !chat.can_submit();
        if busy && !self.chat_loading {
            lines.push(chat.submit_label.to_string());
        }
        self.chat_loading = busy;

        for turn in chat.turns.iter().skip(self.shown_turns) {
            render_turn(turn, self.echo_user_turns, lines);
        }
        self.shown_turns = chat.turns.len();

        push_error(&mut self.chat_error, &chat.error, lines);
    }
}

fn render_turn(turn: &ChatTurn, echo_user: bool, lines: &mut Vec<String>) {
    match turn.role {
        Role::User => {
            if echo_user {
                lines.push(format!("{}: {}", turn.role.label(), turn.content));
            }
        }
        Role::Assistant => {
            lines.push(format!("{}:", turn.role.label()));
            lines.extend(turn.content.lines().map(str::to_string));
            if !turn.sources.is_empty() {
                lines.push("Sources:".to_string());
                for (index, source) in turn.sources.iter().enumerate() {
                    lines.push(format!("  {}. {}", index + 1, source));
                }
            }
        }
    }
}

fn push_error(shown: &mut Option<String>, current: &Option<String>, lines: &mut Vec<String>) {
    if let Some(message) = current {
        if shown.as_ref() != Some(message) {
            lines.push(format!("Error: {message}"));
        }
    }
    *shown = current.clone();
}
