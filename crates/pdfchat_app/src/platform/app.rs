use std::collections::VecDeque;
use std::io::{self, Write};

use pdfchat_core::{update, AppState, AppViewModel, ChatQuery, Msg};
use pdfchat_logging::chat_trace;

use super::effects::EffectRunner;
use super::persistence::load_stored_upload;
use super::render::TerminalRenderer;

/// One terminal session: owns the state, runs effects, and prints what changed.
///
/// Each user action is applied as a batch of messages; the session then waits
/// for every backend result the batch started before accepting the next
/// action, so at most one request per action is outstanding.
pub struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    renderer: TerminalRenderer,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(state: AppState, runner: EffectRunner, renderer: TerminalRenderer, out: W) -> Self {
        Self {
            state,
            runner,
            renderer,
            out,
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Writes `text` as-is, for prompts and help output.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Mounts the chat screen with `query`, falling back to the stored last upload.
    pub fn open_chat(&mut self, query: ChatQuery) -> io::Result<()> {
        let stored = load_stored_upload(self.runner.store());
        self.perform(vec![Msg::ChatOpened { query, stored }])
    }

    /// Applies one user action and blocks until its backend work settles.
    pub fn perform(&mut self, msgs: Vec<Msg>) -> io::Result<()> {
        self.renderer.begin_action();
        self.apply(msgs);
        self.render()?;

        while let Some(msg) = self.runner.wait_for_result() {
            self.apply(vec![msg]);
            self.render()?;
        }
        Ok(())
    }

    fn apply(&mut self, msgs: Vec<Msg>) {
        let mut queue: VecDeque<Msg> = msgs.into();
        while let Some(msg) = queue.pop_front() {
            chat_trace!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.run(effects));
        }
    }

    fn render(&mut self) -> io::Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        for line in self.renderer.render(&self.state.view()) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}
