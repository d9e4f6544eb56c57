#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Delivery state of a transcript entry.
///
/// A user turn is `Pending` from submission until its answer arrives, then
/// moves to `Confirmed` (an assistant turn follows it) or `Failed` (it stays
/// in the transcript without an answer). Assistant turns are always `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub sources: Vec<String>,
    pub status: TurnStatus,
}

impl ChatTurn {
    pub(crate) fn pending_question(question: String) -> Self {
        Self {
            role: Role::User,
            content: question,
            sources: Vec::new(),
            status: TurnStatus::Pending,
        }
    }

    pub(crate) fn answer(answer: String, sources: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: answer,
            sources,
            status: TurnStatus::Confirmed,
        }
    }
}
