/// Shown in place of a reply whenever the orchestrator could not be reached
/// or answered with something unreadable.
pub const CONNECTION_FAILED_TEXT: &str =
    "La connexion avec le monde des esprits a échoué. Consultez le journal.";

/// Result of one round trip, already reduced to what the transcript needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    Answered(String),
    ConnectionFailed,
}

impl AgentOutcome {
    pub fn text(&self) -> &str {
        match self {
            AgentOutcome::Answered(text) => text,
            AgentOutcome::ConnectionFailed => CONNECTION_FAILED_TEXT,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AgentOutcome::ConnectionFailed)
    }
}
