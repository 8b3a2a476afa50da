use crate::domain::models::Agent;
use crate::domain::models::AgentOutcome;
use crate::domain::models::AgentRequest;
use crate::domain::models::Message;
use crate::domain::models::MessageId;
use crate::domain::models::MessageIds;
use crate::domain::models::MessageKind;
use crate::domain::models::Sender;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

/// Everything the UI renders for one conversation: the transcript, the selected
/// agent, the pending input and whether a request is in flight.
#[derive(Debug)]
pub struct SessionState {
    agent: Agent,
    ids: MessageIds,
    input: String,
    messages: Vec<Message>,
    session_id: String,
    waiting_for_backend: bool,
}

impl SessionState {
    pub fn new(session_id: &str, agent: Agent) -> SessionState {
        SessionState {
            agent,
            ids: MessageIds::default(),
            input: String::new(),
            messages: vec![],
            session_id: session_id.to_string(),
            waiting_for_backend: false,
        }
    }

    pub fn agent(&self) -> Agent {
        self.agent
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_busy(&self) -> bool {
        self.waiting_for_backend
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        !self.waiting_for_backend
    }

    pub fn set_agent(&mut self, agent: Agent) {
        self.agent = agent;
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn next_message_id(&mut self) -> MessageId {
        self.ids.next_id()
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Accepts the pending input for sending. Records the user message, clears
    /// the input and marks the session busy, then returns the request to
    /// dispatch. Blank input or an in-flight request drops the trigger.
    pub fn begin_send(&mut self) -> Option<AgentRequest> {
        if self.waiting_for_backend {
            tracing::debug!("send ignored, a request is already in flight");
            return None;
        }

        if self.input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        let id = self.next_message_id();
        self.append_message(Message::new(id, Sender::User, &text));
        self.waiting_for_backend = true;

        Some(AgentRequest::new(self.agent, &self.session_id, &text))
    }

    /// Folds the outcome of the in-flight request back into the transcript and
    /// releases the busy flag.
    pub fn complete_send(&mut self, outcome: AgentOutcome) -> MessageId {
        let kind = if outcome.is_failure() {
            MessageKind::Error
        } else {
            MessageKind::Normal
        };

        let id = self.next_message_id();
        self.append_message(Message::new_with_kind(
            id,
            Sender::Agent,
            kind,
            outcome.text(),
        ));
        self.waiting_for_backend = false;

        id
    }
}
