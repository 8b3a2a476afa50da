#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Sender;

/// Transcript key. Only [`MessageIds`] hands these out, so two messages of the
/// same session never share one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug)]
pub struct MessageId(u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default, Debug)]
pub struct MessageIds {
    next: u64,
}

impl MessageIds {
    pub fn next_id(&mut self) -> MessageId {
        self.next += 1;
        MessageId(self.next)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
pub enum MessageKind {
    #[default]
    Normal,
    Error,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(id: MessageId, sender: Sender, text: &str) -> Message {
        Message {
            id,
            sender,
            text: text.to_string(),
            kind: MessageKind::Normal,
        }
    }

    pub fn new_with_kind(id: MessageId, sender: Sender, kind: MessageKind, text: &str) -> Message {
        Message {
            id,
            sender,
            text: text.to_string(),
            kind,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
