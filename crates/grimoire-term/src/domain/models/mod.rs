mod action;
mod event;
mod message;
mod outcome;
mod sender;

pub use action::*;
pub use event::*;
pub use grimoire_client::{Agent, AgentClient, AgentClientBox, AgentReply, AgentRequest};
pub use message::*;
pub use outcome::*;
pub use sender::*;
