//! Terminal client for the grimoire game-master agents.
//!
//! The player picks a persona (storyteller, rules keeper, dice thrower), types
//! an action and reads the reply in a running transcript. Requests go one at a
//! time to a single orchestrator endpoint.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Action, Agent, AgentClient, AgentOutcome, AgentRequest, Event, Message, Sender,
};
pub use domain::services::SessionState;
