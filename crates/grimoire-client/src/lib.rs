//! Client SDK for the game-master orchestrator.
//!
//! Every persona (storyteller, rules keeper, dice thrower) lives behind a single
//! HTTP endpoint. This crate owns the wire side of a conversation turn: shaping
//! the per-agent request payload, performing the round trip, and turning the
//! loosely-typed reply into the text shown to the player.

use async_trait::async_trait;

pub mod error;
pub mod http_client;
pub mod types;

pub use error::ClientError;
pub use http_client::HttpAgentClient;
pub use types::*;

/// AgentClient trait for talking to the orchestrator
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Send one request and wait for the orchestrator's reply
    async fn send(&self, request: &AgentRequest) -> Result<AgentReply, ClientError>;
}

pub type AgentClientBox = Box<dyn AgentClient>;

/// Factory for creating AgentClient instances
pub struct AgentClientFactory;

impl AgentClientFactory {
    /// Create an HTTP client for a remote orchestrator
    pub fn create_http_client(url: String) -> AgentClientBox {
        Box::new(HttpAgentClient::new(url))
    }
}
