use anyhow::bail;
use anyhow::Result;
use grimoire_client::AgentClientFactory;

use crate::configuration::{Config, ConfigKey};
use crate::domain::models::AgentClientBox;

pub struct AgentClientManager {}

impl AgentClientManager {
    pub fn get() -> Result<AgentClientBox> {
        let url = Config::get(ConfigKey::OrchestratorUrl);
        if url.is_empty() {
            bail!("No orchestrator URL configured, set --orchestrator-url or GRIMOIRE_ORCHESTRATOR_URL");
        }

        Ok(AgentClientFactory::create_http_client(url))
    }
}
