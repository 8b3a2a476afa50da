use anyhow::Result;
use grimoire_term::application::cli;
use grimoire_term::application::cli::RunMode;
use grimoire_term::application::headless;
use grimoire_term::application::logging;
use grimoire_term::application::ui;
use grimoire_term::infrastructure::clients::AgentClientManager;
use grimoire_term::Config;
use grimoire_term::ConfigKey;
use grimoire_term::SessionState;

#[tokio::main]
async fn main() -> Result<()> {
    let Some(mode) = cli::parse().await? else {
        return Ok(());
    };

    let _log_guard = logging::init(&Config::get(ConfigKey::LogFile))?;

    let state = SessionState::new(&Config::get(ConfigKey::SessionId), Config::agent());
    let agent_client = AgentClientManager::get()?;

    tracing::info!(
        mode = ?mode,
        agent = %state.agent(),
        session_id = state.session_id(),
        "starting"
    );

    match mode {
        RunMode::Headless => headless::run(state, agent_client).await,
        RunMode::Interactive => ui::run(state, agent_client).await,
    }
}
