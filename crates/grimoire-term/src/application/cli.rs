use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use strum::VariantNames;

use crate::configuration::{Config, ConfigKey};
use crate::domain::models::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Headless,
}

fn arg_config_file() -> Arg {
    Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("GRIMOIRE_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
}

fn arg_orchestrator_url() -> Arg {
    Arg::new(ConfigKey::OrchestratorUrl.to_string())
        .short('u')
        .long(ConfigKey::OrchestratorUrl.to_string())
        .env("GRIMOIRE_ORCHESTRATOR_URL")
        .num_args(1)
        .help(format!(
            "Address of the orchestrator endpoint every agent is reached through [default: {}]",
            Config::default(ConfigKey::OrchestratorUrl)
        ))
}

fn arg_session_id() -> Arg {
    Arg::new(ConfigKey::SessionId.to_string())
        .short('s')
        .long(ConfigKey::SessionId.to_string())
        .env("GRIMOIRE_SESSION_ID")
        .num_args(1)
        .help(format!(
            "Game session sent along with every request [default: {}]",
            Config::default(ConfigKey::SessionId)
        ))
}

fn arg_agent() -> Arg {
    Arg::new(ConfigKey::Agent.to_string())
        .short('a')
        .long(ConfigKey::Agent.to_string())
        .env("GRIMOIRE_AGENT")
        .num_args(1)
        .value_parser(PossibleValuesParser::new(Agent::VARIANTS.iter().copied()))
        .help(format!(
            "Agent selected at startup [default: {}]",
            Config::default(ConfigKey::Agent)
        ))
}

fn arg_log_file() -> Arg {
    Arg::new(ConfigKey::LogFile.to_string())
        .long(ConfigKey::LogFile.to_string())
        .env("GRIMOIRE_LOG_FILE")
        .num_args(1)
        .help(format!(
            "File receiving diagnostic logs [default: {}]",
            Config::default(ConfigKey::LogFile)
        ))
}

fn subcommand_config() -> Command {
    Command::new("config")
        .about("Configuration file options")
        .subcommand_required(true)
        .subcommand(Command::new("default").about("Print the default config file"))
}

pub fn build() -> Command {
    Command::new("grimoire")
        .about("Talk to the game-master agents from your terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(subcommand_config())
        .arg(arg_agent())
        .arg(arg_config_file())
        .arg(arg_log_file())
        .arg(arg_orchestrator_url())
        .arg(arg_session_id())
        .arg(
            Arg::new("headless")
                .long("headless")
                .action(ArgAction::SetTrue)
                .help("Read actions from stdin, one per line, instead of starting the UI"),
        )
}

/// Parses arguments and loads configuration. `None` means a subcommand
/// already did all the work.
pub async fn parse() -> Result<Option<RunMode>> {
    let matches = build().get_matches();

    if let Some(("config", config_matches)) = matches.subcommand() {
        if let Some(("default", _)) = config_matches.subcommand() {
            println!("{}", Config::serialize_default(build()));
        }
        return Ok(None);
    }

    Config::load(build(), vec![&matches]).await?;

    if matches.get_flag("headless") {
        return Ok(Some(RunMode::Headless));
    }

    Ok(Some(RunMode::Interactive))
}
