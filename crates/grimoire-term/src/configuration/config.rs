#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::Agent;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

const DEFAULT_ORCHESTRATOR_URL: &str = "http://localhost:8000/orchestrate";
const DEFAULT_SESSION_ID: &str = "partie-42";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Agent,
    ConfigFile,
    LogFile,
    OrchestratorUrl,
    SessionId,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        "".to_string()
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        match key {
            ConfigKey::Agent => Agent::default().to_string(),
            ConfigKey::ConfigFile => dirs::config_dir()
                .map(|dir| dir.join("grimoire").join("config.toml"))
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
            ConfigKey::LogFile => dirs::cache_dir()
                .map(|dir| dir.join("grimoire").join("grimoire.log"))
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| "grimoire.log".to_string()),
            // Baked in at build time when the variable is set for the build.
            ConfigKey::OrchestratorUrl => option_env!("GRIMOIRE_ORCHESTRATOR_URL")
                .unwrap_or(DEFAULT_ORCHESTRATOR_URL)
                .to_string(),
            ConfigKey::SessionId => DEFAULT_SESSION_ID.to_string(),
        }
    }

    /// Selected agent, falling back to the default on unknown values.
    pub fn agent() -> Agent {
        Agent::parse(&Config::get(ConfigKey::Agent)).unwrap_or_default()
    }

    fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
        let long = key.to_string();
        cmd.get_arguments()
            .find(|arg| arg.get_long() == Some(long.as_str()))
            .map(|arg| {
                arg.get_possible_values()
                    .iter()
                    .map(|e| e.get_name().to_string())
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default()
    }

    /// Layers defaults, then the TOML config file, then command line and
    /// environment values.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if !config_path.as_os_str().is_empty() && config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let possible_values = Config::possible_values(&cmd, key);

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            agent = Config::get(ConfigKey::Agent),
            orchestrator_url = Config::get(ConfigKey::OrchestratorUrl),
            session_id = Config::get(ConfigKey::SessionId),
            "config"
        );

        Ok(())
    }

    pub fn serialize_default(cmd: Command) -> String {
        ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let long = key.to_string();
                let arg = cmd
                    .get_arguments()
                    .find(|e| e.get_long() == Some(long.as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {possible_values}]");
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                Some(format!("# {description}\n{val}"))
            })
            .collect::<Vec<String>>()
            .join("\n\n")
    }
}
