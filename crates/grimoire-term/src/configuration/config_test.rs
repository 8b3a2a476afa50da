use std::io::Write;

use anyhow::Result;
use serial_test::serial;
use tempfile::NamedTempFile;

use super::*;
use crate::application::cli;

fn config_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

async fn load_with(args: &[&str]) -> Result<()> {
    let mut argv = vec!["grimoire"];
    argv.extend_from_slice(args);
    let matches = cli::build().try_get_matches_from(argv)?;
    Config::load(cli::build(), vec![&matches]).await
}

#[tokio::test]
#[serial]
async fn it_loads_defaults() -> Result<()> {
    load_with(&["--config-file", "/nonexistent/grimoire.toml"]).await?;

    assert_eq!(Config::get(ConfigKey::SessionId), "partie-42");
    assert_eq!(Config::agent(), Agent::Storyteller);
    assert_eq!(
        Config::get(ConfigKey::OrchestratorUrl),
        Config::default(ConfigKey::OrchestratorUrl)
    );
    Ok(())
}

#[tokio::test]
#[serial]
async fn it_reads_the_config_file() -> Result<()> {
    let file = config_file(
        r#"
agent = "rules-keeper"
session-id = "campagne-7"
orchestrator-url = "http://orchestrator.local/orchestrate"
"#,
    )?;
    let path = file.path().to_string_lossy().to_string();

    load_with(&["--config-file", &path]).await?;

    assert_eq!(Config::agent(), Agent::RulesKeeper);
    assert_eq!(Config::get(ConfigKey::SessionId), "campagne-7");
    assert_eq!(
        Config::get(ConfigKey::OrchestratorUrl),
        "http://orchestrator.local/orchestrate"
    );
    assert_eq!(Config::get(ConfigKey::ConfigFile), path);
    Ok(())
}

#[tokio::test]
#[serial]
async fn it_prefers_arguments_over_the_config_file() -> Result<()> {
    let file = config_file("agent = \"rules-keeper\"\nsession-id = \"campagne-7\"\n")?;
    let path = file.path().to_string_lossy().to_string();

    load_with(&["--config-file", &path, "--agent", "thrower"]).await?;

    assert_eq!(Config::agent(), Agent::Thrower);
    assert_eq!(Config::get(ConfigKey::SessionId), "campagne-7");
    Ok(())
}

#[tokio::test]
#[serial]
async fn it_rejects_invalid_agents_in_the_config_file() -> Result<()> {
    let file = config_file("agent = \"bard\"\n")?;
    let path = file.path().to_string_lossy().to_string();

    let err = load_with(&["--config-file", &path]).await.unwrap_err();

    assert!(err.to_string().contains("invalid value for key 'agent'"));
    Ok(())
}

#[test]
fn it_serializes_defaults() {
    let res = Config::serialize_default(cli::build());

    assert!(res.contains("agent = \"storyteller\""));
    assert!(res.contains("session-id = \"partie-42\""));
    assert!(res.contains("orchestrator-url = "));
    assert!(res.contains("[possible values: storyteller, rules-keeper, thrower]"));
    assert!(!res.contains("config-file ="));
}
