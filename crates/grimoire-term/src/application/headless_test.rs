use grimoire_client::HttpAgentClient;
use mockito::Matcher;
use serde_json::json;

use super::*;
use crate::domain::models::CONNECTION_FAILED_TEXT;

async fn run_line(state: &mut SessionState, client: &dyn AgentClient, line: &str) -> (LineOutcome, String) {
    let mut out: Vec<u8> = vec![];
    let outcome = handle_line(state, client, line, &mut out).await.unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn it_switches_agents_and_sends() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({
            "agent": "thrower",
            "sessionId": "partie-42",
            "expression": "1d20+5"
        })))
        .with_status(200)
        .with_body(r#"{"roll":"14+5","expression":"1d20+5","result":19}"#)
        .expect(1)
        .create_async()
        .await;

    let client = HttpAgentClient::new(server.url());
    let mut state = SessionState::new("partie-42", Agent::Storyteller);

    let (outcome, printed) = run_line(&mut state, &client, "#agent thrower").await;
    assert_eq!(outcome, LineOutcome::Continue);
    assert!(printed.contains("Lanceur"));
    assert_eq!(state.agent(), Agent::Thrower);

    let (_, printed) = run_line(&mut state, &client, "1d20+5").await;
    assert_eq!(
        printed.trim(),
        "[MJ] Lancer de dés ! Expression: 1d20+5, Résultat: 19, Détails: 14+5"
    );
    assert_eq!(state.messages().len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn it_rejects_unknown_agents() {
    let client = HttpAgentClient::new(String::new());
    let mut state = SessionState::new("partie-42", Agent::RulesKeeper);

    let (_, printed) = run_line(&mut state, &client, "#agent bard").await;

    assert!(printed.starts_with("[ERROR]"));
    assert_eq!(state.agent(), Agent::RulesKeeper);
}

#[tokio::test]
async fn it_ignores_blank_lines() {
    let client = HttpAgentClient::new(String::new());
    let mut state = SessionState::new("partie-42", Agent::Storyteller);

    let (outcome, printed) = run_line(&mut state, &client, "   ").await;

    assert_eq!(outcome, LineOutcome::Continue);
    assert!(printed.is_empty());
    assert!(state.messages().is_empty());
}

#[tokio::test]
async fn it_prints_failures() {
    let client = HttpAgentClient::new(String::new());
    let mut state = SessionState::new("partie-42", Agent::Storyteller);

    let (_, printed) = run_line(&mut state, &client, "I light a torch").await;

    assert_eq!(printed.trim(), format!("[ERROR] {CONNECTION_FAILED_TEXT}"));
    assert!(!state.is_busy());
}

#[tokio::test]
async fn it_quits() {
    let client = HttpAgentClient::new(String::new());
    let mut state = SessionState::new("partie-42", Agent::Storyteller);

    let (outcome, _) = run_line(&mut state, &client, "#quit").await;

    assert_eq!(outcome, LineOutcome::Quit);
}
