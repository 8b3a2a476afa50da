use mockito::Matcher;
use serde_json::json;

use super::*;
use crate::Agent;

#[tokio::test]
async fn it_posts_json_payload_and_parses_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/orchestrate")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "agent": "storyteller",
            "sessionId": "partie-42",
            "action": "I open the door"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"story":"Behind the door lies a sleeping dragon."}"#)
        .expect(1)
        .create_async()
        .await;

    let client = HttpAgentClient::new(format!("{}/orchestrate", server.url()));
    let request = AgentRequest::new(Agent::Storyteller, "partie-42", "I open the door");
    let reply = client.send(&request).await.unwrap();

    assert_eq!(
        reply.display_text(),
        "Behind the door lies a sleeping dragon."
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_on_non_success_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(502)
        .with_body(r#"{"story":"should not be read"}"#)
        .create_async()
        .await;

    let client = HttpAgentClient::new(server.url());
    let request = AgentRequest::new(Agent::Thrower, "s", "1d6");
    let err = client.send(&request).await.unwrap_err();

    assert!(matches!(err, ClientError::Status(status) if status.as_u16() == 502));
}

#[tokio::test]
async fn it_fails_on_non_json_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = HttpAgentClient::new(server.url());
    let request = AgentRequest::new(Agent::RulesKeeper, "s", "Grappling?");
    let err = client.send(&request).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn it_fails_when_unreachable() {
    let client = HttpAgentClient::new("http://127.0.0.1:9/orchestrate".to_string())
        .with_timeout(Duration::from_secs(2));
    let request = AgentRequest::new(Agent::Storyteller, "s", "hello");
    let err = client.send(&request).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn it_requires_an_url() {
    let client = HttpAgentClient::new(String::new());
    let request = AgentRequest::new(Agent::Storyteller, "s", "hello");
    let err = client.send(&request).await.unwrap_err();

    assert!(matches!(err, ClientError::MissingUrl));
}
