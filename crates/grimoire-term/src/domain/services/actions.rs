use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::SessionState;
use crate::domain::models::Action;
use crate::domain::models::AgentClient;
use crate::domain::models::AgentClientBox;
use crate::domain::models::AgentOutcome;
use crate::domain::models::AgentRequest;
use crate::domain::models::Event;
use crate::domain::models::MessageId;

/// Performs one round trip and reduces it to what the transcript shows. The
/// failure cause only goes to the log.
pub async fn dispatch(agent_client: &dyn AgentClient, request: &AgentRequest) -> AgentOutcome {
    match agent_client.send(request).await {
        Ok(reply) => AgentOutcome::Answered(reply.display_text()),
        Err(err) => {
            tracing::error!(
                error = %err,
                agent = %request.agent,
                session_id = %request.session_id,
                "orchestrator request failed"
            );
            AgentOutcome::ConnectionFailed
        }
    }
}

/// Runs a full send cycle in place. Returns the id of the appended agent
/// message, or `None` when the trigger was dropped.
pub async fn send(state: &mut SessionState, agent_client: &dyn AgentClient) -> Option<MessageId> {
    let request = state.begin_send()?;
    let outcome = dispatch(agent_client, &request).await;
    Some(state.complete_send(outcome))
}

async fn worker(
    agent_client: Arc<dyn AgentClient>,
    request: AgentRequest,
    event_tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let task_client = agent_client.clone();
    let res = tokio::spawn(async move { dispatch(task_client.as_ref(), &request).await }).await;

    let outcome = match res {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "agent worker crashed");
            AgentOutcome::ConnectionFailed
        }
    };

    event_tx.send(Event::AgentReply(outcome))?;

    Ok(())
}

pub struct ActionsService {}

impl ActionsService {
    /// Serves actions from the UI until `Action::Quit` or until every sender is
    /// gone. Each request yields exactly one `Event::AgentReply`.
    pub async fn start(
        agent_client: AgentClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let agent_client: Arc<dyn AgentClient> = Arc::from(agent_client);

        while let Some(action) = rx.recv().await {
            match action {
                Action::AgentRequest(request) => {
                    let client_worker = agent_client.clone();
                    let worker_event_tx = event_tx.clone();
                    tokio::spawn(async move {
                        if let Err(err) = worker(client_worker, request, worker_event_tx).await {
                            tracing::warn!(error = %err, "agent reply dropped, UI is gone");
                        }
                    });
                }
                Action::Quit => break,
            }
        }

        Ok(())
    }
}
