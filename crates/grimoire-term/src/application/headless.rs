//! Headless mode for the terminal client.
//!
//! A line-oriented protocol on stdin/stdout, for scripting and automated
//! sessions:
//! - `#agent <name>` selects an agent
//! - `#status` shows the session, the agent and the transcript size
//! - `#help` lists commands
//! - `#quit` or `#exit` stops
//! - any other non-blank line is sent to the selected agent

#[cfg(test)]
#[path = "headless_test.rs"]
mod tests;

use std::io::Write;

use anyhow::Result;
use strum::VariantNames;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::domain::models::Agent;
use crate::domain::models::AgentClient;
use crate::domain::models::AgentClientBox;
use crate::domain::services::send;
use crate::domain::services::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Quit,
}

fn help_text() -> String {
    format!(
        "Commands:\n  #agent <name> - Select an agent ({})\n  #status       - Show the current session\n  #help         - Show this help\n  #quit         - Exit",
        Agent::VARIANTS.join(", ")
    )
}

fn handle_command(state: &mut SessionState, command: &str, out: &mut dyn Write) -> Result<LineOutcome> {
    let parts: Vec<&str> = command.split_whitespace().collect();
    match parts.first().copied() {
        Some("quit") | Some("exit") => return Ok(LineOutcome::Quit),
        Some("agent") => match parts.get(1).and_then(|name| Agent::parse(name)) {
            Some(agent) => {
                state.set_agent(agent);
                writeln!(out, "[AGENT] {} ({agent})", agent.label())?;
            }
            None => {
                writeln!(
                    out,
                    "[ERROR] Usage: #agent <{}>",
                    Agent::VARIANTS.join("|")
                )?;
            }
        },
        Some("status") => {
            writeln!(
                out,
                "[STATUS] session {}, agent {}, {} messages",
                state.session_id(),
                state.agent(),
                state.messages().len()
            )?;
        }
        Some("help") => writeln!(out, "{}", help_text())?,
        _ => writeln!(out, "[ERROR] Unknown command, try #help")?,
    }

    Ok(LineOutcome::Continue)
}

/// Handles one line of input, printing the agent's reply when a request went
/// out.
pub async fn handle_line(
    state: &mut SessionState,
    agent_client: &dyn AgentClient,
    line: &str,
    out: &mut dyn Write,
) -> Result<LineOutcome> {
    if let Some(command) = line.trim().strip_prefix('#') {
        return handle_command(state, command, out);
    }

    state.set_input(line);
    if send(state, agent_client).await.is_some() {
        if let Some(reply) = state.messages().last() {
            let tag = if reply.is_error() { "ERROR" } else { "MJ" };
            writeln!(out, "[{tag}] {}", reply.text)?;
        }
    }

    Ok(LineOutcome::Continue)
}

pub async fn run(mut state: SessionState, agent_client: AgentClientBox) -> Result<()> {
    let mut stdout = std::io::stdout();

    writeln!(stdout, "=== Maître du Jeu IA, headless mode ===")?;
    writeln!(
        stdout,
        "Session: {}, agent: {}",
        state.session_id(),
        state.agent().label()
    )?;
    writeln!(stdout, "{}", help_text())?;
    writeln!(stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = handle_line(&mut state, agent_client.as_ref(), &line, &mut stdout).await?;
        stdout.flush()?;

        if outcome == LineOutcome::Quit {
            break;
        }
    }

    tracing::info!(
        messages = state.messages().len(),
        "headless session finished"
    );

    Ok(())
}
