#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames};

/// Persona answering a request on the orchestrator side.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumVariantNames,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    #[default]
    Storyteller,
    RulesKeeper,
    Thrower,
}

/// Request field carrying the player's text, per agent. Agents missing from
/// this table use [`DEFAULT_PROMPT_FIELD`].
const PROMPT_FIELDS: &[(Agent, &str)] = &[
    (Agent::Thrower, "expression"),
    (Agent::RulesKeeper, "question"),
];

pub const DEFAULT_PROMPT_FIELD: &str = "action";

impl Agent {
    pub fn parse(s: &str) -> Option<Agent> {
        Agent::iter().find(|e| e.to_string() == s)
    }

    pub fn label(self) -> &'static str {
        match self {
            Agent::Storyteller => "Conteur",
            Agent::RulesKeeper => "Gardien des règles",
            Agent::Thrower => "Lanceur",
        }
    }

    pub fn prompt_field(self) -> &'static str {
        PROMPT_FIELDS
            .iter()
            .find(|(agent, _)| *agent == self)
            .map(|(_, field)| *field)
            .unwrap_or(DEFAULT_PROMPT_FIELD)
    }

    /// Next agent in selector order, wrapping around.
    pub fn next(self) -> Agent {
        let agents: Vec<Agent> = Agent::iter().collect();
        let idx = agents.iter().position(|a| *a == self).unwrap_or(0);
        agents[(idx + 1) % agents.len()]
    }

    pub fn previous(self) -> Agent {
        let agents: Vec<Agent> = Agent::iter().collect();
        let idx = agents.iter().position(|a| *a == self).unwrap_or(0);
        agents[(idx + agents.len() - 1) % agents.len()]
    }
}

/// Outbound payload: `{agent, sessionId}` plus exactly one agent-specific field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    pub agent: Agent,
    pub session_id: String,
    #[serde(flatten)]
    prompt: Map<String, Value>,
}

impl AgentRequest {
    pub fn new(agent: Agent, session_id: &str, text: &str) -> Self {
        let mut prompt = Map::new();
        prompt.insert(
            agent.prompt_field().to_string(),
            Value::String(text.to_string()),
        );

        Self {
            agent,
            session_id: session_id.to_string(),
            prompt,
        }
    }

    pub fn prompt_field(&self) -> &str {
        self.agent.prompt_field()
    }

    pub fn text(&self) -> &str {
        self.prompt
            .get(self.agent.prompt_field())
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Reply from the orchestrator. The shape is not a fixed contract, so the
/// whole record is kept and inspected by field presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentReply(pub Value);

struct ReplyRule {
    field: &'static str,
    render: fn(&Value) -> String,
}

/// Evaluated in order, first set field wins.
const REPLY_RULES: &[ReplyRule] = &[
    ReplyRule {
        field: "story",
        render: render_story,
    },
    ReplyRule {
        field: "rule",
        render: render_rule,
    },
    ReplyRule {
        field: "roll",
        render: render_roll,
    },
];

const MISSING_VALUE: &str = "?";

fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.get(name).filter(|v| !v.is_null())
}

/// Empty strings, `false` and zero select no rule, same as a missing field.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn plain_field(record: &Value, name: &str) -> String {
    field(record, name)
        .map(plain)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

fn render_story(record: &Value) -> String {
    plain_field(record, "story")
}

fn render_rule(record: &Value) -> String {
    plain_field(record, "rule")
}

fn render_roll(record: &Value) -> String {
    format!(
        "Lancer de dés ! Expression: {}, Résultat: {}, Détails: {}",
        plain_field(record, "expression"),
        plain_field(record, "result"),
        plain_field(record, "roll"),
    )
}

fn render_raw(record: &Value) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|_| record.to_string())
}

impl AgentReply {
    pub fn display_text(&self) -> String {
        REPLY_RULES
            .iter()
            .find(|rule| field(&self.0, rule.field).is_some_and(is_set))
            .map(|rule| (rule.render)(&self.0))
            .unwrap_or_else(|| render_raw(&self.0))
    }
}

impl From<Value> for AgentReply {
    fn from(value: Value) -> Self {
        AgentReply(value)
    }
}
