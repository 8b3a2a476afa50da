use super::AgentRequest;

#[derive(Debug, Clone)]
pub enum Action {
    AgentRequest(AgentRequest),
    Quit,
}
