use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Orchestrator URL is not configured")]
    MissingUrl,
    #[error("Request to the orchestrator failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Orchestrator answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("Orchestrator reply is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
