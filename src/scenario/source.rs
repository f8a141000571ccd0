use super::types::{Scenario, ScenarioRequest};
use crate::error::ClientResult;
use async_trait::async_trait;

/// Where scenarios come from. Chosen once when the client is built.
#[async_trait]
pub trait ScenarioSource: Send + Sync {
    fn name(&self) -> &str;

    /// True when results are produced without a generation service.
    fn is_local(&self) -> bool {
        false
    }

    /// Exactly one attempt; retry policy belongs to the caller.
    async fn generate(&self, request: ScenarioRequest) -> ClientResult<Scenario>;

    async fn history(&self, session_id: &str, limit: u32) -> ClientResult<Vec<Scenario>>;

    async fn health(&self) -> ClientResult<String>;
}
