use crate::domain::model::Prompt;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Sends a prompt to an AI answer service and returns the raw response body.
///
/// Implementations issue exactly one outbound request per call and never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}
