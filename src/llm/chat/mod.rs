pub mod ollama;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use super::LlmConfig;
use self::ollama::OllamaClient;
use crate::models::chat::GenerationRequest;

/// Model runtime reached over the network.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Runs one non-streaming generation over the full message list and
    /// returns the assistant text.
    async fn chat(
        &self,
        request: &GenerationRequest
    ) -> Result<String, Box<dyn StdError + Send + Sync>>;

    /// Names of the models the runtime has installed. Cheap enough to use as
    /// a health probe.
    async fn list_models(&self) -> Result<Vec<String>, Box<dyn StdError + Send + Sync>>;

    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client = OllamaClient::from_config(config)?;
    Ok(Arc::new(client))
}
