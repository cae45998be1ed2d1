pub mod chat;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    /// Ollama base URL; `DEFAULT_OLLAMA_URL` when unset.
    pub base_url: Option<String>,
}
