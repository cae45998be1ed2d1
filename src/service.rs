use crate::cli::GenerationDefaults;
use crate::history::HistoryStore;
use crate::llm::chat::ChatClient;
use crate::models::api::{ HealthReport, ModelList };
use crate::models::chat::{ ChatMessage, ChatReply, GenerationRequest };
use log::{ debug, error, info, warn };
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Backend(String),
}

/// Caller-supplied generation overrides. `None` falls back to the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct TurnOptions {
    pub model: Option<String>,
    pub max_tokens: Option<i64>,
    pub temperature: Option<f32>,
}

/// Chat front end over a single process-wide history.
///
/// Every caller shares the same history: there are no sessions. A turn takes
/// the history lock twice (user append, then assistant append) and releases
/// it while Ollama is generating, so concurrent turns can interleave.
pub struct ChatService {
    history: Arc<dyn HistoryStore>,
    chat_client: Arc<dyn ChatClient>,
    defaults: GenerationDefaults,
}

impl ChatService {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        chat_client: Arc<dyn ChatClient>,
        defaults: GenerationDefaults
    ) -> Self {
        Self { history, chat_client, defaults }
    }

    /// Records the user message, sends the whole history to Ollama and
    /// records the reply.
    ///
    /// The user message is stored before Ollama is called. When the call
    /// fails it stays in history without an assistant reply.
    pub async fn submit_turn(
        &self,
        message: &str,
        options: TurnOptions
    ) -> Result<ChatReply, ChatError> {
        self.history.append(ChatMessage::user(message)).await;

        let request = GenerationRequest {
            model: options.model.unwrap_or_else(|| self.defaults.model.clone()),
            messages: self.history.snapshot().await,
            max_tokens: options.max_tokens.unwrap_or(self.defaults.max_tokens),
            temperature: options.temperature.unwrap_or(self.defaults.temperature),
        };
        debug!(
            "Chat turn: model={}, context={} messages, max_tokens={}, temperature={}",
            request.model,
            request.messages.len(),
            request.max_tokens,
            request.temperature
        );

        let response = match self.chat_client.chat(&request).await {
            Ok(text) => text,
            Err(e) => {
                error!("Chat request to model {} failed: {}", request.model, e);
                return Err(ChatError::Backend(e.to_string()));
            }
        };

        self.history.append(ChatMessage::assistant(response.as_str())).await;

        Ok(ChatReply {
            response,
            model: request.model,
        })
    }

    pub async fn get_history(&self) -> Vec<ChatMessage> {
        self.history.snapshot().await
    }

    pub async fn clear_history(&self) {
        self.history.clear().await;
        info!("Conversation history cleared");
    }

    /// Probes Ollama by listing its models. Failures are reported in the
    /// returned value, never as an error.
    pub async fn check_health(&self) -> HealthReport {
        match self.chat_client.list_models().await {
            Ok(models) => HealthReport::healthy(models.len()),
            Err(e) => {
                warn!(
                    "Ollama health probe against {} failed: {}",
                    self.chat_client.get_base_url().unwrap_or_default(),
                    e
                );
                HealthReport::unhealthy(e.to_string())
            }
        }
    }

    /// Reports the configured default model only; Ollama is not asked.
    pub fn list_models(&self) -> ModelList {
        ModelList {
            models: vec![self.defaults.model.clone()],
            note: "Using default model configuration".into(),
        }
    }
}
