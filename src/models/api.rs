use serde::{ Serialize, Deserialize };
use crate::models::chat::ChatMessage;

#[derive(Deserialize, Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<i64>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Result of probing Ollama. Always sent with HTTP 200; the state is in the body.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub status: HealthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn healthy(model_count: usize) -> Self {
        Self {
            status: HealthState::Healthy,
            ollama: Some("connected".into()),
            models: Some(model_count),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: HealthState::Unhealthy,
            ollama: None,
            models: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModelList {
    pub models: Vec<String>,
    pub note: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct HistoryResponse {
    pub history: Vec<ChatMessage>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorDetail {
    pub detail: String,
}
