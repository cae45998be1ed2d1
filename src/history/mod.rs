mod memory;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use crate::models::chat::ChatMessage;

pub use memory::MemoryHistoryStore;

/// Owner of the conversation history. There is one history per process,
/// shared by every caller.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, message: ChatMessage);

    /// Copy of the history at the time of the call.
    async fn snapshot(&self) -> Vec<ChatMessage>;

    async fn clear(&self);
}

pub fn initialize_history_store() -> Arc<dyn HistoryStore> {
    Arc::new(MemoryHistoryStore::new())
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BackendMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

pub fn to_backend_messages(history: &[ChatMessage]) -> Vec<BackendMessage<'_>> {
    history
        .iter()
        .map(|msg| BackendMessage {
            role: msg.role.as_str(),
            content: msg.content.as_str(),
        })
        .collect()
}
