use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::models::chat::ChatMessage;
use crate::history::HistoryStore;

/// In-process history. The mutex guards one operation at a time; it does not
/// make a whole chat turn atomic, so turns from concurrent requests interleave.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, message: ChatMessage) {
        self.messages.lock().await.push(message);
    }

    async fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }

    async fn clear(&self) {
        *self.messages.lock().await = Vec::new();
    }
}
