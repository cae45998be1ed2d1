use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use async_trait::async_trait;
use std::error::Error as StdError;
use super::ChatClient;
use crate::history::{ to_backend_messages, BackendMessage };
use crate::llm::{ LlmConfig, DEFAULT_OLLAMA_URL };
use crate::models::chat::GenerationRequest;
use log::debug;
use url::Url;

#[derive(Debug)]
pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: Vec<BackendMessage<'a>>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: i64,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl OllamaClient {
    pub fn new(base_url: Option<String>) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let url = base_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.into());
        Url::parse(&url).map_err(|e| format!("Invalid Ollama URL '{}': {}", url, e))?;

        Ok(Self {
            http: HttpClient::new(),
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        Self::new(config.base_url.clone())
    }

    async fn check_status(
        resp: reqwest::Response
    ) -> Result<reqwest::Response, Box<dyn StdError + Send + Sync>> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        if detail.is_empty() {
            Err(format!("Ollama returned {}", status).into())
        } else {
            Err(format!("Ollama returned {}: {}", status, detail).into())
        }
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn chat(
        &self,
        request: &GenerationRequest
    ) -> Result<String, Box<dyn StdError + Send + Sync>> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequestBody {
            model: &request.model,
            messages: to_backend_messages(&request.messages),
            stream: false,
            options: GenerateOptions {
                num_predict: request.max_tokens,
                temperature: request.temperature,
            },
        };
        debug!("POST {} model={} messages={}", url, request.model, request.messages.len());

        let resp = self.http.post(&url).json(&body).send().await?;
        let resp = Self::check_status(resp).await?;
        let data = resp
            .json::<ChatResponseBody>().await
            .map_err(|e| format!("Malformed response from Ollama: {}", e))?;

        data.message
            .map(|m| m.content)
            .ok_or_else(|| "Malformed response from Ollama: missing message".into())
    }

    async fn list_models(&self) -> Result<Vec<String>, Box<dyn StdError + Send + Sync>> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self.http.get(&url).send().await?;
        let resp = Self::check_status(resp).await?;
        let tags = resp.json::<TagsResponse>().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatMessage;
    use serde_json::json;
    use wiremock::matchers::{ body_partial_json, method, path };
    use wiremock::{ Mock, MockServer, ResponseTemplate };

    fn request(messages: Vec<ChatMessage>) -> GenerationRequest {
        GenerationRequest {
            model: "llama3.2:1b".into(),
            messages,
            max_tokens: 128,
            temperature: 0.5,
        }
    }

    #[tokio::test]
    async fn chat_sends_history_and_options() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(
                body_partial_json(
                    json!({
                    "model": "llama3.2:1b",
                    "stream": false,
                    "messages": [
                        { "role": "user", "content": "hi" },
                        { "role": "assistant", "content": "hello" },
                        { "role": "user", "content": "how are you?" }
                    ],
                    "options": { "num_predict": 128, "temperature": 0.5 }
                })
                )
            )
            .respond_with(
                ResponseTemplate::new(200).set_body_json(
                    json!({
                    "model": "llama3.2:1b",
                    "message": { "role": "assistant", "content": "fine" },
                    "done": true
                })
                )
            )
            .expect(1)
            .mount(&server).await;

        let client = OllamaClient::new(Some(server.uri())).unwrap();
        let text = client
            .chat(
                &request(
                    vec![
                        ChatMessage::user("hi"),
                        ChatMessage::assistant("hello"),
                        ChatMessage::user("how are you?")
                    ]
                )
            ).await
            .unwrap();

        assert_eq!(text, "fine");
    }

    #[tokio::test]
    async fn chat_forwards_negative_max_tokens_unchanged() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({ "options": { "num_predict": -1 } })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(
                    json!({ "message": { "role": "assistant", "content": "unbounded" } })
                )
            )
            .expect(1)
            .mount(&server).await;

        let client = OllamaClient::new(Some(server.uri())).unwrap();
        let mut req = request(vec![ChatMessage::user("hi")]);
        req.max_tokens = -1;

        assert_eq!(client.chat(&req).await.unwrap(), "unbounded");
    }

    #[tokio::test]
    async fn chat_reports_backend_error_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(
                    json!({ "error": "model 'nope' not found" })
                )
            )
            .mount(&server).await;

        let client = OllamaClient::new(Some(format!("{}/", server.uri()))).unwrap();
        let err = client.chat(&request(vec![ChatMessage::user("hi")])).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("404"), "{}", msg);
        assert!(msg.contains("model 'nope' not found"), "{}", msg);
    }

    #[tokio::test]
    async fn chat_rejects_reply_without_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
            .mount(&server).await;

        let client = OllamaClient::new(Some(server.uri())).unwrap();
        let err = client.chat(&request(vec![ChatMessage::user("hi")])).await.unwrap_err();
        assert!(err.to_string().contains("Malformed response"));
    }

    #[tokio::test]
    async fn list_models_reads_tag_names() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(
                    json!({
                    "models": [
                        { "name": "llama3.2:1b", "size": 1 },
                        { "name": "mistral:latest", "size": 2 }
                    ]
                })
                )
            )
            .mount(&server).await;

        let client = OllamaClient::new(Some(server.uri())).unwrap();
        let models = client.list_models().await.unwrap();
        assert_eq!(models, vec!["llama3.2:1b".to_string(), "mistral:latest".to_string()]);
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let client = OllamaClient::new(Some(format!("http://{}", addr))).unwrap();
        assert!(client.list_models().await.is_err());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(OllamaClient::new(Some("not a url".into())).is_err());
        let client = OllamaClient::from_config(&LlmConfig::default()).unwrap();
        assert_eq!(client.get_base_url().as_deref(), Some(DEFAULT_OLLAMA_URL));
    }
}
