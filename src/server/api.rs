use crate::models::api::{
    ChatRequest,
    ErrorDetail,
    HealthReport,
    HistoryResponse,
    MessageResponse,
    ModelList,
};
use crate::service::{ ChatService, TurnOptions };
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    extract::State,
    response::IntoResponse,
    http::StatusCode,
    Json,
};
use tower_http::cors::{ Any, CorsLayer };

#[derive(Clone)]
struct AppState {
    service: Arc<ChatService>,
}

pub fn router(service: Arc<ChatService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/models", get(models_handler))
        .route("/chat", post(chat_handler))
        .route("/chat/history", get(get_history_handler).delete(clear_history_handler))
        .layer(cors)
        .with_state(AppState { service })
}

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Local AI Chatbot is running".into() })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.service.check_health().await)
}

async fn models_handler(State(state): State<AppState>) -> Json<ModelList> {
    Json(state.service.list_models())
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let options = TurnOptions {
        model: req.model,
        max_tokens: req.max_tokens,
        temperature: req.temperature,
    };

    match state.service.submit_turn(&req.message, options).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetail {
            detail: format!("Chat failed: {}", e),
        })).into_response(),
    }
}

async fn clear_history_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.service.clear_history().await;
    Json(MessageResponse { message: "Conversation history cleared".into() })
}

async fn get_history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse { history: state.service.get_history().await })
}
