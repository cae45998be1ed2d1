pub mod models;
pub mod server;
pub mod llm;
pub mod cli;
pub mod history;
pub mod service;

use cli::Args;
use history::initialize_history_store;
use llm::LlmConfig;
use llm::chat::new_client as new_chat_client;
use log::info;
use server::Server;
use service::ChatService;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Ollama Host: {}", args.ollama_host);
    info!("Default Model: {}", args.model);
    info!("Listen Address: {}", args.listen_addr());
    info!("Max Tokens: {}", args.max_tokens);
    info!("Temperature: {}", args.temperature);
    info!("-------------------------");

    let chat_config = LlmConfig {
        base_url: Some(args.ollama_host.clone()),
    };
    let chat_client = new_chat_client(&chat_config)?;
    let history = initialize_history_store();
    let service = Arc::new(ChatService::new(history, chat_client, args.generation_defaults()));

    let addr = args.listen_addr();
    info!("Starting Local AI Chatbot on: {}", addr);
    let server = Server::new(addr, service);
    server.run().await?;

    Ok(())
}
