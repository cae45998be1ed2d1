pub mod api;

use crate::service::ChatService;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use log::info;

pub struct Server {
    addr: String,
    service: Arc<ChatService>,
}

impl Server {
    pub fn new(addr: String, service: Arc<ChatService>) -> Self {
        Self { addr, service }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let listener = TcpListener::bind(&self.addr).await.map_err(|e|
            format!("Failed to bind HTTP server to {}: {}. Try a different port.", self.addr, e)
        )?;
        info!("HTTP API listening on: http://{}", listener.local_addr()?);

        let app = api::router(self.service.clone());
        axum::serve(listener, app.into_make_service()).await?;

        Ok(())
    }
}
