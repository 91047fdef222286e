//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handler::{get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Server configuration collected from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to (e.g., 3000)
    pub port: u16,
    /// The single origin allowed by CORS
    pub allowed_origin: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::in_memory(Arc::new(SystemClock)));
/// let server = Server::new(state, ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl Server {
    pub fn new(state: Arc<AppState>, config: ServerConfig) -> Self {
        Self { state, config }
    }

    /// Build the router with every endpoint and middleware attached
    pub fn router(&self) -> Result<Router, ServerError> {
        let origin = HeaderValue::from_str(&self.config.allowed_origin)
            .map_err(|_| ServerError::InvalidOrigin(self.config.allowed_origin.clone()))?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST]);

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone());

        Ok(app)
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is invalid, the address cannot be bound,
    /// or the server fails while running.
    pub async fn run(self) -> Result<(), ServerError> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Hanare server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
