//! Server execution logic.

use std::{future::Future, io, path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::usecase::{
    CanvasHub, ConnectParticipantUseCase, DisconnectParticipantUseCase, GetCanvasStateUseCase,
    PlaceRectUseCase, SendDropUseCase, ShutdownHubUseCase,
};

use super::{
    config::ServerConfig,
    handler::{debug_canvas, healthz, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Canvas hub server
///
/// Wires the use cases around one [`CanvasHub`] and serves them over axum.
///
/// # Example
///
/// ```ignore
/// let hub = Arc::new(CanvasHub::new(Session::default(), Box::new(WebSocketMessagePusher::new())));
/// let server = Server::new(hub, &ServerConfig::default());
/// server.run("0.0.0.0", 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// ShutdownHubUseCase（シャットダウンのユースケース）
    shutdown_hub_usecase: Arc<ShutdownHubUseCase>,
    static_dir: PathBuf,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `hub` - The hub every use case operates on
    /// * `config` - Static file directory and heartbeat timings
    pub fn new(hub: Arc<CanvasHub>, config: &ServerConfig) -> Self {
        let state = Arc::new(AppState {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(hub.clone())),
            place_rect_usecase: Arc::new(PlaceRectUseCase::new(hub.clone())),
            send_drop_usecase: Arc::new(SendDropUseCase::new(hub.clone())),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                hub.clone(),
            )),
            get_canvas_state_usecase: Arc::new(GetCanvasStateUseCase::new(hub.clone())),
            heartbeat: config.heartbeat,
        });

        Self {
            state,
            shutdown_hub_usecase: Arc::new(ShutdownHubUseCase::new(hub)),
            static_dir: config.static_dir.clone(),
        }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/healthz", get(healthz))
            .route("/debug/canvas", get(debug_canvas))
            // それ以外は静的ファイル
            .fallback_service(ServeDir::new(&self.static_dir))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener =
            TcpListener::bind(&bind_addr)
                .await
                .map_err(|source| ServerError::Bind {
                    addr: bind_addr.clone(),
                    source,
                })?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// When `shutdown` resolves the hub stops accepting connections and closes
    /// every live connection before the server returns.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Sumi server listening on {}", listener.local_addr()?);
        tracing::info!("Serving static files from {}", self.static_dir.display());

        let app = self.router();
        let shutdown_hub_usecase = self.shutdown_hub_usecase.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                shutdown_hub_usecase.execute().await;
            })
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
