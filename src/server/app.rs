//! Chat HTTP server with axum router and graceful shutdown.

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{get_health, post_end, post_restart, post_send, AppState};
use super::ServerError;
use crate::config::ServerConfig;
use crate::session::ChatService;

/// HTTP front end for the chat service.
pub struct ChatServer {
    config: ServerConfig,
    state: AppState,
    cancel: CancellationToken,
}

impl ChatServer {
    #[must_use]
    pub fn new(chat: ChatService, config: ServerConfig) -> Self {
        Self {
            config,
            state: AppState::new(chat),
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned shutdown token (builder pattern).
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/api/chat/send", post(post_send))
            .route("/api/chat/restart", post(post_restart))
            .route("/api/chat/end", post(post_end))
            .route("/api/health", get(get_health))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.cors_permissive {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Serve until the cancellation token fires, then shut down gracefully.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address cannot be bound, or
    /// `ServerError::Serve` if serving fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.address();
        let cancel = self.cancel.clone();
        let app = self.build_router();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                address: addr.clone(),
                source,
            })?;
        tracing::info!(address = %addr, "Chat server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("Chat server shutting down gracefully");
            })
            .await
            .map_err(ServerError::Serve)
    }
}
