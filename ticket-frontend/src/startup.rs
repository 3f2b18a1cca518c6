use axum::{routing::get, Router};
use std::net::SocketAddr;
use ticket_core::config::Config;
use ticket_core::error::AppError;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_check, index};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub environment: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Binds the listener immediately (port 0 = random port for testing).
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let state = AppState {
            environment: config.environment.clone(),
        };
        let router = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Frontend listening on port {}", self.port);
        axum::serve(self.listener, self.router).await
    }
}
