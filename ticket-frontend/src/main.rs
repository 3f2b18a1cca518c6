use ticket_core::config::Config;
use ticket_core::observability::init_tracing;
use ticket_frontend::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("ticket-frontend", "info");

    let config = Config::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
