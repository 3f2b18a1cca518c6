use ticket_bootstrap::config::BootstrapConfig;
use ticket_bootstrap::services::TicketDb;
use ticket_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("ticket-bootstrap", "info");

    let config = BootstrapConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let db = TicketDb::connect(&config.mongodb.uri, &config.mongodb.database)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            std::io::Error::other(format!("Database connection error: {}", e))
        })?;

    db.health_check().await.map_err(|e| {
        tracing::error!("MongoDB is not reachable: {}", e);
        std::io::Error::other(format!("Database health check error: {}", e))
    })?;

    let report = db.initialize(&config.seed_admin).await.map_err(|e| {
        tracing::error!("Bootstrap failed: {}", e);
        std::io::Error::other(format!("Bootstrap error: {}", e))
    })?;

    tracing::info!(
        collections_created = report.collections_created,
        indexes_created = report.indexes_created,
        admin_seeded = report.admin_seeded,
        "Bootstrap completed"
    );

    Ok(())
}
