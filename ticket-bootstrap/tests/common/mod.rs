use secrecy::Secret;
use ticket_bootstrap::config::SeedAdminConfig;
use ticket_bootstrap::services::{BootstrapReport, TicketDb};

pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "test-bootstrap-password";

/// A freshly bootstrapped throwaway database.
///
/// Connects to `TEST_MONGODB_URI` (default: local MongoDB) and provisions a
/// UUID-suffixed database so tests do not interfere with each other.
pub struct TestDb {
    pub db: TicketDb,
    pub db_name: String,
    pub report: BootstrapReport,
}

impl TestDb {
    pub async fn spawn() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("ticket_test_{}", uuid::Uuid::new_v4());

        let db = TicketDb::connect(&uri, &db_name)
            .await
            .expect("Failed to connect to MongoDB");

        let report = db
            .initialize(&seed_admin_config())
            .await
            .expect("Failed to bootstrap test database");

        TestDb {
            db,
            db_name,
            report,
        }
    }

    pub async fn cleanup(self) {
        self.db.database().drop(None).await.ok();
    }
}

pub fn seed_admin_config() -> SeedAdminConfig {
    SeedAdminConfig {
        username: TEST_ADMIN_USERNAME.to_string(),
        password: Secret::new(TEST_ADMIN_PASSWORD.to_string()),
        full_name: "Test Administrator".to_string(),
        email: "admin@test.local".to_string(),
    }
}

/// Server-side write error code, if the error was a write rejection.
///
/// 121 is a document validation failure, 11000 a duplicate key.
pub fn write_error_code(err: &mongodb::error::Error) -> Option<i32> {
    match err.kind.as_ref() {
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(we)) => {
            Some(we.code)
        }
        _ => None,
    }
}
