use crate::config::{SeedAdminConfig, DEV_DEFAULT_ADMIN_PASSWORD};
use crate::models::{Admin, AdminRole, Customer, Event, Ticket};
use crate::schema;
use mongodb::{
    bson::{doc, Document},
    error::ErrorKind,
    options::{CreateCollectionOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use secrecy::ExposeSecret;
use ticket_core::error::AppError;
use ticket_core::utils::{hash_password, Password};

/// What a bootstrap run actually did against the database.
///
/// Re-runs against an initialized database report all-zero counts.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    pub collections_created: u64,
    pub indexes_created: u64,
    pub admin_seeded: bool,
}

#[derive(Clone)]
pub struct TicketDb {
    client: MongoClient,
    db: Database,
}

impl TicketDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn admins(&self) -> Collection<Admin> {
        self.db.collection("admins")
    }

    pub fn customers(&self) -> Collection<Customer> {
        self.db.collection("customers")
    }

    pub fn events(&self) -> Collection<Event> {
        self.db.collection("events")
    }

    pub fn tickets(&self) -> Collection<Ticket> {
        self.db.collection("tickets")
    }

    /// Run the full bootstrap sequence: collections, then indexes, then the
    /// seed admin. Steps run strictly in order and the first failure halts
    /// the run; there is no rollback of earlier steps.
    ///
    /// The sequence is idempotent. Existing collections, indexes, and seed
    /// admin are treated as success, so re-running against an initialized
    /// database exits cleanly.
    pub async fn initialize(&self, seed_admin: &SeedAdminConfig) -> Result<BootstrapReport, AppError> {
        let mut report = BootstrapReport::default();

        report.collections_created = self.ensure_collections().await?;
        report.indexes_created = self.ensure_indexes().await?;
        report.admin_seeded = self.seed_admin(seed_admin).await?;

        Ok(report)
    }

    /// Create the four collections with their `$jsonSchema` validators.
    ///
    /// Collections that already exist are skipped; returns how many were
    /// newly created.
    pub async fn ensure_collections(&self) -> Result<u64, AppError> {
        tracing::info!("Creating collections with validators");

        let existing = self
            .db
            .list_collection_names(None)
            .await
            .map_err(AppError::from)?;

        let mut created = 0;
        for name in schema::COLLECTIONS {
            if existing.iter().any(|c| c == name) {
                tracing::info!(collection = %name, "Collection already exists, skipping");
                continue;
            }

            let validator = schema::validator_for(name).ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!("No validator defined for {}", name))
            })?;

            let options = CreateCollectionOptions::builder()
                .validator(validator)
                .build();

            match self.db.create_collection(name, options).await {
                Ok(()) => {
                    tracing::info!(collection = %name, "Created collection");
                    created += 1;
                }
                // Lost a race with a concurrent bootstrap; same outcome.
                Err(e) if is_namespace_exists(&e) => {
                    tracing::info!(collection = %name, "Collection already exists, skipping");
                }
                Err(e) => {
                    tracing::error!(collection = %name, "Failed to create collection: {}", e);
                    return Err(AppError::from(e));
                }
            }
        }

        Ok(created)
    }

    /// Build the lookup, uniqueness, and text-search indexes for all four
    /// collections. `createIndex` with identical keys and options is a no-op
    /// on the server, so re-runs are safe.
    pub async fn ensure_indexes(&self) -> Result<u64, AppError> {
        tracing::info!("Creating indexes");

        let mut created = 0;
        for (collection, indexes) in [
            ("admins", admin_indexes()),
            ("customers", customer_indexes()),
            ("events", event_indexes()),
            ("tickets", ticket_indexes()),
        ] {
            for index in indexes {
                let name = index
                    .options
                    .as_ref()
                    .and_then(|o| o.name.clone())
                    .unwrap_or_default();

                self.db
                    .collection::<Document>(collection)
                    .create_index(index, None)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            collection = %collection,
                            index = %name,
                            "Failed to create index: {}",
                            e
                        );
                        AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
                    })?;

                tracing::info!(collection = %collection, index = %name, "Created index");
                created += 1;
            }
        }

        Ok(created)
    }

    /// Insert the initial administrator unless one with the configured
    /// username already exists. Returns whether a new admin was inserted.
    ///
    /// The password is hashed here at bootstrap time; only the hash is
    /// persisted.
    pub async fn seed_admin(&self, config: &SeedAdminConfig) -> Result<bool, AppError> {
        let existing = self
            .admins()
            .find_one(doc! { "username": &config.username }, None)
            .await
            .map_err(AppError::from)?;

        if existing.is_some() {
            tracing::info!(username = %config.username, "Seed admin already exists, skipping");
            return Ok(false);
        }

        if config.password.expose_secret() == DEV_DEFAULT_ADMIN_PASSWORD {
            tracing::warn!(
                username = %config.username,
                "Seeding admin with the development default password; rotate it before exposing this system"
            );
        }

        let password = Password::new(config.password.expose_secret().clone());
        let password_hash = hash_password(&password).map_err(AppError::InternalError)?;

        let mut admin = Admin::new(
            config.username.clone(),
            password_hash.into_string(),
            AdminRole::SuperAdmin,
        );
        admin.full_name = Some(config.full_name.clone());
        admin.email = Some(config.email.clone());

        self.admins().insert_one(&admin, None).await.map_err(|e| {
            tracing::error!(username = %config.username, "Failed to insert seed admin: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(username = %config.username, role = %admin.role, "Seeded default admin");
        Ok(true)
    }
}

fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(c) if c.code == 48)
}

fn admin_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .name("username_unique_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build(),
        // Sparse so admins without an email do not collide on null
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_unique_idx".to_string())
                    .unique(true)
                    .sparse(true)
                    .build(),
            )
            .build(),
    ]
}

fn customer_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_unique_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "full_name": "text" })
            .options(
                IndexOptions::builder()
                    .name("full_name_text_idx".to_string())
                    .build(),
            )
            .build(),
    ]
}

fn event_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "event_name": "text", "description": "text" })
            .options(
                IndexOptions::builder()
                    .name("event_text_idx".to_string())
                    .build(),
            )
            .build(),
        // Chronological listing of upcoming events
        IndexModel::builder()
            .keys(doc! { "event_date": 1 })
            .options(
                IndexOptions::builder()
                    .name("event_date_idx".to_string())
                    .build(),
            )
            .build(),
    ]
}

fn ticket_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("customer_id_idx".to_string())
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "event_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("event_id_idx".to_string())
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "qr_code_data": 1 })
            .options(
                IndexOptions::builder()
                    .name("qr_code_data_unique_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "check_in_status": 1 })
            .options(
                IndexOptions::builder()
                    .name("check_in_status_idx".to_string())
                    .build(),
            )
            .build(),
        // One ticket per customer per event
        IndexModel::builder()
            .keys(doc! { "customer_id": 1, "event_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("customer_event_unique_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build(),
    ]
}
