use secrecy::Secret;
use serde::Deserialize;
use std::env;
use ticket_core::error::AppError;

/// Development default for the seed credential, matching the original demo.
/// Never used when `ENVIRONMENT` is production; always logged as a warning.
pub const DEV_DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub mongodb: MongoConfig,
    pub seed_admin: SeedAdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct SeedAdminConfig {
    pub username: String,
    pub password: Secret<String>,
    pub full_name: String,
    pub email: String,
}

impl BootstrapConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let is_prod = environment == "production" || environment == "prod";

        Ok(BootstrapConfig {
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("ticket_management"), is_prod)?,
            },
            seed_admin: SeedAdminConfig {
                username: get_env("ADMIN_USERNAME", Some("admin"), is_prod)?,
                // No production default: the operator must supply the credential.
                password: Secret::new(get_env(
                    "ADMIN_PASSWORD",
                    Some(DEV_DEFAULT_ADMIN_PASSWORD),
                    is_prod,
                )?),
                full_name: get_env("ADMIN_FULL_NAME", Some("System Administrator"), is_prod)?,
                email: get_env("ADMIN_EMAIL", Some("admin@ticketmanagement.com"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
