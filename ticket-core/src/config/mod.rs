use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "development".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::default())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Production environments must not rely on development defaults.
    pub fn is_production(&self) -> bool {
        self.environment == "production" || self.environment == "prod"
    }
}
