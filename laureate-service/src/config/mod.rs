use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct LaureateConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub seed: SeedConfig,
    pub heartbeat: HeartbeatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Wipe and reseed the collection before serving.
    pub reset: bool,
    /// Read the dataset from this file instead of the bundled one.
    pub dataset_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeartbeatConfig {
    pub interval_seconds: u64,
    pub ping_timeout_ms: u64,
}

impl HeartbeatConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }
}

impl LaureateConfig {
    pub fn load() -> Result<Self, AppError> {
        let mut common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        if let Ok(port) = env::var("PORT") {
            common_config.port = port.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("PORT must be a port number: {}", e))
            })?;
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            common_config.log_level = level;
        }
        if let Ok(endpoint) = env::var("OTLP_ENDPOINT") {
            common_config.otlp_endpoint = Some(endpoint).filter(|e| !e.is_empty());
        }

        Ok(LaureateConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGO_URL", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("project-mongo"), false)?,
            },
            seed: SeedConfig {
                reset: env::var("RESET_DB").map(|v| is_truthy(&v)).unwrap_or(false),
                dataset_path: env::var("SEED_DATASET_PATH").ok().filter(|p| !p.is_empty()),
            },
            heartbeat: HeartbeatConfig {
                interval_seconds: get_env("DB_HEARTBEAT_SECONDS", Some("5"), false)?
                    .parse()
                    .unwrap_or(5),
                ping_timeout_ms: get_env("DB_PING_TIMEOUT_MS", Some("2000"), false)?
                    .parse()
                    .unwrap_or(2000),
            },
        })
    }
}

/// Any value other than empty, `0`, `false` or `no` switches a flag on.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no"))
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
