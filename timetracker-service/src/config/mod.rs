use service_core::config::{self as core_config, get_env, split_list};
use service_core::error::AppError;
use service_core::middleware::cors::CorsPolicy;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TimeTrackerConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub store: StoreConfig,
    pub cors: CorsPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub database: String,
}

impl TimeTrackerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let backend: StoreBackend = get_env("STORE_BACKEND", Some("mongodb"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let cors = CorsPolicy {
            allowed_origins: split_list(&get_env("CORS_ALLOWED_ORIGINS", Some("*"))?),
            allowed_methods: CorsPolicy::parse_methods(&split_list(&get_env(
                "CORS_ALLOWED_METHODS",
                Some("GET,POST,PUT,DELETE,OPTIONS"),
            )?))?,
            allow_credentials: parse_env("CORS_ALLOW_CREDENTIALS", false)?,
            max_age: Duration::from_secs(parse_env("CORS_MAX_AGE_SECONDS", 600u64)?),
        };

        let config = TimeTrackerConfig {
            common: common_config,
            service_name: get_env("SERVICE_NAME", Some("timetracker-service"))?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")))?,
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            store: StoreConfig {
                backend,
                uri: get_env("MONGO_URL", Some("mongodb://localhost:27017"))?,
                database: get_env("DB_NAME", Some("timetracker_db"))?,
            },
            cors,
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.store.database.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "DB_NAME must not be empty"
            )));
        }

        self.cors.validate()
    }
}

impl Default for TimeTrackerConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            service_name: "timetracker-service".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            store: StoreConfig {
                backend: StoreBackend::MongoDb,
                uri: "mongodb://localhost:27017".to_string(),
                database: "timetracker_db".to_string(),
            },
            cors: CorsPolicy::default(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("Invalid value for {}: {}", key, e))
        }),
        Err(_) => Ok(default),
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}
