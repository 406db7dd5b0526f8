use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// When set, locks live in Redis instead of the `distributed_locks` table.
    pub redis_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub lock_ttl: Duration,
    /// Written as the holder marker on every lock this process takes.
    pub instance_id: String,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://cinema.db?mode=rwc".to_string());

        let redis_url = env::var("REDIS_URL").ok().filter(|url| !url.is_empty());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let lock_ttl_seconds: u64 = env::var("LOCK_TTL_SECONDS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidLockTtl)?;
        if lock_ttl_seconds == 0 {
            return Err(ConfigError::InvalidLockTtl);
        }

        let instance_id =
            env::var("INSTANCE_ID").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name =
            env::var("SERVICE_NAME").unwrap_or_else(|_| "cinema-seats".to_string());

        let metrics_port = match env::var("METRICS_PORT") {
            Ok(port) => Some(port.parse().map_err(|_| ConfigError::InvalidMetricsPort)?),
            Err(_) => None,
        };

        Ok(Config {
            database_url,
            redis_url,
            server_host,
            server_port,
            lock_ttl: Duration::from_secs(lock_ttl_seconds),
            instance_id,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid metrics port number")]
    InvalidMetricsPort,

    #[error("LOCK_TTL_SECONDS must be a positive integer")]
    InvalidLockTtl,
}
