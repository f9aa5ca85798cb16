use std::{env, str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub request_timeout: Duration,
    /// Failed password resets tolerated before the account is deactivated.
    pub max_reset_attempts: i32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_or("APP_PORT", 3000);
        let db_max_connections = env_or("DB_MAX_CONNECTIONS", 10);
        let db_acquire_timeout = Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 5));
        let request_timeout = Duration::from_secs(env_or("REQUEST_TIMEOUT_SECS", 15));
        let max_reset_attempts = env_or("MAX_RESET_ATTEMPTS", 5);
        Ok(Self {
            port,
            database_url,
            host,
            db_max_connections,
            db_acquire_timeout,
            request_timeout,
            max_reset_attempts,
        })
    }

    /// Defaults used by tests and tooling that only know the database url.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_max_connections: 5,
            db_acquire_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            max_reset_attempts: 5,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
