use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_JWT_SECRET: &str = "your-256-bit-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub admin_username: String,
    pub admin_password: String,
}

impl AuthConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Loads the configuration from the process environment.
pub fn load() -> Result<AppConfig> {
    AppConfig::from_lookup(|key| std::env::var(key).ok())
}

impl AppConfig {
    /// Builds the configuration from `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = get_or("DB_USER", "postgres");
                let credentials = match get("DB_PASSWORD") {
                    Some(password) => format!("{}:{}", user, password),
                    None => user,
                };
                format!(
                    "postgres://{}@{}:{}/{}?sslmode={}",
                    credentials,
                    get_or("DB_HOST", "localhost"),
                    get_or("DB_PORT", "5432"),
                    get_or("DB_NAME", "restaurant"),
                    get_or("DB_SSLMODE", "disable"),
                )
            }
        };

        Ok(Self {
            server: ServerConfig {
                port: parse_or(get("PORT"), "PORT", 8000)?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_or(get("DB_POOL_SIZE"), "DB_POOL_SIZE", 10)?,
            },
            auth: AuthConfig {
                jwt_secret: get_or("JWT_SECRET", DEFAULT_JWT_SECRET),
                token_ttl_hours: parse_or(get("JWT_TTL_HOURS"), "JWT_TTL_HOURS", 24)?,
                admin_username: get_or("ADMIN_USERNAME", "admin"),
                admin_password: get_or("ADMIN_PASSWORD", "admin123"),
            },
            seed_demo_data: parse_or(get("SEED_DEMO_DATA"), "SEED_DEMO_DATA", false)?,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, value)),
        None => Ok(default),
    }
}
