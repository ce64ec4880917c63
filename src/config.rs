use std::env;

const DEFAULT_TOKEN_SECRET: &str = "default-secret-change-me";

/// Runtime configuration, read once from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub token_secret: String,
    pub token_ttl_hours: i64,
    /// Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let token_secret = env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            log::warn!("⚠️  ACCESS_TOKEN_SECRET not set, using the development default");
            DEFAULT_TOKEN_SECRET.to_string()
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 5000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "gpuHunt".to_string()),
            token_secret,
            token_ttl_hours: parse_or("TOKEN_TTL_HOURS", 24),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️  Invalid value for {}: {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
