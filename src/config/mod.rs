use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub database_max_connections: u32,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub server_host: String,
    pub server_port: u16,
    pub full_page_ttl_secs: u64,
    pub partial_page_ttl_secs: u64,
}

// 未配置时使用的默认值
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW: u64 = 60;
const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;
const DEFAULT_FULL_PAGE_TTL: u64 = 30 * 60;
const DEFAULT_PARTIAL_PAGE_TTL: u64 = 10 * 60;

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.into()),
            server_port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            rate_limit_window_secs: parse_or("RATE_LIMIT_WINDOW", DEFAULT_RATE_LIMIT_WINDOW),
            rate_limit_requests: parse_or("RATE_LIMIT_REQUESTS", DEFAULT_RATE_LIMIT_REQUESTS),
            full_page_ttl_secs: parse_or("TIMELINE_FULL_PAGE_TTL", DEFAULT_FULL_PAGE_TTL),
            partial_page_ttl_secs: parse_or("TIMELINE_PARTIAL_PAGE_TTL", DEFAULT_PARTIAL_PAGE_TTL),
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn full_page_ttl(&self) -> Duration {
        Duration::from_secs(self.full_page_ttl_secs)
    }

    pub fn partial_page_ttl(&self) -> Duration {
        Duration::from_secs(self.partial_page_ttl_secs)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}, using default", key);
            default
        }),
        Err(_) => default,
    }
}
