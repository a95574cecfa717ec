use clap::Parser;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_CACHE_MAX_AGE_SECS: u32 = 3600;
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

/// Runtime configuration. Every flag can also be set from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "calspend", about = "California spending transparency API", version)]
pub struct Config {
    /// Database connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "CALSPEND_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// `max-age` sent on listing responses, in seconds
    #[arg(long, env = "CALSPEND_CACHE_MAX_AGE", default_value_t = DEFAULT_CACHE_MAX_AGE_SECS)]
    pub cache_max_age: u32,

    /// Upper bound for the `limit` query parameter
    #[arg(long, env = "CALSPEND_MAX_PAGE_SIZE", default_value_t = DEFAULT_MAX_PAGE_SIZE,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub max_page_size: u64,

    /// Create missing tables on startup (local development only)
    #[arg(long, env = "CALSPEND_MIGRATE", default_value_t = false)]
    pub migrate: bool,

    /// Allowed CORS origin; any origin when unset
    #[arg(long, env = "CALSPEND_CORS_ORIGIN")]
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cache_max_age: DEFAULT_CACHE_MAX_AGE_SECS,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            migrate: false,
            cors_origin: None,
        }
    }
}
