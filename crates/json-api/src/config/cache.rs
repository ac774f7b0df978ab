//! Cache Config

use std::time::Duration;

use clap::Args;

/// Book listing cache settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// How long a cached book listing stays fresh, in seconds
    #[arg(long, env = "BOOKS_CACHE_TTL_SECONDS", default_value_t = 30_u64)]
    pub books_cache_ttl_seconds: u64,
}

impl CacheConfig {
    #[must_use]
    pub fn books_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.books_cache_ttl_seconds)
    }
}
