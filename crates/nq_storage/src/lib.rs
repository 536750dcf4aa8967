use std::time::Duration;

pub mod clock;
pub mod memory;

pub use clock::{Clock, SystemClock};
pub use memory::MetadataCache;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a metadata snapshot stays fresh.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
        }
    }
}

pub mod prelude {
    pub use super::{CacheConfig, Clock, MetadataCache, SystemClock};
}
