mod key;
mod ttl_cache;

pub use key::CacheKey;
pub use ttl_cache::{TtlRecordCache, DEFAULT_CACHE_TTL};
