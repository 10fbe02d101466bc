use super::CacheKey;
use hopzero_application::ports::RecordCache;
use hopzero_domain::{RecordType, RecordValue};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Lifetime of every entry, counted from the moment it is stored.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    value: RecordValue,
    expires_at: Instant,
}

impl CacheEntry {
    #[inline]
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-process record cache with a fixed TTL per entry.
///
/// Readers share the lock, writers take it exclusively. Expired entries are
/// reported as absent but stay in the map: nothing evicts them and the map
/// has no size bound, which is fine for a process that runs one lookup.
pub struct TtlRecordCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl TtlRecordCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TtlRecordCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCache for TtlRecordCache {
    fn get(&self, domain: &str, record_type: RecordType) -> Option<RecordValue> {
        let key = CacheKey::new(domain, record_type);
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        let entry = entries.get(&key)?;
        if entry.is_live(Instant::now()) {
            Some(entry.value.clone())
        } else {
            debug!(domain = %domain, record_type = %record_type, "Cache entry expired");
            None
        }
    }

    fn put(&self, domain: &str, record_type: RecordType, value: RecordValue) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(CacheKey::new(domain, record_type), entry);

        debug!(domain = %domain, record_type = %record_type, ttl_secs = self.ttl.as_secs(), "Cached");
    }
}
