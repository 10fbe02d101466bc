use hopzero_application::ports::{DnsTransport, RecordCache};
use hopzero_application::use_cases::{ResolveRecordUseCase, ReverseLookupUseCase};
use hopzero_domain::Config;
use hopzero_infrastructure::dns::{TtlRecordCache, WireDnsTransport};
use std::sync::Arc;

/// Use cases wired to the UDP transport and one shared TTL cache.
pub struct UseCases {
    pub resolve_record: ResolveRecordUseCase,
    pub reverse_lookup: ReverseLookupUseCase,
}

impl UseCases {
    pub fn new(config: &Config) -> Self {
        let transport: Arc<dyn DnsTransport> = Arc::new(WireDnsTransport::new());
        let cache: Arc<dyn RecordCache> =
            Arc::new(TtlRecordCache::with_ttl(config.lookup.cache_ttl()));

        Self {
            resolve_record: ResolveRecordUseCase::new(
                transport.clone(),
                cache,
                config.lookup.clone(),
            ),
            reverse_lookup: ReverseLookupUseCase::new(transport, config.lookup.attempts),
        }
    }
}
