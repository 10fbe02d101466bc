use crate::ports::{DnsTransport, RecordCache};
use crate::services::{with_timeout_and_retry, Deadline, RetryPolicy};
use hopzero_domain::{
    ipv4_only, ipv6_only, with_default_port, DnsQuery, DomainError, LookupConfig, RecordType,
    RecordValue, ResolverHandle,
};
use std::sync::Arc;
use tracing::{error, info};

use super::LookupOutcome;

/// Input of a forward lookup, as validated by the command line layer
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub domain: String,
    /// Record-type tag as typed by the user, any case
    pub record_type: String,
    /// Custom DNS server; `None` or empty means the platform resolver
    pub server: Option<String>,
    pub cache_enabled: bool,
}

impl LookupRequest {
    pub fn new(domain: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            record_type: record_type.into(),
            server: None,
            cache_enabled: true,
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

/// Use case: resolve one record type for one domain.
///
/// Dispatches on the record-type tag, consults the TTL cache, runs the
/// transport under the retry policy and logs every outcome. Failures stop at
/// this boundary: they are logged and returned, never propagated.
pub struct ResolveRecordUseCase {
    transport: Arc<dyn DnsTransport>,
    cache: Arc<dyn RecordCache>,
    config: LookupConfig,
}

impl ResolveRecordUseCase {
    pub fn new(
        transport: Arc<dyn DnsTransport>,
        cache: Arc<dyn RecordCache>,
        config: LookupConfig,
    ) -> Self {
        Self {
            transport,
            cache,
            config,
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.attempts, self.config.attempt_timeout())
    }

    pub async fn execute(&self, request: &LookupRequest) -> LookupOutcome {
        let tag = request.record_type.trim().to_uppercase();

        let Some(record_type) = RecordType::parse_forward(&tag) else {
            info!(record_type = %tag, "Unsupported record type: {}", tag);
            return LookupOutcome::Unsupported(tag);
        };

        let query = DnsQuery::new(request.domain.as_str(), record_type);

        match record_type {
            RecordType::SOA => self.resolve_soa(&query, request.server.as_deref()).await,
            _ => {
                let handle = ResolverHandle::select(request.server.as_deref());
                self.resolve_cached(&handle, &query, request.cache_enabled)
                    .await
            }
        }
    }

    async fn resolve_cached(
        &self,
        handle: &ResolverHandle,
        query: &DnsQuery,
        cache_enabled: bool,
    ) -> LookupOutcome {
        let record_type = query.record_type;
        info!(
            domain = %query.domain,
            resolver = %handle,
            "Resolving {} records...",
            record_type
        );

        if cache_enabled {
            if let Some(cached) = self.cache.get(&query.domain, record_type) {
                info!("Cache hit for {} record: {}", record_type, cached);
                return LookupOutcome::CacheHit(cached);
            }
        }

        let result = with_timeout_and_retry(self.retry_policy(), move |deadline| {
            self.fetch(handle, query, deadline)
        })
        .await;

        match result {
            Ok(value) if value.is_empty() => {
                info!(
                    domain = %query.domain,
                    "No {} records found for {}",
                    record_type,
                    query.domain
                );
                LookupOutcome::NotFound
            }
            Ok(value) => {
                for line in value.lines() {
                    info!("{}", line);
                }
                if cache_enabled {
                    self.cache.put(&query.domain, record_type, value.clone());
                }
                LookupOutcome::Resolved(value)
            }
            Err(e) => {
                error!(
                    domain = %query.domain,
                    error = %e,
                    "{} lookup for {} failed after {} attempts: {}",
                    record_type,
                    query.domain,
                    self.retry_policy().attempts.max(1),
                    e
                );
                LookupOutcome::Failed(e)
            }
        }
    }

    /// One transport round for the cached record types, filtered per type.
    async fn fetch(
        &self,
        handle: &ResolverHandle,
        query: &DnsQuery,
        deadline: Deadline,
    ) -> Result<RecordValue, DomainError> {
        let domain = query.domain.as_ref();

        match query.record_type {
            RecordType::A => {
                let addresses = self.transport.lookup_ip(handle, domain, deadline).await?;
                Ok(RecordValue::Addresses(ipv4_only(&addresses)))
            }
            RecordType::AAAA => {
                let addresses = self.transport.lookup_ip(handle, domain, deadline).await?;
                Ok(RecordValue::Addresses(ipv6_only(&addresses)))
            }
            RecordType::MX => Ok(RecordValue::MailExchangers(
                self.transport.lookup_mx(handle, domain, deadline).await?,
            )),
            RecordType::TXT => Ok(RecordValue::Texts(
                self.transport.lookup_txt(handle, domain, deadline).await?,
            )),
            RecordType::NS => Ok(RecordValue::NameServers(
                self.transport.lookup_ns(handle, domain, deadline).await?,
            )),
            RecordType::CNAME => Ok(RecordValue::CanonicalName(
                self.transport.lookup_cname(handle, domain, deadline).await?,
            )),
            RecordType::SOA | RecordType::PTR => Err(DomainError::UnsupportedRecordType(
                query.record_type.to_string(),
            )),
        }
    }

    /// SOA goes straight to one server: no cache, no retry.
    async fn resolve_soa(&self, query: &DnsQuery, server: Option<&str>) -> LookupOutcome {
        info!("Resolving SOA record for domain: {}", query.domain);

        let server = match server.map(str::trim).filter(|s| !s.is_empty()) {
            Some(server) => with_default_port(server),
            None => with_default_port(&self.config.soa_server),
        };

        match self
            .transport
            .query_soa(&server, &query.fqdn(), self.config.soa_timeout())
            .await
        {
            Err(e) => {
                error!(server = %server, error = %e, "Error querying DNS server {}: {}", server, e);
                LookupOutcome::Failed(e)
            }
            Ok(records) if records.is_empty() => {
                info!("No SOA record found for domain: {}", query.domain);
                LookupOutcome::NotFound
            }
            Ok(records) => {
                for soa in &records {
                    info!(
                        primary_ns = %soa.primary_ns,
                        mailbox = %soa.mailbox,
                        serial = soa.serial,
                        refresh = soa.refresh,
                        retry = soa.retry,
                        expire = soa.expire,
                        minimum_ttl = soa.minimum_ttl,
                        "SOA: {}",
                        soa
                    );
                }
                LookupOutcome::Resolved(RecordValue::Soa(records))
            }
        }
    }
}
