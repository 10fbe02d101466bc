use super::RecordType;
use std::sync::Arc;

/// DNS query (domain + record type).
/// The domain keeps the case it was supplied with; it doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Fully qualified form of the domain (trailing dot).
    pub fn fqdn(&self) -> String {
        if self.domain.ends_with('.') {
            self.domain.to_string()
        } else {
            format!("{}.", self.domain)
        }
    }
}
