use hopzero_domain::{DomainError, RecordValue};

/// What a single lookup call ended with. Every variant has already been
/// logged by the time it is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Served from the TTL cache without touching the transport
    CacheHit(RecordValue),
    /// Fetched from the transport
    Resolved(RecordValue),
    /// The server answered, but with nothing usable
    NotFound,
    /// Every attempt failed; carries the last error
    Failed(DomainError),
    /// The record-type tag is not routed by the dispatcher
    Unsupported(String),
}

impl LookupOutcome {
    pub fn value(&self) -> Option<&RecordValue> {
        match self {
            LookupOutcome::CacheHit(value) | LookupOutcome::Resolved(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.value().is_some()
    }
}
