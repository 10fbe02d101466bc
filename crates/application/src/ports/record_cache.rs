use hopzero_domain::{RecordType, RecordValue};

/// Short-lived store of successful lookups keyed by (domain, record type).
///
/// `get` must treat expired entries as absent. Implementations are shared
/// between concurrent lookups.
pub trait RecordCache: Send + Sync {
    fn get(&self, domain: &str, record_type: RecordType) -> Option<RecordValue>;

    fn put(&self, domain: &str, record_type: RecordType, value: RecordValue);
}
