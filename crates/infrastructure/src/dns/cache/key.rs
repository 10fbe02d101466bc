use hopzero_domain::RecordType;

/// Cache key: domain exactly as supplied plus record type.
///
/// No case folding, so `Example.com` and `example.com` are separate entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: String,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }
}
