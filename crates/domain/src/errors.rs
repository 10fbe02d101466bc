use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS server address: {0}")]
    InvalidServerAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("No such host: {0}")]
    NxDomain(String),

    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),
}
