pub mod dns_transport;
pub mod record_cache;

pub use dns_transport::DnsTransport;
pub use record_cache::RecordCache;
