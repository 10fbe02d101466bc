//! HopZero Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod resolver_handle;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, LookupConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{ipv4_only, ipv6_only, MxRecord, RecordType, RecordValue, SoaRecord};
pub use errors::DomainError;
pub use resolver_handle::{with_default_port, ResolverHandle, DEFAULT_DNS_PORT};
