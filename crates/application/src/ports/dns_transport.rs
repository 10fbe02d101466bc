use async_trait::async_trait;
use hopzero_domain::{DomainError, MxRecord, ResolverHandle, SoaRecord};
use std::net::IpAddr;
use std::time::Duration;

use crate::services::Deadline;

/// Name-resolution transport.
///
/// Every forward and reverse method receives the attempt's [`Deadline`] and
/// must return once it has passed. An empty `Ok` means the server answered
/// without records; transport problems, timeouts and error rcodes are `Err`.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// All addresses for `domain`, both families.
    async fn lookup_ip(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<IpAddr>, DomainError>;

    async fn lookup_mx(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<MxRecord>, DomainError>;

    async fn lookup_txt(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<String>, DomainError>;

    async fn lookup_ns(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<String>, DomainError>;

    /// Canonical name of `domain`; empty when it is not an alias.
    async fn lookup_cname(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<String, DomainError>;

    /// Host names for an address (PTR).
    async fn lookup_ptr(
        &self,
        handle: &ResolverHandle,
        address: &str,
        deadline: Deadline,
    ) -> Result<Vec<String>, DomainError>;

    /// Single raw SOA exchange with `server` (`host:port`) for `fqdn`.
    async fn query_soa(
        &self,
        server: &str,
        fqdn: &str,
        timeout: Duration,
    ) -> Result<Vec<SoaRecord>, DomainError>;
}
