use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::resolvers::{resolve_server, ResolverFactory, SystemSource};
use super::transport::{TcpTransport, UdpTransport};
use async_trait::async_trait;
use hickory_resolver::proto::rr::{RData, RecordType as WireRecordType};
use hickory_resolver::{ResolveError, TokioResolver};
use hopzero_application::ports::DnsTransport;
use hopzero_application::services::Deadline;
use hopzero_domain::{DomainError, MxRecord, RecordType, ResolverHandle, SoaRecord};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// [`DnsTransport`] backed by `hickory-resolver` for record lookups and by a
/// raw UDP exchange with TCP fallback for SOA queries.
///
/// The system resolver is built on first use and shared afterwards. Pinned
/// handles get a single-nameserver resolver per lookup, so a malformed server
/// string only fails the lookup that uses it.
pub struct WireDnsTransport {
    system_source: SystemSource,
    system: OnceCell<Arc<TokioResolver>>,
}

impl WireDnsTransport {
    pub fn new() -> Self {
        Self::with_system_source(SystemSource::Platform)
    }

    /// System handle served by `nameservers` instead of the platform config.
    pub fn with_nameservers(nameservers: Vec<SocketAddr>) -> Self {
        Self::with_system_source(SystemSource::Nameservers(nameservers))
    }

    fn with_system_source(system_source: SystemSource) -> Self {
        Self {
            system_source,
            system: OnceCell::new(),
        }
    }

    async fn resolver_for(
        &self,
        handle: &ResolverHandle,
        deadline: Deadline,
    ) -> Result<Arc<TokioResolver>, DomainError> {
        match handle {
            ResolverHandle::System => {
                let resolver = self
                    .system
                    .get_or_init(|| async { Arc::new(ResolverFactory::system(&self.system_source)) })
                    .await;
                Ok(resolver.clone())
            }
            ResolverHandle::Pinned(server) => {
                let server = resolve_server(server).await?;
                Ok(Arc::new(ResolverFactory::pinned(server, deadline.remaining())))
            }
        }
    }

    /// Runs one resolver lookup under `deadline`.
    ///
    /// `Ok(None)` means the server answered without records of that type.
    async fn settle<T>(
        domain: &str,
        deadline: Deadline,
        lookup: impl Future<Output = Result<T, ResolveError>>,
    ) -> Result<Option<T>, DomainError> {
        match tokio::time::timeout_at(deadline.instant(), lookup).await {
            Err(_) => Err(DomainError::QueryTimeout),
            Ok(Ok(found)) => Ok(Some(found)),
            Ok(Err(e)) if e.is_nx_domain() => Err(DomainError::NxDomain(domain.to_string())),
            Ok(Err(e)) if e.is_no_records_found() => Ok(None),
            Ok(Err(e)) => Err(DomainError::LookupFailed(e.to_string())),
        }
    }

    async fn prepare(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        record_type: RecordType,
        deadline: Deadline,
    ) -> Result<Arc<TokioResolver>, DomainError> {
        if deadline.is_expired() {
            return Err(DomainError::QueryTimeout);
        }

        let resolver = self.resolver_for(handle, deadline).await?;
        debug!(
            resolver = %handle,
            domain = %domain,
            record_type = %record_type,
            "Sending DNS query"
        );
        Ok(resolver)
    }

    /// SOA exchange: UDP first, TCP when the reply is truncated.
    async fn exchange_soa(
        &self,
        server: SocketAddr,
        fqdn: &str,
        deadline: Deadline,
    ) -> Result<DnsResponse, DomainError> {
        let query = MessageBuilder::build_query(fqdn, &RecordType::SOA)?;

        debug!(server = %server, domain = %fqdn, record_type = "SOA", "Sending DNS query");

        let bytes = UdpTransport::new(server)
            .send(&query, deadline.remaining())
            .await?;
        let response = ResponseParser::parse(&bytes)?;
        if !response.truncated {
            return Ok(response);
        }

        debug!(server = %server, "Response truncated (TC bit), retrying via TCP");

        let bytes = TcpTransport::new(server)
            .send(&query, deadline.remaining())
            .await?;
        let response = ResponseParser::parse(&bytes)?;
        if response.truncated {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Truncated response from {} over TCP",
                server
            )));
        }
        Ok(response)
    }
}

impl Default for WireDnsTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsTransport for WireDnsTransport {
    /// A and AAAA together; one family without records is tolerated as long
    /// as the other answers.
    async fn lookup_ip(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<IpAddr>, DomainError> {
        let resolver = self.prepare(handle, domain, RecordType::A, deadline).await?;
        let found = Self::settle(domain, deadline, resolver.lookup_ip(domain)).await?;
        Ok(found
            .map(|lookup| lookup.iter().collect())
            .unwrap_or_default())
    }

    async fn lookup_mx(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<MxRecord>, DomainError> {
        let resolver = self.prepare(handle, domain, RecordType::MX, deadline).await?;
        let found = Self::settle(domain, deadline, resolver.mx_lookup(domain)).await?;
        Ok(found
            .map(|lookup| {
                lookup
                    .iter()
                    .map(|mx| MxRecord::new(mx.exchange().to_utf8(), mx.preference()))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// One string per TXT record, character-strings concatenated.
    async fn lookup_txt(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<String>, DomainError> {
        let resolver = self.prepare(handle, domain, RecordType::TXT, deadline).await?;
        let found = Self::settle(domain, deadline, resolver.txt_lookup(domain)).await?;
        Ok(found
            .map(|lookup| {
                lookup
                    .iter()
                    .map(|txt| {
                        txt.txt_data()
                            .iter()
                            .map(|part| String::from_utf8_lossy(part).into_owned())
                            .collect::<String>()
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn lookup_ns(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<Vec<String>, DomainError> {
        let resolver = self.prepare(handle, domain, RecordType::NS, deadline).await?;
        let found = Self::settle(domain, deadline, resolver.ns_lookup(domain)).await?;
        Ok(found
            .map(|lookup| lookup.iter().map(|ns| ns.0.to_utf8()).collect())
            .unwrap_or_default())
    }

    /// First alias in the answer, empty when the name has none.
    async fn lookup_cname(
        &self,
        handle: &ResolverHandle,
        domain: &str,
        deadline: Deadline,
    ) -> Result<String, DomainError> {
        let resolver = self
            .prepare(handle, domain, RecordType::CNAME, deadline)
            .await?;
        let found = Self::settle(
            domain,
            deadline,
            resolver.lookup(domain, WireRecordType::CNAME),
        )
        .await?;
        Ok(found
            .and_then(|lookup| {
                lookup.iter().find_map(|rdata| match rdata {
                    RData::CNAME(canonical) => Some(canonical.0.to_utf8()),
                    _ => None,
                })
            })
            .unwrap_or_default())
    }

    async fn lookup_ptr(
        &self,
        handle: &ResolverHandle,
        address: &str,
        deadline: Deadline,
    ) -> Result<Vec<String>, DomainError> {
        let ip: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(address.to_string()))?;

        let resolver = self.prepare(handle, address, RecordType::PTR, deadline).await?;
        let found = Self::settle(address, deadline, resolver.reverse_lookup(ip)).await?;
        Ok(found
            .map(|lookup| lookup.iter().map(|ptr| ptr.0.to_utf8()).collect())
            .unwrap_or_default())
    }

    /// Answer section only; the rcode is not inspected, so NXDOMAIN reads as
    /// "no SOA records".
    async fn query_soa(
        &self,
        server: &str,
        fqdn: &str,
        timeout: Duration,
    ) -> Result<Vec<SoaRecord>, DomainError> {
        let deadline = Deadline::after(timeout);
        let server = resolve_server(server).await?;
        let response = self.exchange_soa(server, fqdn, deadline).await?;

        debug!(
            server = %server,
            rcode = ?response.rcode,
            answers = response.answers.len(),
            "SOA response"
        );
        Ok(response.soa_records())
    }
}
