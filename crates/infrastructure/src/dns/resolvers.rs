//! `hickory-resolver` instances behind each [`ResolverHandle`].
//!
//! [`ResolverHandle`]: hopzero_domain::ResolverHandle

use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts,
};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioResolver;
use hopzero_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::{debug, warn};

/// Nameserver used when the platform configuration is missing or unreadable.
pub const FALLBACK_NAMESERVER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 53);

/// Where the system resolver takes its nameservers from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemSource {
    /// Platform configuration (`/etc/resolv.conf`, hosts file, search list)
    Platform,
    /// Explicit nameservers with default options
    Nameservers(Vec<SocketAddr>),
}

pub struct ResolverFactory;

impl ResolverFactory {
    /// Resolver for the platform default.
    ///
    /// Honors every configured nameserver plus the search, ndots, timeout
    /// and attempts options. Falls back to [`FALLBACK_NAMESERVER`] when the
    /// configuration cannot be read.
    pub fn system(source: &SystemSource) -> TokioResolver {
        match source {
            SystemSource::Platform => match read_system_conf() {
                Ok((config, opts)) => {
                    debug!(
                        nameservers = config.name_servers().len(),
                        search = config.search().len(),
                        "Loaded platform resolver configuration"
                    );
                    Self::build(config, opts)
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        fallback = %FALLBACK_NAMESERVER,
                        "Platform resolver configuration unavailable"
                    );
                    Self::build(
                        Self::nameserver_config(&[FALLBACK_NAMESERVER]),
                        ResolverOpts::default(),
                    )
                }
            },
            SystemSource::Nameservers(servers) => {
                Self::build(Self::nameserver_config(servers), ResolverOpts::default())
            }
        }
    }

    /// Resolver bound to one nameserver, one attempt per lookup.
    pub fn pinned(server: SocketAddr, timeout: Duration) -> TokioResolver {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        Self::build(Self::nameserver_config(&[server]), opts)
    }

    fn nameserver_config(servers: &[SocketAddr]) -> ResolverConfig {
        let mut group = NameServerConfigGroup::new();
        for server in servers {
            group.merge(NameServerConfigGroup::from_ips_clear(
                &[server.ip()],
                server.port(),
                true,
            ));
        }
        ResolverConfig::from_parts(None, Vec::new(), group)
    }

    fn build(config: ResolverConfig, mut opts: ResolverOpts) -> TokioResolver {
        opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build()
    }
}

/// `host:port` → first socket address it resolves to.
pub async fn resolve_server(server: &str) -> Result<SocketAddr, DomainError> {
    let mut addrs = tokio::net::lookup_host(server)
        .await
        .map_err(|e| DomainError::InvalidServerAddress(format!("{}: {}", server, e)))?;

    addrs
        .next()
        .ok_or_else(|| DomainError::InvalidServerAddress(server.to_string()))
}
