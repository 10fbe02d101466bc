use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Which transport a lookup goes through.
///
/// Built once per invocation by [`ResolverHandle::select`] and never mutated.
/// A pinned address is kept as text: it is only turned into a socket address
/// when a lookup runs, so a malformed server shows up as a lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolverHandle {
    /// Platform resolver configuration
    System,
    /// A specific nameserver, always carrying a port
    Pinned(String),
}

impl ResolverHandle {
    /// Transport selector: empty input means the platform default.
    pub fn select(server: Option<&str>) -> Self {
        match server.map(str::trim) {
            None | Some("") => ResolverHandle::System,
            Some(addr) => ResolverHandle::Pinned(with_default_port(addr)),
        }
    }
}

impl fmt::Display for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverHandle::System => write!(f, "system resolver"),
            ResolverHandle::Pinned(addr) => write!(f, "dns://{}", addr),
        }
    }
}

/// Appends port 53 to a server address that has none.
///
/// Accepts `ip`, `ip:port`, `[v6]`, `[v6]:port`, bare IPv6, `host` and
/// `host:port`. Anything else is returned with `:53` appended and left for the
/// transport to reject.
pub fn with_default_port(addr: &str) -> String {
    let addr = addr.trim();

    if addr.parse::<SocketAddr>().is_ok() {
        return addr.to_string();
    }

    let unbracketed = addr
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(addr);
    if let Ok(ip) = unbracketed.parse::<IpAddr>() {
        return SocketAddr::new(ip, DEFAULT_DNS_PORT).to_string();
    }

    if let Some((host, port)) = addr.rsplit_once(':') {
        if !host.is_empty() && !host.contains(':') && port.parse::<u16>().is_ok() {
            return addr.to_string();
        }
    }

    format!("{}:{}", addr, DEFAULT_DNS_PORT)
}
