use std::fmt;
use std::net::IpAddr;

/// Mail exchanger (host, preference) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub host: String,
    pub preference: u16,
}

impl MxRecord {
    pub fn new(host: impl Into<String>, preference: u16) -> Self {
        Self {
            host: host.into(),
            preference,
        }
    }
}

impl fmt::Display for MxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Pref: {})", self.host, self.preference)
    }
}

/// Start of authority fields, as carried in the answer section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaRecord {
    /// Primary name server for the zone
    pub primary_ns: String,
    /// Responsible mailbox, in domain-name form
    pub mailbox: String,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum_ttl: u32,
}

impl fmt::Display for SoaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.primary_ns,
            self.mailbox,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum_ttl
        )
    }
}

/// Typed result of a successful lookup, one case per record shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Addresses(Vec<IpAddr>),
    MailExchangers(Vec<MxRecord>),
    Texts(Vec<String>),
    NameServers(Vec<String>),
    /// Empty string means the name has no alias
    CanonicalName(String),
    Soa(Vec<SoaRecord>),
    Hostnames(Vec<String>),
}

impl RecordValue {
    pub fn is_empty(&self) -> bool {
        match self {
            RecordValue::Addresses(v) => v.is_empty(),
            RecordValue::MailExchangers(v) => v.is_empty(),
            RecordValue::Texts(v) => v.is_empty(),
            RecordValue::NameServers(v) => v.is_empty(),
            RecordValue::CanonicalName(name) => name.is_empty(),
            RecordValue::Soa(v) => v.is_empty(),
            RecordValue::Hostnames(v) => v.is_empty(),
        }
    }

    /// One printable line per item, in answer order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            RecordValue::Addresses(v) => v.iter().map(ToString::to_string).collect(),
            RecordValue::MailExchangers(v) => v.iter().map(ToString::to_string).collect(),
            RecordValue::Texts(v) | RecordValue::NameServers(v) | RecordValue::Hostnames(v) => {
                v.clone()
            }
            RecordValue::CanonicalName(name) => vec![format!("CNAME: {}", name)],
            RecordValue::Soa(v) => v.iter().map(|soa| format!("SOA: {}", soa)).collect(),
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            write!(f, "]")
        }

        match self {
            RecordValue::Addresses(v) => list(f, v),
            RecordValue::MailExchangers(v) => list(f, v),
            RecordValue::Texts(v) | RecordValue::NameServers(v) | RecordValue::Hostnames(v) => {
                list(f, v)
            }
            RecordValue::CanonicalName(name) => write!(f, "{}", name),
            RecordValue::Soa(v) => list(f, v),
        }
    }
}

/// Addresses usable as A records. IPv4-mapped IPv6 addresses count as IPv4
/// and are reported in dotted-quad form.
pub fn ipv4_only(addresses: &[IpAddr]) -> Vec<IpAddr> {
    addresses
        .iter()
        .filter_map(|ip| match ip {
            IpAddr::V4(v4) => Some(IpAddr::V4(*v4)),
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4),
        })
        .collect()
}

/// Addresses usable as AAAA records: IPv6 that is not an IPv4-mapped address.
pub fn ipv6_only(addresses: &[IpAddr]) -> Vec<IpAddr> {
    addresses
        .iter()
        .filter(|ip| match ip {
            IpAddr::V4(_) => false,
            IpAddr::V6(v6) => v6.to_ipv4_mapped().is_none(),
        })
        .copied()
        .collect()
}
