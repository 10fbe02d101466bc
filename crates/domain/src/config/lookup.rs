use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lookup orchestration settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Attempts per lookup before giving up
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Deadline of a single forward lookup attempt, in seconds
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_secs: u64,

    /// Deadline of a single reverse lookup attempt, in seconds
    #[serde(default = "default_reverse_timeout")]
    pub reverse_timeout_secs: u64,

    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// How long a cached answer stays valid, in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Server used for SOA queries when none is given on the command line
    #[serde(default = "default_soa_server")]
    pub soa_server: String,

    #[serde(default = "default_soa_timeout")]
    pub soa_timeout_secs: u64,
}

impl LookupConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    pub fn reverse_timeout(&self) -> Duration {
        Duration::from_secs(self.reverse_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn soa_timeout(&self) -> Duration {
        Duration::from_secs(self.soa_timeout_secs)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            attempt_timeout_secs: default_attempt_timeout(),
            reverse_timeout_secs: default_reverse_timeout(),
            cache_enabled: default_true(),
            cache_ttl_secs: default_cache_ttl(),
            soa_server: default_soa_server(),
            soa_timeout_secs: default_soa_timeout(),
        }
    }
}

fn default_attempts() -> u32 {
    3
}

fn default_attempt_timeout() -> u64 {
    3
}

fn default_reverse_timeout() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_soa_server() -> String {
    "8.8.8.8:53".to_string()
}

fn default_soa_timeout() -> u64 {
    2
}
