use async_trait::async_trait;
use hopzero_application::ports::DnsTransport;
use hopzero_application::services::Deadline;
use hopzero_domain::{DomainError, MxRecord, ResolverHandle, SoaRecord};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Stub DnsTransport
// ============================================================================

/// Scripted transport that records every call it receives.
///
/// Forward and reverse lookups share one failure budget: the first
/// `failures_before_success` calls return `failure`, later ones succeed.
pub struct StubTransport {
    addresses: Vec<IpAddr>,
    mx: Vec<MxRecord>,
    txt: Vec<String>,
    ns: Vec<String>,
    cname: String,
    ptr: Vec<String>,
    soa: Result<Vec<SoaRecord>, DomainError>,
    failure: DomainError,
    failures_before_success: AtomicU32,
    hang: bool,
    calls: AtomicUsize,
    soa_calls: AtomicUsize,
    handles: Mutex<Vec<ResolverHandle>>,
    soa_servers: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            addresses: Vec::new(),
            mx: Vec::new(),
            txt: Vec::new(),
            ns: Vec::new(),
            cname: String::new(),
            ptr: Vec::new(),
            soa: Ok(Vec::new()),
            failure: DomainError::IoError("connection refused".to_string()),
            failures_before_success: AtomicU32::new(0),
            hang: false,
            calls: AtomicUsize::new(0),
            soa_calls: AtomicUsize::new(0),
            handles: Mutex::new(Vec::new()),
            soa_servers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_addresses(mut self, addresses: &[&str]) -> Self {
        self.addresses = addresses.iter().map(|a| a.parse().unwrap()).collect();
        self
    }

    pub fn with_mx(mut self, mx: Vec<MxRecord>) -> Self {
        self.mx = mx;
        self
    }

    pub fn with_txt(mut self, txt: &[&str]) -> Self {
        self.txt = txt.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_ns(mut self, ns: &[&str]) -> Self {
        self.ns = ns.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_cname(mut self, cname: &str) -> Self {
        self.cname = cname.to_string();
        self
    }

    pub fn with_ptr(mut self, names: &[&str]) -> Self {
        self.ptr = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_soa(mut self, soa: Result<Vec<SoaRecord>, DomainError>) -> Self {
        self.soa = soa;
        self
    }

    pub fn failing_first(self, count: u32) -> Self {
        self.failures_before_success.store(count, Ordering::SeqCst);
        self
    }

    pub fn always_failing(self) -> Self {
        self.failing_first(u32::MAX)
    }

    pub fn with_failure(mut self, failure: DomainError) -> Self {
        self.failure = failure;
        self
    }

    /// Every lookup sleeps far past any deadline
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn soa_calls(&self) -> usize {
        self.soa_calls.load(Ordering::SeqCst)
    }

    pub fn handles(&self) -> Vec<ResolverHandle> {
        self.handles.lock().unwrap().clone()
    }

    pub fn soa_servers(&self) -> Vec<String> {
        self.soa_servers.lock().unwrap().clone()
    }

    async fn begin(&self, handle: &ResolverHandle) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.handles.lock().unwrap().push(handle.clone());

        if self.hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        let remaining = self.failures_before_success.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_before_success
                .store(remaining - 1, Ordering::SeqCst);
            return Err(self.failure.clone());
        }
        Ok(())
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsTransport for StubTransport {
    async fn lookup_ip(
        &self,
        handle: &ResolverHandle,
        _domain: &str,
        _deadline: Deadline,
    ) -> Result<Vec<IpAddr>, DomainError> {
        self.begin(handle).await?;
        Ok(self.addresses.clone())
    }

    async fn lookup_mx(
        &self,
        handle: &ResolverHandle,
        _domain: &str,
        _deadline: Deadline,
    ) -> Result<Vec<MxRecord>, DomainError> {
        self.begin(handle).await?;
        Ok(self.mx.clone())
    }

    async fn lookup_txt(
        &self,
        handle: &ResolverHandle,
        _domain: &str,
        _deadline: Deadline,
    ) -> Result<Vec<String>, DomainError> {
        self.begin(handle).await?;
        Ok(self.txt.clone())
    }

    async fn lookup_ns(
        &self,
        handle: &ResolverHandle,
        _domain: &str,
        _deadline: Deadline,
    ) -> Result<Vec<String>, DomainError> {
        self.begin(handle).await?;
        Ok(self.ns.clone())
    }

    async fn lookup_cname(
        &self,
        handle: &ResolverHandle,
        _domain: &str,
        _deadline: Deadline,
    ) -> Result<String, DomainError> {
        self.begin(handle).await?;
        Ok(self.cname.clone())
    }

    async fn lookup_ptr(
        &self,
        handle: &ResolverHandle,
        _address: &str,
        _deadline: Deadline,
    ) -> Result<Vec<String>, DomainError> {
        self.begin(handle).await?;
        Ok(self.ptr.clone())
    }

    async fn query_soa(
        &self,
        server: &str,
        _fqdn: &str,
        _timeout: Duration,
    ) -> Result<Vec<SoaRecord>, DomainError> {
        self.soa_calls.fetch_add(1, Ordering::SeqCst);
        self.soa_servers.lock().unwrap().push(server.to_string());
        self.soa.clone()
    }
}
