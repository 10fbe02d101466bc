use crate::ports::DnsTransport;
use crate::services::{with_timeout_and_retry, RetryPolicy};
use hopzero_domain::{RecordValue, ResolverHandle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use super::LookupOutcome;

/// Use case: PTR lookup through the platform resolver. Never cached.
pub struct ReverseLookupUseCase {
    transport: Arc<dyn DnsTransport>,
    attempts: u32,
}

impl ReverseLookupUseCase {
    pub fn new(transport: Arc<dyn DnsTransport>, attempts: u32) -> Self {
        Self {
            transport,
            attempts,
        }
    }

    pub async fn execute(&self, address: &str, timeout: Duration) -> LookupOutcome {
        info!("Performing reverse lookup for {}...", address);

        let handle = &ResolverHandle::System;
        let transport = &self.transport;
        let result = with_timeout_and_retry(
            RetryPolicy::new(self.attempts, timeout),
            move |deadline| transport.lookup_ptr(handle, address, deadline),
        )
        .await;

        match result {
            Ok(names) if names.is_empty() => {
                info!("No PTR records found for {}", address);
                LookupOutcome::NotFound
            }
            Ok(names) => {
                for name in &names {
                    info!("{}", name);
                }
                LookupOutcome::Resolved(RecordValue::Hostnames(names))
            }
            Err(e) => {
                error!(
                    address = %address,
                    error = %e,
                    "Reverse lookup for {} failed: {}",
                    address,
                    e
                );
                LookupOutcome::Failed(e)
            }
        }
    }
}
