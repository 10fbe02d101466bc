use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use hopzero_domain::{DomainError, SoaRecord};
use tracing::debug;

/// Parsed reply: header bits plus the answer section.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub rcode: ResponseCode,
    pub truncated: bool,
    pub answers: Vec<Record>,
}

impl DnsResponse {
    pub fn soa_records(&self) -> Vec<SoaRecord> {
        self.answers
            .iter()
            .filter_map(|record| match record.data() {
                RData::SOA(soa) => Some(SoaRecord {
                    primary_ns: soa.mname().to_utf8(),
                    mailbox: soa.rname().to_utf8(),
                    serial: soa.serial(),
                    refresh: soa.refresh(),
                    retry: soa.retry(),
                    expire: soa.expire(),
                    minimum_ttl: soa.minimum(),
                }),
                _ => None,
            })
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();
        let answers = message.answers().to_vec();

        debug!(
            rcode = ?rcode,
            answers = answers.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            rcode,
            truncated,
            answers,
        })
    }
}
