use hopzero_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::debug;

/// DNS over TCP, one connection per query.
///
/// Messages are framed with a two-byte big-endian length prefix.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    /// Connects, writes one framed query and reads one framed reply.
    ///
    /// `timeout` bounds the whole exchange.
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let deadline = Instant::now() + timeout;

        let length = u16::try_from(message_bytes.len()).map_err(|_| {
            DomainError::IoError(format!(
                "DNS message of {} bytes does not fit a TCP frame",
                message_bytes.len()
            ))
        })?;

        let mut stream = tokio::time::timeout_at(deadline, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error("connect to", e))?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&length.to_be_bytes());
        framed.extend_from_slice(message_bytes);

        tokio::time::timeout_at(deadline, stream.write_all(&framed))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error("send TCP query to", e))?;

        debug!(server = %self.server_addr, bytes_sent = framed.len(), "TCP query sent");

        let mut length_buf = [0u8; 2];
        tokio::time::timeout_at(deadline, stream.read_exact(&mut length_buf))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error("read TCP response length from", e))?;

        let mut response = vec![0u8; u16::from_be_bytes(length_buf) as usize];
        tokio::time::timeout_at(deadline, stream.read_exact(&mut response))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error("read TCP response from", e))?;

        debug!(
            server = %self.server_addr,
            bytes_received = response.len(),
            "TCP response received"
        );

        Ok(response)
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::IoError(format!("Failed to {} {}: {}", action, self.server_addr, e))
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }
}
