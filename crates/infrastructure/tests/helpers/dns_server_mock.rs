use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

/// What the mock answers to every query it receives.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// NOERROR with one A record per address
    Addresses(Vec<Ipv4Addr>),
    /// NOERROR with one SOA record carrying this serial
    Soa { serial: u32 },
    /// NOERROR with an empty answer section
    Empty,
    /// NXDOMAIN, no answers
    NxDomain,
    /// SERVFAIL, no answers
    ServFail,
    /// Reply with a transaction ID that does not match the query
    WrongId,
    /// Never reply
    Silent,
    /// Over UDP: the inner reply with TC set and its last answer dropped.
    /// Over TCP: the inner reply in full.
    Truncated(Box<MockReply>),
    /// Over UDP: an empty reply from another socket and a reply with a
    /// foreign ID go out first, then the inner reply.
    Spoofed(Box<MockReply>),
}

impl MockReply {
    pub fn truncated(inner: MockReply) -> Self {
        MockReply::Truncated(Box::new(inner))
    }

    pub fn spoofed(inner: MockReply) -> Self {
        MockReply::Spoofed(Box::new(inner))
    }

    /// What the TCP listener serves.
    fn over_tcp(&self) -> &MockReply {
        match self {
            MockReply::Truncated(inner) | MockReply::Spoofed(inner) => inner.over_tcp(),
            other => other,
        }
    }
}

/// Mock DNS server for tests.
///
/// Answers from raw bytes: the question is echoed back and the answer
/// section points at it with a compression pointer. UDP and TCP listen on
/// the same localhost port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    tcp_connections: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Binds an ephemeral localhost port and serves `reply` until dropped.
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let (socket, listener) = bind_pair().await?;
        let addr = socket.local_addr()?;
        let decoy = UdpSocket::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await?;

        let queries = Arc::new(AtomicUsize::new(0));
        let tcp_connections = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();
        let tcp_counter = tcp_connections.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let query = &buf[..len];
                            if matches!(reply, MockReply::Spoofed(_)) {
                                if let Some(stray) = build_response(query, &MockReply::Empty) {
                                    let _ = decoy.send_to(&stray, peer).await;
                                }
                                if let Some(foreign) = build_response(query, &MockReply::WrongId) {
                                    let _ = socket.send_to(&foreign, peer).await;
                                }
                            }
                            if let Some(response) = build_response(query, &reply) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            tcp_counter.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(serve_tcp(stream, reply.over_tcp().clone()));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            tcp_connections,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// UDP datagrams received.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// TCP connections accepted.
    pub fn tcp_connections(&self) -> usize {
        self.tcp_connections.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// UDP socket and TCP listener sharing one ephemeral port.
async fn bind_pair() -> Result<(UdpSocket, TcpListener), std::io::Error> {
    let mut last_error = None;
    for _ in 0..16 {
        let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await?;
        match TcpListener::bind(socket.local_addr()?).await {
            Ok(listener) => return Ok((socket, listener)),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| std::io::Error::other("no free port")))
}

/// Length-prefixed queries answered in turn until the client hangs up.
async fn serve_tcp(mut stream: TcpStream, reply: MockReply) {
    loop {
        let mut length = [0u8; 2];
        if stream.read_exact(&mut length).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(length) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }
        let Some(response) = build_response(&query, &reply) else {
            continue;
        };
        let mut framed = (response.len() as u16).to_be_bytes().to_vec();
        framed.extend_from_slice(&response);
        if stream.write_all(&framed).await.is_err() {
            return;
        }
    }
}

/// Wire-format name: length-prefixed labels, root terminated.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Builds the UDP reply bytes for `query`, `None` for [`MockReply::Silent`].
pub fn build_response(query: &[u8], reply: &MockReply) -> Option<Vec<u8>> {
    if query.len() < 17 {
        return None;
    }

    match reply {
        MockReply::Silent => None,
        MockReply::Spoofed(inner) => build_response(query, inner),
        MockReply::Truncated(inner) => {
            let mut answers = answers_for(query, inner);
            answers.pop();
            Some(encode_response(query, inner, &answers, true))
        }
        other => Some(encode_response(query, other, &answers_for(query, other), false)),
    }
}

fn answers_for(query: &[u8], reply: &MockReply) -> Vec<Vec<u8>> {
    let end = question_end(query);
    let qtype = u16::from_be_bytes([query[end - 4], query[end - 3]]);

    match reply {
        // A records only for A questions, so AAAA comes back empty
        MockReply::Addresses(ips) if qtype == 1 => ips.iter().map(|ip| a_answer(*ip)).collect(),
        MockReply::Soa { serial } => vec![soa_answer(*serial)],
        _ => Vec::new(),
    }
}

fn encode_response(
    query: &[u8],
    reply: &MockReply,
    answers: &[Vec<u8>],
    truncated: bool,
) -> Vec<u8> {
    let end = question_end(query);
    let rcode = match reply {
        MockReply::NxDomain => 0x03,
        MockReply::ServFail => 0x02,
        _ => 0x00,
    };

    let mut response = Vec::with_capacity(512);

    // Transaction ID
    if matches!(reply, MockReply::WrongId) {
        response.extend_from_slice(&[query[0] ^ 0xff, query[1] ^ 0xff]);
    } else {
        response.extend_from_slice(&query[0..2]);
    }

    // Flags: QR=1, TC, RD=1 / RA=1, RCODE
    response.push(if truncated { 0x83 } else { 0x81 });
    response.push(0x80 | rcode);

    // Question count copied from the query
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    // Authority and additional RRs: 0
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    // Question section, without any OPT record the client may have sent
    response.extend_from_slice(&query[12..end]);

    for answer in answers {
        response.extend_from_slice(answer);
    }

    response
}

fn question_end(query: &[u8]) -> usize {
    let mut pos = 12;
    while pos < query.len() && query[pos] != 0 {
        pos += query[pos] as usize + 1;
    }
    // Root label, QTYPE, QCLASS
    (pos + 5).min(query.len())
}

fn a_answer(ip: Ipv4Addr) -> Vec<u8> {
    let mut rr = vec![
        0xc0, 0x0c, // Name pointer to question
        0x00, 0x01, // Type A
        0x00, 0x01, // Class IN
        0x00, 0x00, 0x00, 0x3c, // TTL: 60 seconds
        0x00, 0x04, // Data length: 4 bytes
    ];
    rr.extend_from_slice(&ip.octets());
    rr
}

fn soa_answer(serial: u32) -> Vec<u8> {
    let mut rdata = encode_name("ns1.example.com.");
    rdata.extend_from_slice(&encode_name("hostmaster.example.com."));
    rdata.extend_from_slice(&serial.to_be_bytes());
    rdata.extend_from_slice(&7200u32.to_be_bytes()); // refresh
    rdata.extend_from_slice(&3600u32.to_be_bytes()); // retry
    rdata.extend_from_slice(&1_209_600u32.to_be_bytes()); // expire
    rdata.extend_from_slice(&300u32.to_be_bytes()); // minimum

    let mut rr = vec![
        0xc0, 0x0c, // Name pointer to question
        0x00, 0x06, // Type SOA
        0x00, 0x01, // Class IN
        0x00, 0x00, 0x0e, 0x10, // TTL: 3600 seconds
    ];
    rr.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    rr.extend_from_slice(&rdata);
    rr
}
