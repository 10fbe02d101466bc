pub mod cache;
pub mod forwarding;
pub mod resolvers;
pub mod transport;
pub mod wire_transport;

pub use cache::TtlRecordCache;
pub use wire_transport::WireDnsTransport;
