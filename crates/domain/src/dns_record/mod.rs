pub mod record;
pub mod record_type;

pub use record::{ipv4_only, ipv6_only, MxRecord, RecordValue, SoaRecord};
pub use record_type::RecordType;
