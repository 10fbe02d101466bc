#![allow(dead_code)]

pub mod mock_transport;

pub use log_capture::CapturedLogs;
pub use mock_cache::MockRecordCache;
pub use mock_transport::StubTransport;
