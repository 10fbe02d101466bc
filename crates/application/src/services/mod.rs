pub mod retry;

pub use retry::{with_timeout_and_retry, Deadline, RetryPolicy};
