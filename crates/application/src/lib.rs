//! HopZero Application Layer
//!
//! Ports the lookup orchestration depends on, the retry/timeout service and
//! the lookup use cases (forward dispatch, SOA, reverse).
pub mod ports;
pub mod services;
pub mod use_cases;
