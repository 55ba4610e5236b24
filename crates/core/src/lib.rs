//! GemAssure Core - estimate computation, lookup tables, and service traits.
//!
//! This crate turns an appraisal request (gem identity plus metal type and
//! weight) into a single estimated value. It talks to the upstream price
//! sources only through the provider traits of `gemassure-pricing` and records
//! every request through a [`request_log::RequestLogSink`].

pub mod errors;
pub mod estimate;
pub mod metals;
pub mod request_log;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
