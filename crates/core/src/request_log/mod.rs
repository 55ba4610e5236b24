//! Request log module - append-only record of every estimate request.

mod request_log_model;
mod request_log_traits;

pub use request_log_model::{LogEntry, LogOutcome, LoggedError};
pub use request_log_traits::RequestLogSink;
