use async_trait::async_trait;

use super::request_log_model::LogEntry;

/// Append-only sink for request log entries.
///
/// Implementations must write each entry as a whole: concurrent appends may
/// land in any order, but never interleave partial lines.
#[async_trait]
pub trait RequestLogSink: Send + Sync {
    async fn append(&self, entry: &LogEntry) -> std::io::Result<()>;
}
