use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gemassure_core::request_log::{LogEntry, RequestLogSink};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only newline-delimited JSON log of estimate requests.
///
/// Each entry is serialized in full before the file lock is taken, then
/// written with a single `write_all`, so concurrent requests never interleave
/// and calls from one instance land in call order.
pub struct FileRequestLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileRequestLog {
    /// Open (creating if needed) the log file and its parent directory.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RequestLogSink for FileRequestLog {
    async fn append(&self, entry: &LogEntry) -> io::Result<()> {
        let mut line = serde_json::to_vec(entry).map_err(io::Error::other)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await
    }
}
