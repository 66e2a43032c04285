//! Local persistence of generated images under the uploads directory.

use crate::{Error, Result};
use base64::Engine as _;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::io::AsyncWriteExt;

pub const THUMBNAIL_PREFIX: &str = "thumb_";

/// Longest topic token kept in a file name. With the timestamp, extension and
/// thumbnail prefix the name stays well under the usual 255-byte limit.
pub const MAX_TOPIC_LEN: usize = 80;

static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp, strictly increasing within the process.
fn next_timestamp() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_TIMESTAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(previous + 1)
}

/// Lowercase the topic, replace everything outside `[a-z0-9_-]` with `_`, and
/// cut the result to [`MAX_TOPIC_LEN`] characters.
pub fn sanitize_topic(topic: &str) -> String {
    topic
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_TOPIC_LEN)
        .collect()
}

/// `<sanitized topic>_<timestamp>.png`
pub fn image_file_name(topic: &str) -> String {
    format!("{}_{}.png", sanitize_topic(topic), next_timestamp())
}

pub fn thumbnail_file_name(file_name: &str) -> String {
    format!("{}{}", THUMBNAIL_PREFIX, file_name)
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Create the uploads directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to create uploads directory {}: {}",
                self.dir.display(),
                e
            ))
        })
    }

    /// Decode a base64 payload and write it to `file_name`. Returns the
    /// number of bytes written.
    pub async fn write_base64(&self, file_name: &str, b64: &str) -> Result<usize> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64.trim())
            .map_err(|e| Error::Upstream(format!("Failed to decode base64 image: {}", e)))?;

        let path = self.path_for(file_name);
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            Error::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(bytes.len())
    }

    /// Stream `url` into `file_name`. The partial file is removed on failure.
    pub async fn download(&self, client: &Client, url: &str, file_name: &str) -> Result<u64> {
        let path = self.path_for(file_name);

        match stream_to_file(client, url, &path).await {
            Ok(written) => {
                tracing::debug!("Downloaded {} bytes to {}", written, path.display());
                Ok(written)
            }
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    tracing::debug!(
                        "Could not remove partial download {}: {}",
                        path.display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }
}

async fn stream_to_file(client: &Client, url: &str, path: &Path) -> Result<u64> {
    let mut response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Upstream(format!(
            "Image download failed (status {})",
            response.status()
        )));
    }

    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| Error::Storage(format!("Failed to create {}: {}", path.display(), e)))?;

    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}
