//! Asset download helper
//!
//! Only a few generators fetch anything. The network call has a hard timeout
//! and the target file is replaced atomically, so a failed download never
//! leaves a truncated asset behind.

use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigGenError, Result};

/// Timeout for a single asset download
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetches a URL to a local file.
pub trait Downloader: Send + Sync {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// HTTP(S) downloader backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    timeout: Duration,
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self {
            timeout: DOWNLOAD_TIMEOUT,
        }
    }
}

impl HttpDownloader {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn fetch_bytes(&self, url: &str) -> std::result::Result<Vec<u8>, String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        let response = match tokio::time::timeout(self.timeout, client.get(url).send()).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => return Err(format!("Network error: {}", e)),
            Err(_) => return Err("Request timed out".to_string()),
        };

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| format!("Failed to read body: {}", e))
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let failed = |reason: String| ConfigGenError::Download {
            url: url.to_string(),
            reason,
        };

        tracing::info!(url, dest = %dest.display(), "downloading asset");
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| failed(format!("Failed to create runtime: {}", e)))?;
        let bytes = rt.block_on(self.fetch_bytes(url)).map_err(failed)?;

        configgen_shared::fs::write_atomic(dest, &bytes)?;
        tracing::info!(bytes = bytes.len(), "download complete");
        Ok(())
    }
}

/// Refuses every download. Used when networking is not wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineDownloader;

impl Downloader for OfflineDownloader {
    fn fetch(&self, url: &str, _dest: &Path) -> Result<()> {
        Err(ConfigGenError::Download {
            url: url.to_string(),
            reason: "downloads are disabled".to_string(),
        })
    }
}
