use super::error::ExportError;
use crate::sdk::config::Config;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};

pub const BLOB_API_URL: &str = "https://blob.vercel-storage.com";
pub const BLOB_API_VERSION: &str = "7";

/// Destination for export artifacts: write bytes under a key, get back a
/// locator the caller can hand to a user.
pub trait Sink {
    /// Called once before the first `put` of an export run.
    fn prepare(&self) -> Result<(), ExportError> {
        Ok(())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, ExportError>;
}

/// Writes into a local directory and returns download paths relative to the
/// web root (`/exports/<key>` by default).
#[derive(Debug, Clone)]
pub struct LocalSink {
    dir: PathBuf,
    url_prefix: String,
}

impl LocalSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: "/exports".to_string(),
        }
    }

    pub fn with_url_prefix(mut self, prefix: &str) -> Self {
        self.url_prefix = prefix.trim_end_matches('/').to_string();
        self
    }
}

impl Sink for LocalSink {
    fn prepare(&self) -> Result<(), ExportError> {
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::SinkWrite {
            key: self.dir.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, ExportError> {
        let path = self.dir.join(key);
        log::debug!("[SINK] Writing {} bytes to {}", bytes.len(), path.display());
        fs::write(&path, bytes).map_err(|e| ExportError::SinkWrite {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(format!("{}/{}", self.url_prefix, key))
    }
}

#[derive(Deserialize)]
struct BlobPutResponse {
    url: String,
}

/// Uploads to Vercel Blob storage and returns the public blob URL.
pub struct BlobSink {
    client: Client,
    token: String,
    base_url: String,
    prefix: String,
}

impl BlobSink {
    pub fn new(token: String) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(Config::user_agent())
            .build()
            .map_err(|e| ExportError::SinkWrite {
                key: BLOB_API_URL.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            token,
            base_url: BLOB_API_URL.to_string(),
            prefix: "exports".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Folder inside the store the artifacts are uploaded to.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim_matches('/').to_string();
        self
    }

    /// Upload URL for `key`. Each path segment is percent-encoded, so a key
    /// holding `#`, `?` or `%` stays one distinct blob.
    fn upload_url(&self, key: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.base_url).map_err(|e| format!("invalid base URL: {}", e))?;
        url.path_segments_mut()
            .map_err(|_| format!("base URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(self.prefix.split('/').filter(|segment| !segment.is_empty()))
            .push(key);
        Ok(url)
    }
}

fn content_type(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext) {
        Some("kml") => "application/vnd.google-earth.kml+xml",
        Some("gpx") => "application/gpx+xml",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

impl Sink for BlobSink {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, ExportError> {
        let sink_error = |reason: String| ExportError::SinkWrite {
            key: key.to_string(),
            reason,
        };
        let url = self.upload_url(key).map_err(sink_error)?;

        log::debug!("[SINK] Uploading {} bytes to {}", bytes.len(), url);
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .header("x-api-version", BLOB_API_VERSION)
            .header("x-content-type", content_type(key))
            .header("x-add-random-suffix", "0")
            .header("x-allow-overwrite", "1")
            .body(bytes.to_vec())
            .send()
            .map_err(|e| sink_error(e.to_string()))?;

        let status = response.status();
        let text = response.text().map_err(|e| sink_error(e.to_string()))?;
        if !status.is_success() {
            log::error!("Blob upload of {} failed with {}. Body: {}", key, status, text);
            return Err(sink_error(format!("HTTP {}: {}", status, text)));
        }

        let body: BlobPutResponse =
            serde_json::from_str(&text).map_err(|e| sink_error(format!("unexpected response: {}", e)))?;
        Ok(body.url)
    }
}
