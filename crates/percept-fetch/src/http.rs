//! HTTP client for the remote label table and model weights.
//!
//! Both artifacts live on static hosting (the label table as a JSON
//! document, the weights as an opaque `.onnx` blob). One GET each, no
//! retries; a failed fetch is surfaced to the caller, who may substitute
//! a cached local copy instead.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use percept_ai::{LabelError, LabelTable};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error(transparent)]
    Format(#[from] LabelError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// HTTP fetch client for classification artifacts.
pub struct FetchClient {
    client: reqwest::Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch and parse the label table document from `url`.
    pub async fn fetch_labels(&self, url: &str) -> Result<LabelTable, FetchError> {
        info!(url = %url, "fetching label table");
        let body = self.get_text(url).await?;
        let table = LabelTable::from_json_str(&body)?;
        info!(classes = table.len(), "label table fetched");
        Ok(table)
    }

    /// Fetch the label table document and write it to `dest` unparsed-first:
    /// the body is validated before anything lands on disk, so a malformed
    /// document leaves no partial file behind.
    pub async fn cache_labels(&self, url: &str, dest: &Path) -> Result<LabelTable, FetchError> {
        let body = self.get_text(url).await?;
        let table = LabelTable::from_json_str(&body)?;

        tokio::fs::write(dest, &body)
            .await
            .map_err(|source| FetchError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
        info!(classes = table.len(), dest = %dest.display(), "label table cached");
        Ok(table)
    }

    /// Download the opaque weights artifact to `dest`.
    ///
    /// The bytes are never inspected; the serialized format belongs to the
    /// inference runtime. Returns the number of bytes written.
    pub async fn download_weights(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        info!(url = %url, dest = %dest.display(), "downloading model weights");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|source| FetchError::Io {
                path: dest.to_path_buf(),
                source,
            })?;

        info!(bytes = bytes.len(), "weights downloaded");
        Ok(bytes.len() as u64)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_errors_pass_through() {
        let parse_err = LabelTable::from_json_str("[]").unwrap_err();
        let err = FetchError::from(parse_err);
        assert!(matches!(err, FetchError::Format(LabelError::Format(_))));
    }

    #[test]
    fn server_error_display_includes_status() {
        let err = FetchError::Server {
            status: 404,
            body: "not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"), "got {msg:?}");
        assert!(msg.contains("not found"));
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let client = FetchClient::new();
        // Port 9 (discard) is never bound; the connection is refused immediately.
        let err = client
            .fetch_labels("http://127.0.0.1:9/labels.json")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Http(_)), "got {err:?}");
    }
}
