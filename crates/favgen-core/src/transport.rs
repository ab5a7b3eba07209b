//! HTTP capabilities: the API POST and file downloads.
//!
//! Both are traits so callers (and tests) can swap the network layer. The
//! default implementation uses the curl crate (libcurl) and runs in the
//! current thread. Nothing here retries; failures go straight to the caller.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::config::HttpConfig;

/// Error from the network layer. Opaque to the generator, which only propagates it.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Curl(#[from] curl::Error),

    #[error("{method} {url} returned HTTP {status}")]
    Http {
        method: &'static str,
        url: String,
        status: u32,
    },

    #[error("writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Sends the generation request.
pub trait HttpTransport {
    /// POSTs `body` as `application/json` and returns the raw response body.
    ///
    /// The API reports failures inside the JSON body, so any reply with a body
    /// is returned as-is; the parser decides what it means.
    fn post_json(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, TransportError>;
}

/// Fetches a remote file to a local path.
pub trait Downloader {
    /// Downloads `url` into `dest` (created or truncated). Returns bytes written.
    fn download_to(&self, url: &str, dest: &Path) -> Result<u64, TransportError>;
}

/// libcurl-backed transport.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }

    pub fn from_config(cfg: &HttpConfig) -> Self {
        Self::new(
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        Ok(easy)
    }
}

impl HttpTransport for CurlTransport {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        let mut easy = self.easy(url)?;
        easy.post(true)?;
        easy.post_fields_copy(body)?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        let mut response = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            if response.is_empty() {
                return Err(TransportError::Http {
                    method: "POST",
                    url: url.to_string(),
                    status,
                });
            }
            tracing::warn!("POST {} returned HTTP {}; passing body to parser", url, status);
        }
        tracing::debug!("POST {} -> HTTP {}, {} bytes", url, status, response.len());
        Ok(response)
    }
}

impl Downloader for CurlTransport {
    fn download_to(&self, url: &str, dest: &Path) -> Result<u64, TransportError> {
        let io_err = |source| TransportError::Io {
            path: dest.display().to_string(),
            source,
        };
        let mut file = File::create(dest).map_err(io_err)?;
        let mut written: u64 = 0;
        let mut write_error = None;

        let mut easy = self.easy(url)?;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            let performed = transfer.perform();
            drop(transfer);
            if let Some(e) = write_error.take() {
                return Err(io_err(e));
            }
            performed?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(TransportError::Http {
                method: "GET",
                url: url.to_string(),
                status,
            });
        }
        file.flush().map_err(io_err)?;
        tracing::debug!("GET {} -> {} ({} bytes)", url, dest.display(), written);
        Ok(written)
    }
}
