//! Favicon generation: validate → build → POST → parse.
//!
//! One synchronous call chain per request. The generator only holds the API
//! key, the endpoint and a transport, none of which change after
//! construction, so concurrent requests through one generator are independent.

use serde_json::Value;

use crate::config::{FavgenConfig, DEFAULT_ENDPOINT};
use crate::options::{self, ValidationError};
use crate::request::FaviconRequest;
use crate::response::{FaviconResult, ResponseError};
use crate::transport::{CurlTransport, HttpTransport, TransportError};

/// Immutable settings for a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl GeneratorConfig {
    /// Config for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl From<&FavgenConfig> for GeneratorConfig {
    fn from(cfg: &FavgenConfig) -> Self {
        Self {
            api_key: cfg.api_key.clone(),
            endpoint: cfg.non_interactive.endpoint.clone(),
        }
    }
}

/// Any failure of [`FaviconGenerator::generate`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid options: {0}")]
    Validation(#[from] ValidationError),

    #[error("request to favicon API failed: {0}")]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Response(#[from] ResponseError),

    #[error("cannot encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Client for the non-interactive API.
#[derive(Debug, Clone)]
pub struct FaviconGenerator<T = CurlTransport> {
    config: GeneratorConfig,
    transport: T,
}

impl FaviconGenerator {
    /// Curl-backed generator using the endpoint and timeouts from `cfg`.
    pub fn from_config(cfg: &FavgenConfig) -> Self {
        Self::new(GeneratorConfig::from(cfg), CurlTransport::from_config(&cfg.http))
    }
}

impl<T: HttpTransport> FaviconGenerator<T> {
    pub fn new(config: GeneratorConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validates `raw` and builds the request without sending it.
    pub fn prepare(&self, raw: &Value) -> Result<FaviconRequest, ValidationError> {
        let options = options::validate(raw)?;
        Ok(FaviconRequest::build(&self.config.api_key, &options))
    }

    /// Runs the whole chain. Nothing is retried; the first failure is returned.
    pub fn generate(&self, raw: &Value) -> Result<FaviconResult, GenerateError> {
        let request = self.prepare(raw)?;
        let body = request.to_json_vec()?;

        tracing::debug!("POST {} ({} bytes)", self.config.endpoint, body.len());
        let response = self.transport.post_json(&self.config.endpoint, &body)?;

        match FaviconResult::parse(Some(response.as_slice())) {
            Ok(result) => {
                tracing::info!(
                    "favicon generated: package {} ({} files, version {})",
                    result.package_url.as_deref().unwrap_or("-"),
                    result.files_urls.len(),
                    result.version.as_deref().unwrap_or("unknown")
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("favicon generation failed: {}", e);
                Err(e.into())
            }
        }
    }
}
