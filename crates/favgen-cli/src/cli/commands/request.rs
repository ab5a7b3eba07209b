//! `favgen request` – print the request body without sending it.

use anyhow::{Context, Result};
use favgen_core::options;
use favgen_core::request::FaviconRequest;
use std::path::Path;

use super::options_file::load_options;

/// Stands in for the API key with `--redact`.
const REDACTED_API_KEY: &str = "<redacted>";

pub fn run_request(path: &Path, api_key: Option<&str>) -> Result<()> {
    let raw = load_options(path)?;
    let validated = options::validate(&raw)
        .with_context(|| format!("invalid options in {}", path.display()))?;
    let request = FaviconRequest::build(api_key.unwrap_or(REDACTED_API_KEY), &validated);
    println!("{}", request.to_json_pretty()?);
    Ok(())
}
