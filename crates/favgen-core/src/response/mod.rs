//! API response model and parser.
//!
//! The service answers with `favicon_generation_result`, whose shape has grown
//! over API versions. Everything the client depends on is required; the rest
//! is optional and never makes parsing fail. A JSON `null` counts as absent.

mod error;

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

pub use error::{ResponseError, GENERIC_FAILURE_MESSAGE};

/// Parsed outcome of a successful generation.
///
/// Read-only once parsed, except `package_path` and `preview_path`, which
/// [`PackageFetcher`](crate::package::PackageFetcher) fills in after unpacking.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FaviconResult {
    /// URL of the zip archive with all generated files.
    pub package_url: Option<String>,
    pub files_urls: Vec<String>,
    /// True only when the service echoed `compression: "true"`.
    pub is_compressed: bool,
    /// Markup to paste into the `<head>` of the target pages.
    pub html_code: String,
    pub is_files_in_root: bool,
    /// `/` when in root, otherwise the path echoed by the service.
    pub files_path: String,
    pub preview_url: Option<String>,
    pub custom_parameter: Option<String>,
    pub version: Option<String>,
    /// The request as understood by the service, echoed back.
    pub non_interactive_request: Option<Value>,
    /// Extraction directory, set by a successful unpack.
    pub package_path: Option<PathBuf>,
    /// Local copy of the preview picture, set by a successful unpack.
    pub preview_path: Option<PathBuf>,
}

impl FaviconResult {
    /// Parses a raw response body. `None` means the transport returned nothing.
    pub fn parse(raw: Option<&[u8]>) -> Result<Self, ResponseError> {
        let raw = match raw {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Err(ResponseError::EmptyResponse),
        };

        let response: Value = serde_json::from_slice(raw)
            .map_err(|e| ResponseError::MalformedResponse(e.to_string()))?;
        if response.is_null() {
            return Err(ResponseError::MalformedResponse("document is null".into()));
        }

        let generation = required(&response, "favicon_generation_result")?;
        let result = required(generation, "result")?;
        let status = required(result, "status")?;

        if status.as_str() != Some("success") {
            let message = optional_text(result, "error_message")
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            return Err(ResponseError::GenerationFailed(message));
        }

        let favicon = required(generation, "favicon")?;
        let package_url = required_string(favicon, "package_url")?;
        let is_compressed = required(favicon, "compression")?.as_str() == Some("true");
        let html_code = required_string(favicon, "html_code")?;
        let files_urls = favicon
            .get("files_urls")
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let files_location = required(generation, "files_location")?;
        let is_files_in_root = required(files_location, "type")?.as_str() == Some("root");
        let files_path = if is_files_in_root {
            "/".to_string()
        } else {
            required_string(files_location, "path")?
        };

        Ok(FaviconResult {
            package_url: Some(package_url),
            files_urls,
            is_compressed,
            html_code,
            is_files_in_root,
            files_path,
            preview_url: optional_text(generation, "preview_picture_url"),
            custom_parameter: optional_text(generation, "custom_parameter"),
            version: optional_text(generation, "version"),
            non_interactive_request: generation
                .get("non_interactive_request")
                .filter(|v| !v.is_null())
                .cloned(),
            package_path: None,
            preview_path: None,
        })
    }
}

fn required<'a>(parent: &'a Value, name: &str) -> Result<&'a Value, ResponseError> {
    parent
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ResponseError::MissingField(name.to_string()))
}

fn required_string(parent: &Value, name: &str) -> Result<String, ResponseError> {
    match required(parent, name)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(ResponseError::MalformedResponse(format!(
            "{} must be a string, got {}",
            name, other
        ))),
    }
}

/// Optional scalar as text; numbers and booleans are rendered, not rejected.
fn optional_text(parent: &Value, name: &str) -> Option<String> {
    match parent.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests;
