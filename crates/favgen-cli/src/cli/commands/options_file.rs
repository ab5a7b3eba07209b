//! Loading raw generation options from disk.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads an options file as a JSON value. `.toml` files are parsed as TOML
/// and converted; everything else is parsed as JSON.
pub fn load_options(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read options: {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        let table: toml::Table = toml::from_str(&data)
            .with_context(|| format!("parse options (TOML): {}", path.display()))?;
        serde_json::to_value(table)
            .with_context(|| format!("convert options: {}", path.display()))
    } else {
        serde_json::from_str(&data)
            .with_context(|| format!("parse options (JSON): {}", path.display()))
    }
}
