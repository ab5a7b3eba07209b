//! `favgen validate` – check an options file and print the normalized options.

use anyhow::{Context, Result};
use favgen_core::options;
use std::path::Path;

use super::options_file::load_options;

pub fn run_validate(path: &Path) -> Result<()> {
    let raw = load_options(path)?;
    let validated = options::validate(&raw)
        .with_context(|| format!("invalid options in {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&validated)?);
    Ok(())
}
