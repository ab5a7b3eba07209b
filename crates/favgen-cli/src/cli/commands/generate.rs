//! `favgen generate` – run the full chain and report the result.

use anyhow::{Context, Result};
use favgen_core::config::FavgenConfig;
use favgen_core::generator::FaviconGenerator;
use favgen_core::package::PackageFetcher;
use favgen_core::response::FaviconResult;
use favgen_core::transport::CurlTransport;
use std::fs;
use std::path::Path;

use super::options_file::load_options;

/// Arguments of `favgen generate`, borrowed from the parsed command line.
#[derive(Debug)]
pub struct GenerateArgs<'a> {
    pub options: &'a Path,
    pub output_dir: Option<&'a Path>,
    pub archive_name: &'a str,
    pub html: Option<&'a Path>,
}

pub fn run_generate(cfg: &FavgenConfig, args: &GenerateArgs<'_>) -> Result<()> {
    let raw = load_options(args.options)?;
    let generator = FaviconGenerator::from_config(cfg);
    let mut result = generator
        .generate(&raw)
        .with_context(|| format!("generate favicons from {}", args.options.display()))?;

    if let Some(dir) = args.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("create output dir: {}", dir.display()))?;
        PackageFetcher::with_curl(CurlTransport::from_config(&cfg.http))
            .download_and_unpack(&mut result, dir, args.archive_name)
            .with_context(|| format!("fetch favicon package into {}", dir.display()))?;
    }

    match args.html {
        Some(path) => {
            fs::write(path, &result.html_code)
                .with_context(|| format!("write HTML: {}", path.display()))?;
            eprintln!("HTML snippet written to {}", path.display());
        }
        None => println!("{}", result.html_code),
    }
    report(&result);
    Ok(())
}

/// Summary on stderr so stdout stays pipeable.
fn report(result: &FaviconResult) {
    eprintln!("files path: {}", result.files_path);
    eprintln!(
        "{} files{}",
        result.files_urls.len(),
        if result.is_compressed { ", compressed" } else { "" }
    );
    if let Some(path) = &result.package_path {
        eprintln!("package unpacked to {}", path.display());
    } else if let Some(url) = &result.package_url {
        eprintln!("package: {}", url);
    }
    if let Some(path) = &result.preview_path {
        eprintln!("preview: {}", path.display());
    }
}
