//! CLI for the favgen favicon generator client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use favgen_core::config::{self, FavgenConfig};
use favgen_core::package::DEFAULT_ARCHIVE_NAME;
use std::path::{Path, PathBuf};

use commands::{run_completions, run_generate, run_request, run_validate, GenerateArgs};

/// Top-level CLI for favgen.
#[derive(Debug, Parser)]
#[command(name = "favgen")]
#[command(about = "favgen: generate favicons with the RealFaviconGenerator API", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate favicons from an options file and print the HTML snippet.
    Generate {
        /// Options file (JSON, or TOML when the extension is .toml).
        options: PathBuf,

        /// Download and unpack the favicon package into this directory.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Base name of the downloaded archive and its extraction directory.
        #[arg(long, default_value = DEFAULT_ARCHIVE_NAME, value_name = "NAME")]
        archive_name: String,

        /// Write the HTML snippet to FILE instead of stdout.
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },

    /// Validate an options file and print the normalized options.
    Validate {
        /// Options file (JSON, or TOML when the extension is .toml).
        options: PathBuf,
    },

    /// Print the request JSON that `generate` would send, without sending it.
    Request {
        /// Options file (JSON, or TOML when the extension is .toml).
        options: PathBuf,

        /// Replace the API key with a placeholder (no config needed).
        #[arg(long)]
        redact: bool,
    },

    /// Print the location of the config file.
    ConfigPath,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let config_override = cli.config.as_deref();

        match cli.command {
            CliCommand::Generate {
                options,
                output_dir,
                archive_name,
                html,
            } => {
                let cfg = load_config(config_override)?;
                run_generate(
                    &cfg,
                    &GenerateArgs {
                        options: &options,
                        output_dir: output_dir.as_deref(),
                        archive_name: &archive_name,
                        html: html.as_deref(),
                    },
                )?;
            }
            CliCommand::Validate { options } => run_validate(&options)?,
            CliCommand::Request { options, redact } => {
                let api_key = if redact {
                    None
                } else {
                    Some(load_config(config_override)?.api_key)
                };
                run_request(&options, api_key.as_deref())?;
            }
            CliCommand::ConfigPath => match config_override {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", config::config_path()?.display()),
            },
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<FavgenConfig> {
    let cfg = match path {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!(
        "loaded config: endpoint={} connect_timeout={}s timeout={}s",
        cfg.non_interactive.endpoint,
        cfg.http.connect_timeout_secs,
        cfg.http.timeout_secs
    );
    Ok(cfg)
}

#[cfg(test)]
mod tests;
