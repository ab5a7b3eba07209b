use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default non-interactive API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://realfavicongenerator.net/api/favicon";

/// Environment variable that overrides `api_key` from the config file.
pub const API_KEY_ENV: &str = "FAVGEN_API_KEY";

/// Non-interactive API section (`[non_interactive]` in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonInteractiveConfig {
    /// Endpoint the generation request is POSTed to.
    pub endpoint: String,
}

impl Default for NonInteractiveConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// HTTP timeouts (optional `[http]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Whole-transfer limit; the service can take a while on large design sets.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 120,
        }
    }
}

/// Global configuration loaded from `~/.config/favgen/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavgenConfig {
    /// RealFaviconGenerator API key. Required, must not be empty.
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub non_interactive: NonInteractiveConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl FavgenConfig {
    /// Checks the values a generator cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("api_key is not set; add it to config.toml or export {}", API_KEY_ENV);
        }
        let endpoint = self.non_interactive.endpoint.trim();
        if endpoint.is_empty() {
            anyhow::bail!("non_interactive.endpoint must not be empty");
        }
        url::Url::parse(endpoint)
            .with_context(|| format!("non_interactive.endpoint is not a valid URL: {endpoint}"))?;
        Ok(())
    }

    /// Applies `FAVGEN_API_KEY` when it is set and non-empty.
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = key;
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("favgen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a template file if none exists.
///
/// The template has an empty `api_key`, so a fresh install fails validation
/// with a message that points at the file, unless the key comes from the environment.
pub fn load_or_init() -> Result<FavgenConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FavgenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
    }
    load_from(&path)
}

/// Load and validate configuration from a specific file.
pub fn load_from(path: &Path) -> Result<FavgenConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let mut cfg: FavgenConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.apply_env();
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FavgenConfig::default();
        assert!(cfg.api_key.is_empty());
        assert_eq!(cfg.non_interactive.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.http.connect_timeout_secs, 15);
        assert_eq!(cfg.http.timeout_secs, 120);
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = FavgenConfig::default();
        cfg.api_key = "abc".to_string();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FavgenConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_minimal_gets_defaults() {
        let cfg: FavgenConfig = toml::from_str(r#"api_key = "k""#).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.non_interactive.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.http, HttpConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            api_key = "secret"

            [non_interactive]
            endpoint = "https://staging.example.com/api/favicon"

            [http]
            connect_timeout_secs = 5
            timeout_secs = 60
        "#;
        let cfg: FavgenConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.non_interactive.endpoint, "https://staging.example.com/api/favicon");
        assert_eq!(cfg.http.connect_timeout_secs, 5);
        assert_eq!(cfg.http.timeout_secs, 60);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let cfg = FavgenConfig::default();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let mut cfg = FavgenConfig {
            api_key: "k".into(),
            ..FavgenConfig::default()
        };
        cfg.non_interactive.endpoint = "  ".into();
        assert!(cfg.validate().is_err());
        cfg.non_interactive.endpoint = "not a url".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_key = \"file-key\"\n[non_interactive]\nendpoint = \"http://127.0.0.1:9/api\"\n",
        )
        .unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.non_interactive.endpoint, "http://127.0.0.1:9/api");
        assert!(!cfg.api_key.is_empty());
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("nope.toml")).is_err());
    }
}
