//! Generation options: schema, defaults, and validation.
//!
//! Raw options arrive as a nested JSON mapping (`general`, `settings`,
//! `design`). [`validate`] checks them against a fixed schema and returns the
//! typed, fully defaulted [`GenerationOptions`]. Serializing the result back to
//! JSON yields a mapping that validates to the same value.

mod error;
mod validate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use error::ValidationError;
pub use validate::validate;

/// Validated options for one favicon generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub general: GeneralOptions,
    #[serde(default)]
    pub settings: SettingsOptions,
    #[serde(default)]
    pub design: DesignOptions,
}

/// `general` section: master picture and icons location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralOptions {
    /// Master picture: a URL (`http://`, `https://`, `//`) or inline content.
    pub src: String,
    /// Where the icons live on the target site. `None` means the site root.
    #[serde(default)]
    pub icons_path: Option<String>,
}

/// `settings` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOptions {
    /// PNG compression level, 0 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_algorithm: Option<ScalingAlgorithm>,
    #[serde(default)]
    pub error_on_image_too_small: bool,
}

/// Allowed compression levels.
pub const COMPRESSION_LEVELS: std::ops::RangeInclusive<u8> = 0..=5;

/// Resampling algorithm used by the remote service when scaling the master picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalingAlgorithm {
    Mitchell,
    NearestNeighbor,
    Cubic,
    Bilinear,
    Lanczos,
    Spline,
}

impl ScalingAlgorithm {
    pub const ALL: [ScalingAlgorithm; 6] = [
        ScalingAlgorithm::Mitchell,
        ScalingAlgorithm::NearestNeighbor,
        ScalingAlgorithm::Cubic,
        ScalingAlgorithm::Bilinear,
        ScalingAlgorithm::Lanczos,
        ScalingAlgorithm::Spline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScalingAlgorithm::Mitchell => "Mitchell",
            ScalingAlgorithm::NearestNeighbor => "NearestNeighbor",
            ScalingAlgorithm::Cubic => "Cubic",
            ScalingAlgorithm::Bilinear => "Bilinear",
            ScalingAlgorithm::Lanczos => "Lanczos",
            ScalingAlgorithm::Spline => "Spline",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for ScalingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform sections accepted under `design`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformSection {
    DesktopBrowser,
    Ios,
    Windows,
    FirefoxApp,
    AndroidChrome,
    Coast,
    YandexBrowser,
}

impl PlatformSection {
    pub const ALL: [PlatformSection; 7] = [
        PlatformSection::DesktopBrowser,
        PlatformSection::Ios,
        PlatformSection::Windows,
        PlatformSection::FirefoxApp,
        PlatformSection::AndroidChrome,
        PlatformSection::Coast,
        PlatformSection::YandexBrowser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformSection::DesktopBrowser => "desktop_browser",
            PlatformSection::Ios => "ios",
            PlatformSection::Windows => "windows",
            PlatformSection::FirefoxApp => "firefox_app",
            PlatformSection::AndroidChrome => "android_chrome",
            PlatformSection::Coast => "coast",
            PlatformSection::YandexBrowser => "yandex_browser",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

/// `design` section: per-platform settings, passed to the API untouched.
pub type DesignOptions = BTreeMap<PlatformSection, serde_json::Map<String, serde_json::Value>>;
