//! Wire request for the non-interactive API.
//!
//! Built once per call from validated options; serialized as
//! `{"favicon_generation": { ... }}`.

use serde::Serialize;

use crate::options::{DesignOptions, GenerationOptions, SettingsOptions};

const URL_PREFIXES: [&str; 3] = ["http://", "https://", "//"];

/// Payload describing the master picture, where the icons go, and the design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaviconRequest {
    pub api_key: String,
    pub master_picture: MasterPicture,
    pub files_location: FilesLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_design: Option<DesignOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsOptions>,
}

/// Master picture reference: fetched by the service, or sent inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MasterPicture {
    Url { url: String },
    Inline { content: String },
}

/// Where the generated files will be served from on the target site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilesLocation {
    Root,
    Path { path: String },
}

#[derive(Serialize)]
struct Envelope<'a> {
    favicon_generation: &'a FaviconRequest,
}

/// Plain prefix test; the remote service classifies `src` the same way.
pub fn is_url(src: &str) -> bool {
    URL_PREFIXES.iter().any(|p| src.starts_with(p))
}

impl FaviconRequest {
    pub fn build(api_key: &str, options: &GenerationOptions) -> Self {
        let src = &options.general.src;
        let master_picture = if is_url(src) {
            MasterPicture::Url { url: src.clone() }
        } else {
            MasterPicture::Inline {
                content: src.clone(),
            }
        };

        let files_location = match options.general.icons_path.as_deref() {
            None | Some("") => FilesLocation::Root,
            Some(path) => FilesLocation::Path {
                path: path.to_string(),
            },
        };

        let favicon_design = (!options.design.is_empty()).then(|| options.design.clone());

        // Validated settings always carry error_on_image_too_small, so the
        // section is present whenever options went through validation.
        let settings = Some(options.settings.clone());

        let request = FaviconRequest {
            api_key: api_key.to_string(),
            master_picture,
            files_location,
            favicon_design,
            settings,
        };
        tracing::debug!(
            master = request.master_picture.kind(),
            in_root = matches!(request.files_location, FilesLocation::Root),
            design_sections = request.favicon_design.as_ref().map_or(0, |d| d.len()),
            "built favicon request"
        );
        request
    }

    /// Serializes the request body, envelope included.
    pub fn to_json_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&Envelope {
            favicon_generation: self,
        })
    }

    /// Same as [`to_json_vec`](Self::to_json_vec) but indented, for display.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Envelope {
            favicon_generation: self,
        })
    }
}

impl MasterPicture {
    pub fn kind(&self) -> &'static str {
        match self {
            MasterPicture::Url { .. } => "url",
            MasterPicture::Inline { .. } => "inline",
        }
    }
}
