//! Schema checks for raw generation options.
//!
//! Each level (top, `general`, `settings`, `design`) is resolved the same way:
//! unknown keys first, then required keys, then per-field type and value
//! checks in schema order. A JSON `null` on an optional key means "not set".

use serde_json::{Map, Value};

use super::{
    DesignOptions, GeneralOptions, GenerationOptions, PlatformSection, ScalingAlgorithm,
    SettingsOptions, ValidationError, COMPRESSION_LEVELS,
};

const TOP_LEVEL_KEYS: &[&str] = &["general", "settings", "design"];
const GENERAL_KEYS: &[&str] = &["src", "icons_path"];
const SETTINGS_KEYS: &[&str] = &["compression", "scaling_algorithm", "error_on_image_too_small"];

/// Validates raw options and fills in defaults.
///
/// Pure: no I/O, and the same input always yields the same output or error.
pub fn validate(raw: &Value) -> Result<GenerationOptions, ValidationError> {
    let top = expect_object("options", raw)?;
    reject_unknown(top, TOP_LEVEL_KEYS)?;

    let general = match present(top, "general") {
        Some(v) => resolve_general(expect_object("general", v)?)?,
        None => return Err(ValidationError::MissingRequiredOption("general".into())),
    };

    let settings = match present(top, "settings") {
        Some(v) => resolve_settings(expect_object("settings", v)?)?,
        None => SettingsOptions::default(),
    };

    let design = match present(top, "design") {
        Some(v) => resolve_design(expect_object("design", v)?)?,
        None => DesignOptions::new(),
    };

    Ok(GenerationOptions {
        general,
        settings,
        design,
    })
}

fn resolve_general(map: &Map<String, Value>) -> Result<GeneralOptions, ValidationError> {
    reject_unknown(map, GENERAL_KEYS)?;

    let src = match present(map, "src") {
        Some(Value::String(s)) => s,
        Some(other) => return Err(type_error("src", "string", other)),
        None => return Err(ValidationError::MissingRequiredOption("src".into())),
    };
    if src.trim().is_empty() {
        return Err(ValidationError::InvalidOptionValue {
            name: "src".into(),
            value: format!("{:?}", src),
            allowed: "a non-empty string".into(),
        });
    }

    let icons_path = match present(map, "icons_path") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => return Err(type_error("icons_path", "string or null", other)),
        None => None,
    };

    Ok(GeneralOptions {
        src: src.clone(),
        icons_path,
    })
}

fn resolve_settings(map: &Map<String, Value>) -> Result<SettingsOptions, ValidationError> {
    reject_unknown(map, SETTINGS_KEYS)?;

    let compression = match present(map, "compression") {
        Some(v) => Some(resolve_compression(v)?),
        None => None,
    };

    let scaling_algorithm = match present(map, "scaling_algorithm") {
        Some(Value::String(s)) => Some(ScalingAlgorithm::from_name(s).ok_or_else(|| {
            ValidationError::InvalidOptionValue {
                name: "scaling_algorithm".into(),
                value: format!("{:?}", s),
                allowed: ScalingAlgorithm::ALL
                    .iter()
                    .map(|a| a.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })?),
        Some(other) => return Err(type_error("scaling_algorithm", "string", other)),
        None => None,
    };

    let error_on_image_too_small = match present(map, "error_on_image_too_small") {
        Some(Value::Bool(b)) => *b,
        Some(other) => return Err(type_error("error_on_image_too_small", "boolean", other)),
        None => false,
    };

    Ok(SettingsOptions {
        compression,
        scaling_algorithm,
        error_on_image_too_small,
    })
}

fn resolve_compression(v: &Value) -> Result<u8, ValidationError> {
    let level = match v {
        Value::Number(n) if n.is_i64() || n.is_u64() => n,
        other => return Err(type_error("compression", "int", other)),
    };
    level
        .as_u64()
        .and_then(|l| u8::try_from(l).ok())
        .filter(|l| COMPRESSION_LEVELS.contains(l))
        .ok_or_else(|| ValidationError::InvalidOptionValue {
            name: "compression".into(),
            value: level.to_string(),
            allowed: COMPRESSION_LEVELS
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn resolve_design(map: &Map<String, Value>) -> Result<DesignOptions, ValidationError> {
    let mut design = DesignOptions::new();
    // Unknown keys are reported before any section's type, like the other levels.
    let mut sections = Vec::with_capacity(map.len());
    for (key, value) in map {
        let section = PlatformSection::from_key(key)
            .ok_or_else(|| ValidationError::UnknownOption(key.clone()))?;
        sections.push((section, key, value));
    }
    for (section, key, value) in sections {
        match value {
            Value::Null => {}
            Value::Object(obj) => {
                design.insert(section, obj.clone());
            }
            other => return Err(type_error(key, "object", other)),
        }
    }
    Ok(design)
}

/// Returns the value for `key` unless it is missing or `null`.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn reject_unknown(map: &Map<String, Value>, known: &[&str]) -> Result<(), ValidationError> {
    match map.keys().find(|k| !known.contains(&k.as_str())) {
        Some(k) => Err(ValidationError::UnknownOption(k.clone())),
        None => Ok(()),
    }
}

fn expect_object<'a>(name: &str, v: &'a Value) -> Result<&'a Map<String, Value>, ValidationError> {
    v.as_object().ok_or_else(|| type_error(name, "object", v))
}

fn type_error(name: &str, expected: &'static str, actual: &Value) -> ValidationError {
    ValidationError::InvalidOptionType {
        name: name.to_string(),
        expected,
        actual: json_type_name(actual),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
