//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [pipeline] section
    if let Some(section) = ini.section(Some("pipeline")) {
        if let Some(v) = section.get("data_dir") {
            let v = v.trim();
            if !v.is_empty() {
                config.pipeline.data_dir = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("regions") {
            config.pipeline.regions = parse_regions(v).ok_or_else(|| {
                invalid(
                    "pipeline",
                    "regions",
                    v,
                    "expected a comma-separated list of region codes like 'ZH, BE'",
                )
            })?;
        }
        if let Some(v) = section.get("region_attribute") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid(
                    "pipeline",
                    "region_attribute",
                    v,
                    "must not be empty",
                ));
            }
            config.pipeline.region_attribute = v.to_string();
        }
        if let Some(v) = section.get("raw_file") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("pipeline", "raw_file", v, "must not be empty"));
            }
            config.pipeline.raw_file = v.to_string();
        }
    }

    // [offset] section
    if let Some(section) = ini.section(Some("offset")) {
        if let Some(v) = section.get("enabled") {
            config.offset.enabled = parse_bool(v);
        }
        if let Some(v) = section.get("dx") {
            config.offset.dx = parse_degrees(v)
                .ok_or_else(|| invalid("offset", "dx", v, "must be a number of degrees"))?;
        }
        if let Some(v) = section.get("dy") {
            config.offset.dy = parse_degrees(v)
                .ok_or_else(|| invalid("offset", "dy", v, "must be a number of degrees"))?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse `"ZH, BE"` into region codes. Empty lists and empty entries are
/// rejected.
fn parse_regions(value: &str) -> Option<Vec<String>> {
    let regions: Vec<String> = value.split(',').map(|r| r.trim().to_string()).collect();
    let valid = regions
        .iter()
        .all(|r| !r.is_empty() && r.chars().all(|c| c.is_ascii_alphanumeric()));
    valid.then_some(regions)
}

fn parse_degrees(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|d| d.is_finite())
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
