//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini` and shown
//! by `geoprep config show`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[pipeline]
; Directory holding the raw national file and receiving all outputs
data_dir = {}
; Regions built by `geoprep build`, comma separated (e.g. ZH, BE)
regions = {}
; Feature property holding the region code
region_attribute = {}
; Raw national postcode polygons inside data_dir
raw_file = {}

[offset]
; Constant shift applied during cleanup to line the Swiss grid up with web maps
enabled = {}
; Longitude shift in degrees
dx = {}
; Latitude shift in degrees
dy = {}

[logging]
; Log file path
file = {}
"#,
        path_to_string(&config.pipeline.data_dir),
        config.pipeline.regions.join(", "),
        config.pipeline.region_attribute,
        config.pipeline.raw_file,
        config.offset.enabled,
        config.offset.dx,
        config.offset.dy,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
