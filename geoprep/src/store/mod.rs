//! Load/save boundary for GeoJSON files.
//!
//! The transformation functions only ever see in-memory collections. This
//! module resolves paths to collections and writes results back; nothing
//! else in the crate touches the filesystem for data files.

mod cache;

pub use cache::{LoadCache, LoadCacheStats};

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{GeoprepError, GeoprepResult};
use crate::model::FeatureCollection;

/// Read and parse a feature collection from `path`.
///
/// # Errors
///
/// - [`GeoprepError::Io`] if the file cannot be opened
/// - [`GeoprepError::Json`] if it is not JSON
/// - [`GeoprepError::MalformedInput`] if it is JSON without feature
///   collection structure
pub fn load(path: &Path) -> GeoprepResult<FeatureCollection> {
    let file = fs::File::open(path).map_err(|source| io_error(path, source))?;
    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| GeoprepError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let collection = FeatureCollection::from_json(value).map_err(|e| match e {
        GeoprepError::MalformedInput(msg) => {
            GeoprepError::MalformedInput(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    debug!(path = %path.display(), features = collection.len(), "Loaded feature collection");
    Ok(collection)
}

/// Parse a feature collection from a JSON string.
pub fn parse(json: &str) -> GeoprepResult<FeatureCollection> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| GeoprepError::MalformedInput(format!("invalid JSON: {}", e)))?;
    FeatureCollection::from_json(value)
}

/// Write `collection` to `path` as compact JSON.
///
/// Parent directories are created as needed. The file is written next to
/// its destination and renamed into place, so an interrupted save never
/// leaves a truncated output behind. The temporary file is removed if any
/// step after its creation fails.
pub fn save(collection: &FeatureCollection, path: &Path) -> GeoprepResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let tmp_path = temp_path(path);
    if let Err(e) = write_then_rename(collection, &tmp_path, path) {
        if tmp_path.exists() {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temporary file");
            }
        }
        return Err(e);
    }

    info!(path = %path.display(), features = collection.len(), "Saved feature collection");
    Ok(())
}

fn write_then_rename(
    collection: &FeatureCollection,
    tmp_path: &Path,
    path: &Path,
) -> GeoprepResult<()> {
    let file = fs::File::create(tmp_path).map_err(|source| io_error(tmp_path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection).map_err(|source| GeoprepError::Json {
        path: tmp_path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| io_error(tmp_path, source))?;
    drop(writer);

    fs::rename(tmp_path, path).map_err(|source| io_error(path, source))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> GeoprepError {
    GeoprepError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"plz": "8000", "zz": "01"},
             "geometry": {"type": "Polygon", "coordinates": [[[8.0, 47.0], [8.1, 47.0], [8.0, 47.1], [8.0, 47.0]]]}},
            {"type": "Feature", "properties": {"plz": "8001", "zz": "00"}, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_save_then_load_preserves_collection() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("plz.geojson");
        let collection = parse(SAMPLE).unwrap();

        save(&collection, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, collection);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("occupied.geojson");
        std::fs::create_dir(&path).unwrap();

        let err = save(&parse(SAMPLE).unwrap(), &path).unwrap_err();

        assert!(matches!(err, GeoprepError::Io { .. }));
        assert!(!temp_path(&path).exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load(&temp_dir.path().join("nope.geojson")).unwrap_err();
        assert!(matches!(err, GeoprepError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.geojson");
        std::fs::write(&path, "{not json").unwrap();

        let err = load(&path).unwrap_err();

        assert!(matches!(err, GeoprepError::Json { .. }));
    }

    #[test]
    fn test_load_malformed_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("list.geojson");
        std::fs::write(&path, r#"{"type": "FeatureCollection", "features": 3}"#).unwrap();

        let err = load(&path).unwrap_err();

        match err {
            GeoprepError::MalformedInput(msg) => assert!(msg.contains("list.geojson")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_saved_file_is_compact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.geojson");
        save(&parse(SAMPLE).unwrap(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.starts_with('{'));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/data/plz-ZH.geojson");
        assert_eq!(temp_path(path), PathBuf::from("/data/plz-ZH.geojson.tmp"));
    }
}
