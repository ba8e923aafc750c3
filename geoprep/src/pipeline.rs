//! Per-region build stages.
//!
//! Each stage loads its inputs through a [`LoadCache`], runs the pure
//! transformations and saves one output file. Outputs are written only after
//! every transformation succeeded. Stages run in the fixed order
//! split → cleanup; there is no dependency tracking between them.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::GeoprepResult;
use crate::filter::filter_region_by;
use crate::join::{join_geometry, CompositeKey};
use crate::offset::{offset_coordinates, Offset};
use crate::project::{project_properties, PropertyMapping};
use crate::store::LoadCache;
use crate::validate::{validate_properties, PropertyChecks};

/// Name of the file holding one region's features.
pub fn split_file_name(region: &str) -> String {
    format!("plz-{}.geojson", region)
}

/// Name of the file holding one region's cleaned-up features.
pub fn fixed_file_name(region: &str) -> String {
    format!("plz-{}-fixed.geojson", region)
}

/// Stage that produced a [`StageReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Region extraction from the raw national file
    Split,
    /// Property projection and coordinate offset
    Cleanup,
    /// Geometry join by postcode key
    Join,
}

impl Stage {
    /// Lowercase name as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Split => "split",
            Stage::Cleanup => "cleanup",
            Stage::Join => "join",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one completed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// Stage that ran
    pub stage: Stage,
    /// File the stage wrote
    pub output: PathBuf,
    /// Features in the stage's primary input
    pub input_features: usize,
    /// Features written to `output`
    pub output_features: usize,
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} {} -> {} features  {}",
            self.stage,
            self.input_features,
            self.output_features,
            self.output.display()
        )
    }
}

/// Filter the raw national file down to `region` and save it to `output`.
pub fn split_by_region(
    cache: &mut LoadCache,
    raw: &Path,
    attribute: &str,
    region: &str,
    output: &Path,
) -> GeoprepResult<StageReport> {
    let collection = cache.load(raw)?;
    let filtered = filter_region_by(&collection, attribute, region)?;
    cache.save(&filtered, output)?;

    let report = StageReport {
        stage: Stage::Split,
        output: output.to_path_buf(),
        input_features: collection.len(),
        output_features: filtered.len(),
    };
    info!(region, kept = report.output_features, "Split region");
    Ok(report)
}

/// Shift coordinates by `offset` (when given) and reduce properties to the
/// published postcode set.
pub fn cleanup(
    cache: &mut LoadCache,
    input: &Path,
    output: &Path,
    offset: Option<Offset>,
) -> GeoprepResult<StageReport> {
    let collection = cache.load(input)?;
    let projected = match offset {
        Some(offset) => project_properties(
            &offset_coordinates(&collection, offset),
            &PropertyMapping::postcode_output(),
        )?,
        None => project_properties(&collection, &PropertyMapping::postcode_output())?,
    };
    cache.save(&projected, output)?;

    info!(
        input = %input.display(),
        offset = offset.is_some(),
        "Cleaned up features"
    );
    Ok(StageReport {
        stage: Stage::Cleanup,
        output: output.to_path_buf(),
        input_features: collection.len(),
        output_features: projected.len(),
    })
}

/// Attach postcode polygons from `geometry` to the postcode table in `data`,
/// check the joined postcodes and save the result.
pub fn join_files(
    cache: &mut LoadCache,
    data: &Path,
    geometry: &Path,
    output: &Path,
) -> GeoprepResult<StageReport> {
    let data_collection = cache.load(data)?;
    let geometry_collection = cache.load(geometry)?;

    let joined = join_geometry(
        (&data_collection, &CompositeKey::postcode_data()),
        (&geometry_collection, &CompositeKey::postcode_geometry()),
    )?;
    validate_properties(&joined, &PropertyChecks::postcode_data())?;
    cache.save(&joined, output)?;

    info!(features = joined.len(), output = %output.display(), "Joined geometry");
    Ok(StageReport {
        stage: Stage::Join,
        output: output.to_path_buf(),
        input_features: data_collection.len(),
        output_features: joined.len(),
    })
}

/// What a full build runs over.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPlan {
    /// Directory holding the raw file and receiving every output
    pub data_dir: PathBuf,
    /// Raw national file name inside `data_dir`
    pub raw_file: String,
    /// Property holding the region code
    pub region_attribute: String,
    /// Regions to build, in order
    pub regions: Vec<String>,
    /// Offset applied during cleanup, `None` to skip it
    pub offset: Option<Offset>,
}

impl BuildPlan {
    /// Path of the raw national file.
    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join(&self.raw_file)
    }

    /// Path of the split file for `region`.
    pub fn split_path(&self, region: &str) -> PathBuf {
        self.data_dir.join(split_file_name(region))
    }

    /// Path of the cleaned-up file for `region`.
    pub fn fixed_path(&self, region: &str) -> PathBuf {
        self.data_dir.join(fixed_file_name(region))
    }
}

/// Run split then cleanup for every region of `plan`.
///
/// The raw file is parsed once per cache. The first failing stage aborts the
/// build; files written by earlier stages are left in place.
pub fn build_regions(cache: &mut LoadCache, plan: &BuildPlan) -> GeoprepResult<Vec<StageReport>> {
    let raw = plan.raw_path();
    let mut reports = Vec::with_capacity(plan.regions.len() * 2);

    for region in &plan.regions {
        let split = plan.split_path(region);
        let fixed = plan.fixed_path(region);

        reports.push(split_by_region(
            cache,
            &raw,
            &plan.region_attribute,
            region,
            &split,
        )?);
        reports.push(cleanup(cache, &split, &fixed, plan.offset)?);
    }

    let stats = cache.stats();
    info!(
        regions = plan.regions.len(),
        cache_hits = stats.hits,
        cache_misses = stats.misses,
        "Build complete"
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoprepError;
    use crate::filter::REGION_ATTRIBUTE;
    use crate::model::PropertyValue;
    use crate::offset::SWISS_GRID_OFFSET;
    use crate::store;
    use tempfile::TempDir;

    const RAW: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"kanton": "ZH", "postleitzahl": "8001", "ortbez27": "Zürich", "zz": "00"},
             "geometry": {"type": "Polygon", "coordinates": [[[8.5, 47.3], [8.6, 47.3], [8.5, 47.4], [8.5, 47.3]]]}},
            {"type": "Feature",
             "properties": {"kanton": "BE", "postleitzahl": "3000", "ortbez27": "Bern", "zz": "00"},
             "geometry": {"type": "Polygon", "coordinates": [[[7.4, 46.9], [7.5, 46.9], [7.4, 47.0], [7.4, 46.9]]]}},
            {"type": "Feature",
             "properties": {"kanton": "ZH", "postleitzahl": "8002", "ortbez27": "Zürich", "zz": "00"},
             "geometry": null}
        ]
    }"#;

    fn plan(dir: &Path, regions: &[&str]) -> BuildPlan {
        std::fs::write(dir.join("plz.geojson"), RAW).unwrap();
        BuildPlan {
            data_dir: dir.to_path_buf(),
            raw_file: "plz.geojson".to_string(),
            region_attribute: REGION_ATTRIBUTE.to_string(),
            regions: regions.iter().map(|r| r.to_string()).collect(),
            offset: Some(SWISS_GRID_OFFSET),
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(split_file_name("ZH"), "plz-ZH.geojson");
        assert_eq!(fixed_file_name("ZH"), "plz-ZH-fixed.geojson");
    }

    #[test]
    fn test_split_writes_region_file() {
        let temp_dir = TempDir::new().unwrap();
        let plan = plan(temp_dir.path(), &["ZH"]);
        let mut cache = LoadCache::new();

        let report = split_by_region(
            &mut cache,
            &plan.raw_path(),
            REGION_ATTRIBUTE,
            "ZH",
            &plan.split_path("ZH"),
        )
        .unwrap();

        assert_eq!(report.input_features, 3);
        assert_eq!(report.output_features, 1);
        let split = store::load(&plan.split_path("ZH")).unwrap();
        assert_eq!(
            split.features[0].property("postleitzahl"),
            Some(&PropertyValue::from("8001"))
        );
    }

    #[test]
    fn test_cleanup_reduces_properties() {
        let temp_dir = TempDir::new().unwrap();
        let plan = plan(temp_dir.path(), &["ZH"]);
        let mut cache = LoadCache::new();
        split_by_region(
            &mut cache,
            &plan.raw_path(),
            REGION_ATTRIBUTE,
            "ZH",
            &plan.split_path("ZH"),
        )
        .unwrap();

        cleanup(&mut cache, &plan.split_path("ZH"), &plan.fixed_path("ZH"), None).unwrap();

        let fixed = store::load(&plan.fixed_path("ZH")).unwrap();
        let keys: Vec<_> = fixed.features[0].properties.keys().cloned().collect();
        assert_eq!(keys, vec!["ortbez".to_string(), "plz".to_string()]);
        let split = store::load(&plan.split_path("ZH")).unwrap();
        assert_eq!(fixed.features[0].geometry, split.features[0].geometry);
    }

    #[test]
    fn test_build_parses_raw_file_once() {
        let temp_dir = TempDir::new().unwrap();
        let plan = plan(temp_dir.path(), &["ZH", "BE"]);
        let mut cache = LoadCache::new();

        let reports = build_regions(&mut cache, &plan).unwrap();

        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].stage, Stage::Split);
        assert_eq!(reports[3].stage, Stage::Cleanup);
        assert!(plan.fixed_path("ZH").exists());
        assert!(plan.fixed_path("BE").exists());
        // raw file served from memory for the second region
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_build_stops_on_missing_raw_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut plan = plan(temp_dir.path(), &["ZH"]);
        plan.raw_file = "missing.geojson".to_string();

        let err = build_regions(&mut LoadCache::new(), &plan).unwrap_err();

        assert!(matches!(err, GeoprepError::Io { .. }));
        assert!(!plan.split_path("ZH").exists());
    }

    #[test]
    fn test_join_files_validates_output() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data.geojson");
        let geometry = temp_dir.path().join("geom.geojson");
        let output = temp_dir.path().join("out").join("joined.geojson");
        std::fs::write(
            &data,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"plz": "8000", "zz": "01"}, "geometry": null}
            ]}"#,
        )
        .unwrap();
        std::fs::write(
            &geometry,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"PLZ": 8000, "ZUSZIFF": 1},
                 "geometry": {"type": "Point", "coordinates": [8.5, 47.4]}}
            ]}"#,
        )
        .unwrap();

        let report = join_files(&mut LoadCache::new(), &data, &geometry, &output).unwrap();

        assert_eq!(report.output_features, 1);
        assert!(store::load(&output).unwrap().features[0].has_geometry());
    }

    #[test]
    fn test_join_failure_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data.geojson");
        let geometry = temp_dir.path().join("geom.geojson");
        let output = temp_dir.path().join("joined.geojson");
        std::fs::write(
            &data,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"plz": "8001", "zz": "00"}, "geometry": null}
            ]}"#,
        )
        .unwrap();
        std::fs::write(&geometry, r#"{"type": "FeatureCollection", "features": []}"#).unwrap();

        let err = join_files(&mut LoadCache::new(), &data, &geometry, &output).unwrap_err();

        assert!(matches!(err, GeoprepError::MissingGeometry { .. }));
        assert!(!output.exists());
    }
}
