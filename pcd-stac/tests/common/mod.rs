#![allow(dead_code)]

use std::{cell::RefCell, fs, path::Path};

use coordinate_transformer::{CrsTransform, ProjectionError};
use geojson::{Geometry, Value as GeoValue};
use pcd_core::RawMetadataBundle;
use pcd_pipeline::{engines::pdal::bundle_from_metadata, PipelineError, PointCloudEngine};

pub const SRER: &str =
    "usa_neonsrer_2019_NEON_D14_SRER_DP1_L090-1_2019091314_unclassified_point_cloud_0000003";

const FIXTURE: &str = include_str!("../../../pcd-pipeline/tests/data/srer_metadata.json");
const FIXTURE_NO_SRS: &str =
    include_str!("../../../pcd-pipeline/tests/data/srer_metadata_no_srs.json");

fn bundle(text: &str) -> RawMetadataBundle {
    let root = serde_json::from_str(text).expect("fixture is valid JSON");
    bundle_from_metadata(&root)
}

/// SRER tile metadata with its UTM 12N WKT spatial reference.
pub fn srer_bundle() -> RawMetadataBundle {
    bundle(FIXTURE)
}

/// The same tile as read from a file without a spatial reference.
pub fn srer_bundle_without_srs() -> RawMetadataBundle {
    bundle(FIXTURE_NO_SRS)
}

/// Serves the SRER fixture for every path and records what it was asked.
#[derive(Default)]
pub struct FixtureEngine {
    pub extracted: RefCell<Vec<String>>,
    pub converted: RefCell<Vec<(String, String)>>,
}

impl PointCloudEngine for FixtureEngine {
    fn extract_metadata(&self, path: &str) -> Result<RawMetadataBundle, PipelineError> {
        self.extracted.borrow_mut().push(path.to_string());
        Ok(srer_bundle())
    }

    fn convert_format(&self, source: &str, destination: &Path) -> Result<(), PipelineError> {
        fs::write(destination, b"")?;
        self.converted
            .borrow_mut()
            .push((source.to_string(), destination.to_string_lossy().into_owned()));
        Ok(())
    }
}

pub struct FailingEngine;

impl PointCloudEngine for FailingEngine {
    fn extract_metadata(&self, _path: &str) -> Result<RawMetadataBundle, PipelineError> {
        Err(PipelineError::Engine {
            status: "exit status: 1".to_string(),
            stderr: "readers.copc: Unable to open stream".to_string(),
        })
    }

    fn convert_format(&self, _source: &str, _destination: &Path) -> Result<(), PipelineError> {
        Err(PipelineError::Engine {
            status: "exit status: 1".to_string(),
            stderr: "readers.las: Invalid file signature".to_string(),
        })
    }
}

/// Moves every position to the origin so a reprojected geometry is easy to
/// tell from the fallback.
pub struct OriginCrs;

impl CrsTransform for OriginCrs {
    fn reproject_geometry(
        &self,
        geometry: &Geometry,
        _source_crs: &str,
    ) -> Result<Geometry, ProjectionError> {
        Ok(Geometry::new(collapse(&geometry.value)))
    }

    fn to_wkt2(&self, crs: &str) -> Result<String, ProjectionError> {
        Ok(format!("PROJCRS[\"{crs}\"]"))
    }
}

fn collapse(value: &GeoValue) -> GeoValue {
    let origin = |_: &Vec<f64>| vec![0.0, 0.0];
    match value {
        GeoValue::Polygon(rings) => GeoValue::Polygon(
            rings.iter().map(|r| r.iter().map(origin).collect()).collect(),
        ),
        GeoValue::MultiPolygon(polygons) => GeoValue::MultiPolygon(
            polygons
                .iter()
                .map(|p| p.iter().map(|r| r.iter().map(origin).collect()).collect())
                .collect(),
        ),
        other => other.clone(),
    }
}
