use coordinate_transformer::CrsTransform;
use geojson::Geometry;
use pcd_core::{metadata::lenient_f64, MetadataBlock};
use serde_json::Value;

use crate::error::StacError;

const BBOX_KEYS: [&str; 6] = ["minx", "miny", "minz", "maxx", "maxy", "maxz"];

const FALLBACK_BOUNDARY: [&str; 3] = ["bbox", "EPSG:4326", "boundary"];
const GEOGRAPHIC_BBOX: [&str; 3] = ["bbox", "EPSG:4326", "bbox"];

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    pub geometry: Geometry,
    /// `[minx, miny, minz, maxx, maxy, maxz]`
    pub bbox: Vec<f64>,
}

/// Reads a `{minx, miny, minz, maxx, maxy, maxz}` object as six floats.
pub fn bbox6(block: &MetadataBlock, path: &[&str]) -> Option<Vec<f64>> {
    let object = block.lookup(path)?.as_object()?;
    BBOX_KEYS
        .iter()
        .map(|key| object.get(*key).and_then(lenient_f64))
        .collect()
}

/// Resolves the item footprint in EPSG:4326.
///
/// The hexbin boundary is reprojected from the reader's spatial reference.
/// When that is not possible the stats filter's EPSG:4326 boundary is used
/// instead. The bbox always comes from the stats filter, so it may describe
/// a different shape than the geometry.
pub fn resolve_geometry(
    boundary: &MetadataBlock,
    format_info: &MetadataBlock,
    stats: &MetadataBlock,
    crs: &dyn CrsTransform,
) -> Result<ResolvedGeometry, StacError> {
    let geometry = match reproject_boundary(boundary, format_info, crs) {
        Ok(geometry) => geometry,
        Err(reason) => {
            log::debug!("using stats boundary as item geometry: {}", reason);
            stats
                .lookup(&FALLBACK_BOUNDARY)
                .and_then(|value| parse_geometry(value).ok())
                .ok_or_else(|| StacError::MissingField(FALLBACK_BOUNDARY.join(".")))?
        }
    };

    let bbox = bbox6(stats, &GEOGRAPHIC_BBOX)
        .ok_or_else(|| StacError::MissingField(GEOGRAPHIC_BBOX.join(".")))?;

    Ok(ResolvedGeometry { geometry, bbox })
}

fn reproject_boundary(
    boundary: &MetadataBlock,
    format_info: &MetadataBlock,
    crs: &dyn CrsTransform,
) -> Result<Geometry, String> {
    let value = boundary
        .lookup(&["boundary_json"])
        .ok_or("no hexbin boundary_json")?;
    let source_crs = format_info
        .lookup_str(&["comp_spatialreference"])
        .ok_or("no comp_spatialreference")?;
    let geometry = parse_geometry(value)?;
    crs.reproject_geometry(&geometry, source_crs)
        .map_err(|e| e.to_string())
}

/// Accepts a GeoJSON object or a string holding one.
fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let value = match value {
        Value::String(text) => serde_json::from_str(text).map_err(|e| e.to_string())?,
        other => other.clone(),
    };
    Geometry::from_json_value(value).map_err(|e| e.to_string())
}
