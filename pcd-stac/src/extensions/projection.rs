use coordinate_transformer::CrsTransform;
use pcd_core::MetadataBlock;
use serde::Serialize;
use serde_json::Value;

use crate::{error::StacError, geometry::bbox6};

/// `proj:*` properties of an item, in the source CRS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionFields {
    #[serde(rename = "proj:projjson", skip_serializing_if = "Option::is_none")]
    pub projjson: Option<Value>,
    #[serde(rename = "proj:bbox", skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    #[serde(rename = "proj:geometry", skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
    #[serde(rename = "proj:wkt2", skip_serializing_if = "Option::is_none")]
    pub wkt2: Option<String>,
}

pub fn map_projection(
    info: &MetadataBlock,
    boundary: &MetadataBlock,
    stats: &MetadataBlock,
    crs: &dyn CrsTransform,
) -> Result<ProjectionFields, StacError> {
    let projjson = info
        .lookup(&["srs", "json"])
        .filter(|value| !is_blank(value))
        .cloned();

    let geometry = boundary
        .lookup(&["boundary_json"])
        .filter(|value| !is_blank(value))
        .cloned();

    let wkt2 = match info.lookup_str(&["srs", "horizontal"]) {
        Some(horizontal) => Some(crs.to_wkt2(horizontal)?),
        None => None,
    };

    Ok(ProjectionFields {
        projjson,
        bbox: bbox6(stats, &["bbox", "native", "bbox"]),
        geometry,
        wkt2,
    })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
