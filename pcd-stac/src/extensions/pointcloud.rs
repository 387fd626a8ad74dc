use pcd_core::MetadataBlock;
use serde::{Deserialize, Serialize};

pub const ENCODING_LASZIP: &str = "LASzip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phenomenology {
    Lidar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub name: String,
    pub size: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
}

/// `pc:*` properties of an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointcloudFields {
    #[serde(rename = "pc:count")]
    pub count: u64,
    #[serde(rename = "pc:type")]
    pub phenomenology: Phenomenology,
    #[serde(rename = "pc:encoding")]
    pub encoding: String,
    #[serde(rename = "pc:schemas")]
    pub schemas: Vec<SchemaEntry>,
    #[serde(rename = "pc:density")]
    pub density: f64,
    #[serde(rename = "pc:statistics", skip_serializing_if = "Vec::is_empty")]
    pub statistics: Vec<Statistic>,
}

/// Maps the hexbin, stats, info and reader blocks onto the Point Cloud
/// extension. Absent values take their defaults; a list with any malformed
/// entry is dropped as a whole.
pub fn map_pointcloud(
    boundary: &MetadataBlock,
    stats: &MetadataBlock,
    info: &MetadataBlock,
    format_info: &MetadataBlock,
) -> PointcloudFields {
    PointcloudFields {
        count: format_info.lookup_or(&["count"], 0),
        phenomenology: Phenomenology::Lidar,
        encoding: ENCODING_LASZIP.to_string(),
        schemas: info.lookup_or(&["schema", "dimensions"], Vec::new()),
        density: boundary.lookup_or(&["avg_pt_per_sq_unit"], 0.0),
        statistics: stats.lookup_or(&["statistic"], Vec::new()),
    }
}
