//! STAC extension fields and their schema URIs.

pub mod pointcloud;
pub mod projection;
pub mod scientific;

pub const POINTCLOUD_SCHEMA_URI: &str =
    "https://stac-extensions.github.io/pointcloud/v1.0.0/schema.json";
pub const PROJECTION_SCHEMA_URI: &str =
    "https://stac-extensions.github.io/projection/v2.0.0/schema.json";
pub const ITEM_ASSETS_SCHEMA_URI: &str =
    "https://stac-extensions.github.io/item-assets/v1.0.0/schema.json";
pub const SCIENTIFIC_SCHEMA_URI: &str =
    "https://stac-extensions.github.io/scientific/v1.0.0/schema.json";
