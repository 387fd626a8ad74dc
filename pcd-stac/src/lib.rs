//! STAC Collection and Item assembly for COPC lidar datasets.
//!
//! Raw engine metadata ([`pcd_core::RawMetadataBundle`]) is mapped onto the
//! Point Cloud and Projection extensions, the boundary is resolved to
//! EPSG:4326, and the result is packaged with per dataset family constants
//! ([`family::DatasetFamily`]).

pub mod builder;
pub mod error;
pub mod extensions;
pub mod family;
pub mod geometry;
pub mod model;
pub mod output;
pub mod validate;

pub use builder::{build_collection, ItemBuilder};
pub use error::StacError;
pub use family::DatasetFamily;
pub use model::{collection::Collection, item::Item};
pub use output::{save_collection, save_item, write_json};
pub use validate::{schema_issues, validate_collection, validate_item};
