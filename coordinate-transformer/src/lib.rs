mod error;
mod transformer;

pub use error::ProjectionError;
pub use transformer::{CrsTransform, ProjCrsTransform, EPSG_WGS84_GEOGRAPHIC_2D};
