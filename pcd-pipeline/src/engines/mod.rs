use std::path::Path;

use pcd_core::RawMetadataBundle;

use crate::error::PipelineError;

pub mod pdal;

/// The point cloud processing capabilities the STAC builders rely on.
pub trait PointCloudEngine {
    /// Runs read -> hexbin -> stats -> info over `path` and returns the four
    /// stage metadata blocks.
    fn extract_metadata(&self, path: &str) -> Result<RawMetadataBundle, PipelineError>;

    /// Rewrites the LAS/LAZ file at `source` as COPC at `destination`.
    fn convert_format(&self, source: &str, destination: &Path) -> Result<(), PipelineError>;
}
