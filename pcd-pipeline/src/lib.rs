pub mod convert;
pub mod engines;
pub mod error;
pub mod pipeline;

pub use convert::{convert_to_copc, copc_file_name, extract_metadata};
pub use engines::{pdal::PdalEngine, PointCloudEngine};
pub use error::PipelineError;
pub use pipeline::{Pipeline, Stage};
