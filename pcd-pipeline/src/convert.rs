use std::{
    fs,
    path::{Path, PathBuf},
};

use pcd_core::{naming, RawMetadataBundle};

use crate::{engines::PointCloudEngine, error::PipelineError};

pub const COPC_SUFFIX: &str = ".copc.laz";

/// `<base>.copc.laz` for a source href, with every source extension removed.
pub fn copc_file_name(source: &str) -> String {
    format!("{}{}", naming::item_id(source), COPC_SUFFIX)
}

/// Converts `source` to COPC inside `output_dir` and returns the new path.
pub fn convert_to_copc(
    engine: &dyn PointCloudEngine,
    source: &str,
    output_dir: &Path,
) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(output_dir)?;
    let output = output_dir.join(copc_file_name(source));

    let start = std::time::Instant::now();
    log::info!("converting {} to {:?}", source, output);
    engine.convert_format(source, &output)?;
    log::info!("finish converting in {:?}", start.elapsed());

    Ok(output)
}

pub fn extract_metadata(
    engine: &dyn PointCloudEngine,
    path: &str,
) -> Result<RawMetadataBundle, PipelineError> {
    let start = std::time::Instant::now();
    log::info!("extracting metadata from {}", path);
    let bundle = engine.extract_metadata(path)?;
    log::info!("finish extracting metadata in {:?}", start.elapsed());
    Ok(bundle)
}
