use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use pcd_core::{MetadataBlock, RawMetadataBundle};
use serde_json::Value;

use super::PointCloudEngine;
use crate::{
    error::PipelineError,
    pipeline::{Pipeline, FILTER_HEXBIN, FILTER_INFO, FILTER_STATS, READER_COPC},
};

/// Runs pipelines through the `pdal` command line application.
#[derive(Debug, Clone)]
pub struct PdalEngine {
    executable: PathBuf,
}

impl Default for PdalEngine {
    fn default() -> Self {
        Self::new("pdal")
    }
}

impl PdalEngine {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Executes `pipeline` and returns the metadata document PDAL writes
    /// with `--metadata`.
    pub fn execute(&self, pipeline: &Pipeline) -> Result<Value, PipelineError> {
        let workdir = tempfile::tempdir()?;
        let pipeline_path = workdir.path().join("pipeline.json");
        let metadata_path = workdir.path().join("metadata.json");
        fs::write(&pipeline_path, pipeline.to_json()?)?;

        log::debug!("{:?} pipeline {:?}", self.executable, pipeline.stages());
        let output = Command::new(&self.executable)
            .arg("pipeline")
            .arg(&pipeline_path)
            .arg("--metadata")
            .arg(&metadata_path)
            .output()
            .map_err(|source| PipelineError::Launch {
                executable: self.executable.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PipelineError::Engine {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let metadata = fs::read_to_string(&metadata_path)?;
        Ok(serde_json::from_str(&metadata)?)
    }
}

impl PointCloudEngine for PdalEngine {
    fn extract_metadata(&self, path: &str) -> Result<RawMetadataBundle, PipelineError> {
        let root = self.execute(&Pipeline::metadata(path))?;
        Ok(bundle_from_metadata(&root))
    }

    fn convert_format(&self, source: &str, destination: &Path) -> Result<(), PipelineError> {
        let destination = destination.to_string_lossy();
        self.execute(&Pipeline::las_to_copc(source, &destination))?;
        Ok(())
    }
}

/// Splits a PDAL metadata document into per-stage blocks.
///
/// The CLI nests stages under `stages`, the Python bindings under `metadata`.
pub fn bundle_from_metadata(root: &Value) -> RawMetadataBundle {
    RawMetadataBundle {
        boundary: stage_block(root, FILTER_HEXBIN),
        stats: stage_block(root, FILTER_STATS),
        info: stage_block(root, FILTER_INFO),
        format_info: stage_block(root, READER_COPC),
    }
}

fn stage_block(root: &Value, stage: &str) -> MetadataBlock {
    let value = root
        .get("stages")
        .or_else(|| root.get("metadata"))
        .and_then(|stages| stages.get(stage));

    match value {
        // repeated stage types are reported as a list
        Some(Value::Array(entries)) => entries.first().cloned().map(MetadataBlock::new),
        Some(Value::Null) | None => None,
        Some(v) => Some(MetadataBlock::new(v.clone())),
    }
    .unwrap_or_default()
}
