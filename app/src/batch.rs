use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::glob;
use pcd_pipeline::{convert_to_copc, PointCloudEngine};

use crate::{error::AppError, upload::Uploader};

/// Reads one source per line; blank lines and `#` comments are skipped.
pub fn read_records(path: &Path) -> Result<Vec<String>, AppError> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Expands local glob patterns. Remote sources are passed through as is.
pub fn expand_globs(patterns: Vec<String>) -> Result<Vec<String>, AppError> {
    let mut sources = Vec::new();
    for pattern in patterns {
        let is_pattern = pattern.contains('*') || pattern.contains('?') || pattern.contains('[');
        if is_pattern && !pattern.contains("://") {
            for entry in glob(&pattern)? {
                match entry {
                    Ok(path) => sources.push(path.to_string_lossy().into_owned()),
                    Err(e) => log::warn!("skipping unreadable glob match: {:?}", e),
                }
            }
        } else {
            sources.push(pattern);
        }
    }
    Ok(sources)
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub uploaded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn into_result(self) -> Result<Self, AppError> {
        if self.uploaded.is_empty() && !self.failed.is_empty() {
            Err(AppError::AllFailed(self.failed.len()))
        } else {
            Ok(self)
        }
    }
}

fn convert_and_upload(
    engine: &dyn PointCloudEngine,
    source: &str,
    work_dir: &Path,
    uploader: &Uploader,
) -> Result<String, AppError> {
    let copc: PathBuf = convert_to_copc(engine, source, work_dir)?;
    let uploaded = uploader.upload(&copc)?;
    if let Err(e) = fs::remove_file(&copc) {
        log::warn!("could not remove {:?}: {}", copc, e);
    }
    Ok(uploaded)
}

/// Converts each source to COPC in `work_dir` and uploads it. A failing
/// record is logged and the loop moves on.
pub fn run_batch(
    engine: &dyn PointCloudEngine,
    sources: &[String],
    work_dir: &Path,
    uploader: &Uploader,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for (index, source) in sources.iter().enumerate() {
        log::info!("[{}/{}] {}", index + 1, sources.len(), source);
        match convert_and_upload(engine, source, work_dir, uploader) {
            Ok(location) => {
                log::info!("uploaded {}", location);
                summary.uploaded.push(location);
            }
            Err(e) => {
                log::error!("failed to convert {}: {}", source, e);
                summary.failed.push((source.clone(), e.to_string()));
            }
        }
    }
    summary
}
