//! Shared plumbing of the `copc-stac` and `copc-batch` binaries.

use std::{io::Write, path::PathBuf};

use chrono::Local;
use clap::Args;
use coordinate_transformer::ProjCrsTransform;
use env_logger::{Builder, Env};
use pcd_pipeline::PdalEngine;

pub mod batch;
pub mod error;
pub mod upload;

pub use error::AppError;

/// `2024-11-02 10:31:07 [INFO] - message`, `info` unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Locations of the external engines.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// PDAL executable
    #[arg(long, env = "PDAL_EXECUTABLE", default_value = "pdal", value_name = "PATH", global = true)]
    pub pdal: PathBuf,

    /// Extra PROJ resource directory (proj.db, grids)
    #[arg(long, env = "PROJ_DATA", value_name = "DIR", global = true)]
    pub proj_data_dir: Option<PathBuf>,
}

impl EngineArgs {
    pub fn engine(&self) -> PdalEngine {
        PdalEngine::new(self.pdal.clone())
    }

    pub fn crs_transform(&self) -> ProjCrsTransform {
        ProjCrsTransform::new(self.proj_data_dir.as_deref())
    }
}
