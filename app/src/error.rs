use pcd_pipeline::PipelineError;
use pcd_stac::StacError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Stac(#[from] StacError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("object store: {0}")]
    Store(#[from] object_store::Error),

    #[error("invalid destination url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported destination `{0}`")]
    UnsupportedDestination(String),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("all {0} records failed")]
    AllFailed(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
