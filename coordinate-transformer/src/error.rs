use proj_sys_transformer::ProjError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Proj(#[from] ProjError),

    #[error("position {index} has {len} ordinates, expected at least 2")]
    ShortPosition { index: usize, len: usize },
}
