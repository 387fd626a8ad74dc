use coordinate_transformer::ProjectionError;
use pcd_pipeline::PipelineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StacError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("metadata field `{0}` is missing")]
    MissingField(String),

    #[error("{kind} `{id}` is not valid STAC:\n  - {}", issues.join("\n  - "))]
    Validation {
        kind: &'static str,
        id: String,
        issues: Vec<String>,
    },

    #[error("schema {uri} could not be compiled: {message}")]
    Schema { uri: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
