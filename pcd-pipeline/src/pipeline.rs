use serde::Serialize;

pub const READER_COPC: &str = "readers.copc";
pub const READER_LAS: &str = "readers.las";
pub const WRITER_COPC: &str = "writers.copc";
pub const FILTER_HEXBIN: &str = "filters.hexbin";
pub const FILTER_STATS: &str = "filters.stats";
pub const FILTER_INFO: &str = "filters.info";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Stage {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            filename: None,
        }
    }

    pub fn with_filename(kind: &str, filename: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            filename: Some(filename.into()),
        }
    }
}

/// An ordered list of stages executed as one engine run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pipeline {
    pipeline: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, stage: Stage) -> Self {
        self.pipeline.push(stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.pipeline
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// read -> hexbin boundary -> statistics -> info, as `pdal info --all` does.
    pub fn metadata(filename: &str) -> Self {
        Self::new()
            .then(Stage::with_filename(READER_COPC, filename))
            .then(Stage::new(FILTER_HEXBIN))
            .then(Stage::new(FILTER_STATS))
            .then(Stage::new(FILTER_INFO))
    }

    pub fn las_to_copc(source: &str, destination: &str) -> Self {
        Self::new()
            .then(Stage::with_filename(READER_LAS, source))
            .then(Stage::with_filename(WRITER_COPC, destination))
    }
}
