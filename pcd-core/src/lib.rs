pub mod metadata;
pub mod naming;

pub use metadata::{MetadataBlock, RawMetadataBundle};
