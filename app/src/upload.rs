use std::{fs, path::Path, sync::Arc};

use object_store::{
    aws::AmazonS3Builder, local::LocalFileSystem, path::Path as ObjectPath, ObjectStore,
    PutPayload,
};
use tokio::runtime::{Builder, Runtime};
use url::Url;

use crate::error::AppError;

/// Uploads converted files under one destination prefix.
///
/// `s3://bucket/prefix` goes through the S3 client configured from the usual
/// `AWS_*` environment variables; anything else is treated as a local
/// directory.
pub struct Uploader {
    store: Arc<dyn ObjectStore>,
    prefix: String,
    display: String,
    runtime: Runtime,
}

impl Uploader {
    pub fn new(destination: &str) -> Result<Self, AppError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let (store, prefix): (Arc<dyn ObjectStore>, String) =
            if destination.contains("://") {
                let url = Url::parse(destination)?;
                if url.scheme() != "s3" {
                    return Err(AppError::UnsupportedDestination(destination.to_string()));
                }
                let bucket = url
                    .host_str()
                    .ok_or_else(|| AppError::UnsupportedDestination(destination.to_string()))?;
                let store = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .build()?;
                (Arc::new(store), url.path().trim_matches('/').to_string())
            } else {
                fs::create_dir_all(destination)?;
                (Arc::new(LocalFileSystem::new_with_prefix(destination)?), String::new())
            };

        Ok(Self {
            store,
            prefix,
            display: destination.trim_end_matches('/').to_string(),
            runtime,
        })
    }

    /// Object key for a local file: `<prefix>/<file name>`.
    pub fn location(&self, file: &Path) -> ObjectPath {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.prefix.is_empty() {
            ObjectPath::from(name)
        } else {
            ObjectPath::from(format!("{}/{}", self.prefix, name))
        }
    }

    /// Uploads `file` and returns where it landed.
    pub fn upload(&self, file: &Path) -> Result<String, AppError> {
        let location = self.location(file);
        let payload = PutPayload::from(fs::read(file)?);
        self.runtime
            .block_on(self.store.put(&location, payload))?;

        let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        Ok(format!("{}/{}", self.display, name))
    }
}
