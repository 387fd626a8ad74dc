use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    error::StacError,
    model::{collection::Collection, item::Item},
    validate::{validate_collection, validate_item},
};

/// Writes pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), StacError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf, StacError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Sets the self and root links, validates, and writes the collection to
/// `destination`. Nothing is written when validation fails.
pub fn save_collection(collection: &mut Collection, destination: &Path) -> Result<PathBuf, StacError> {
    let path = absolute(destination)?;
    collection.set_self_href(&path.to_string_lossy());
    validate_collection(collection)?;
    write_json(collection, &path)?;
    log::info!("wrote collection {} to {:?}", collection.id, path);
    Ok(path)
}

/// Writes the item to `<destination>/<id>.json` after validating it.
pub fn save_item(item: &mut Item, destination: &Path) -> Result<PathBuf, StacError> {
    let path = absolute(&destination.join(format!("{}.json", item.id)))?;
    item.set_self_href(&path.to_string_lossy());
    validate_item(item)?;
    write_json(item, &path)?;
    log::info!("wrote item {} to {:?}", item.id, path);
    Ok(path)
}
