//! Checks run before a document is written.
//!
//! The serialized document is validated against the STAC JSON schemas (core
//! plus every declared extension), then against the ordering and extension
//! declaration rules the schemas cannot express. Every violation is
//! collected so that a failing command reports all of them at once.

pub mod schema;

use chrono::{DateTime, Utc};

use crate::{
    error::StacError,
    extensions::{
        ITEM_ASSETS_SCHEMA_URI, POINTCLOUD_SCHEMA_URI, PROJECTION_SCHEMA_URI,
        SCIENTIFIC_SCHEMA_URI,
    },
    model::{collection::Collection, item::Item},
};

pub use schema::{schema_issues, COLLECTION_SCHEMA_URI, ITEM_SCHEMA_URI};

pub fn validate_item(item: &Item) -> Result<(), StacError> {
    let document = serde_json::to_value(item)?;
    let mut issues = schema_issues(ITEM_SCHEMA_URI, &document)?;

    if let Some(bbox) = &item.bbox {
        check_bbox("bbox", bbox, Axes::Geographic, &mut issues);
    }

    let props = &item.properties;
    check_interval("start_datetime", props.start_datetime, props.end_datetime, &mut issues);

    if props.pointcloud.is_some() {
        require_extension(&item.stac_extensions, POINTCLOUD_SCHEMA_URI, "pc:*", &mut issues);
    }
    if let Some(proj) = &props.projection {
        require_extension(&item.stac_extensions, PROJECTION_SCHEMA_URI, "proj:*", &mut issues);
        if let Some(bbox) = &proj.bbox {
            check_bbox("proj:bbox", bbox, Axes::Projected, &mut issues);
        }
    }

    finish("Item", &item.id, issues)
}

pub fn validate_collection(collection: &Collection) -> Result<(), StacError> {
    let document = serde_json::to_value(collection)?;
    let mut issues = schema_issues(COLLECTION_SCHEMA_URI, &document)?;

    let extent = &collection.extent;
    for (i, bbox) in extent.spatial.bbox.iter().enumerate() {
        check_bbox(&format!("extent.spatial.bbox[{i}]"), bbox, Axes::Geographic, &mut issues);
    }
    for (i, [start, end]) in extent.temporal.interval.iter().enumerate() {
        check_interval(&format!("extent.temporal.interval[{i}]"), *start, *end, &mut issues);
    }

    if !collection.item_assets.is_empty() {
        require_extension(
            &collection.stac_extensions,
            ITEM_ASSETS_SCHEMA_URI,
            "item_assets",
            &mut issues,
        );
    }
    if collection.scientific.is_some() {
        require_extension(&collection.stac_extensions, SCIENTIFIC_SCHEMA_URI, "sci:*", &mut issues);
    }

    finish("Collection", &collection.id, issues)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axes {
    /// Longitude may wrap: west > east marks a box crossing the antimeridian.
    Geographic,
    Projected,
}

fn check_bbox(label: &str, bbox: &[f64], axes: Axes, issues: &mut Vec<String>) {
    if !matches!(bbox.len(), 4 | 6) {
        // length is a schema violation, reported there
        return;
    }
    if bbox.iter().any(|v| !v.is_finite()) {
        issues.push(format!("{label} has a non-finite value"));
    }
    let (min, max) = bbox.split_at(bbox.len() / 2);
    let skip = match axes {
        Axes::Geographic => 1,
        Axes::Projected => 0,
    };
    if min.iter().zip(max).skip(skip).any(|(lo, hi)| lo > hi) {
        issues.push(format!("{label} minimum exceeds maximum: {bbox:?}"));
    }
}

fn check_interval(
    label: &str,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    issues: &mut Vec<String>,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            issues.push(format!("{label} starts after it ends"));
        }
    }
}

fn require_extension(declared: &[String], uri: &str, fields: &str, issues: &mut Vec<String>) {
    if !declared.iter().any(|d| d == uri) {
        issues.push(format!("{fields} fields present but {uri} is not declared"));
    }
}

fn finish(kind: &'static str, id: &str, issues: Vec<String>) -> Result<(), StacError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(StacError::Validation {
            kind,
            id: id.to_string(),
            issues,
        })
    }
}
