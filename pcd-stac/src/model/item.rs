use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use geojson::Geometry;
use serde::Serialize;

use super::{datetime, Asset, Link, MEDIA_TYPE_GEOJSON, STAC_VERSION};
use crate::extensions::{pointcloud::PointcloudFields, projection::ProjectionFields};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Properties {
    #[serde(serialize_with = "datetime::serialize_option")]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "datetime::serialize_option"
    )]
    pub start_datetime: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "datetime::serialize_option"
    )]
    pub end_datetime: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub pointcloud: Option<PointcloudFields>,
    #[serde(flatten)]
    pub projection: Option<ProjectionFields>,
}

/// A STAC Item (GeoJSON Feature).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub kind: String,
    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    pub properties: Properties,
    pub links: Vec<Link>,
    pub assets: BTreeMap<String, Asset>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: "Feature".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: Vec::new(),
            id: id.into(),
            geometry: None,
            bbox: None,
            properties: Properties::default(),
            links: Vec::new(),
            assets: BTreeMap::new(),
        }
    }

    pub fn add_extension(&mut self, schema_uri: &str) {
        if !self.stac_extensions.iter().any(|uri| uri == schema_uri) {
            self.stac_extensions.push(schema_uri.to_string());
        }
    }

    pub fn add_asset(&mut self, key: &str, asset: Asset) {
        self.assets.insert(key.to_string(), asset);
    }

    /// Replaces any existing `self` link.
    pub fn set_self_href(&mut self, href: &str) {
        self.links.retain(|link| link.rel != "self");
        self.links
            .push(Link::new("self", href).with_type(MEDIA_TYPE_GEOJSON));
    }

    pub fn self_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "self")
            .map(|link| link.href.as_str())
    }
}
