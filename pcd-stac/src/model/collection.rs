use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    datetime::{self, Interval},
    ItemAsset, Link, Provider, MEDIA_TYPE_JSON, STAC_VERSION,
};
use crate::extensions::scientific::ScientificFields;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialExtent {
    pub bbox: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalExtent {
    #[serde(serialize_with = "datetime::serialize_intervals")]
    pub interval: Vec<Interval>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extent {
    pub spatial: SpatialExtent,
    pub temporal: TemporalExtent,
}

impl Extent {
    pub fn new(bboxes: &[[f64; 4]], interval: Interval) -> Self {
        Self {
            spatial: SpatialExtent {
                bbox: bboxes.iter().map(|b| b.to_vec()).collect(),
            },
            temporal: TemporalExtent {
                interval: vec![interval],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    #[serde(rename = "type")]
    pub kind: String,
    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub license: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<Provider>,
    pub extent: Extent,
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub item_assets: BTreeMap<String, ItemAsset>,
    #[serde(flatten)]
    pub scientific: Option<ScientificFields>,
}

impl Collection {
    pub fn new(id: &str, description: &str, extent: Extent) -> Self {
        Self {
            kind: "Collection".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: Vec::new(),
            id: id.to_string(),
            title: None,
            description: description.to_string(),
            keywords: Vec::new(),
            license: "other".to_string(),
            providers: Vec::new(),
            extent,
            links: Vec::new(),
            item_assets: BTreeMap::new(),
            scientific: None,
        }
    }

    /// A standalone collection is its own root.
    pub fn set_self_href(&mut self, href: &str) {
        self.links.retain(|link| link.rel != "self" && link.rel != "root");
        self.links
            .insert(0, Link::new("root", href).with_type(MEDIA_TYPE_JSON));
        self.links
            .insert(1, Link::new("self", href).with_type(MEDIA_TYPE_JSON));
    }
}
