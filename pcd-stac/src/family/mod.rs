//! Per-dataset configuration records.
//!
//! Every dataset family shares one builder; what differs between them
//! (identifiers, extents, licensing, the assets an item carries) lives in a
//! [`DatasetFamily`] constant.

use chrono::{DateTime, Utc};

use crate::model::{datetime, Asset, ItemAsset, Link, Provider, ProviderRole};

mod gedi_calval;
mod panama;

pub use gedi_calval::GEDI_CALVAL;
pub use panama::PANAMA;

/// Item asset key of the point cloud itself when the source name carries no
/// extension.
pub const PRIMARY_ASSET_KEY: &str = "copc.laz";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub media_type: &'static str,
    pub roles: &'static [&'static str],
}

impl AssetTemplate {
    pub fn item_asset(&self) -> ItemAsset {
        ItemAsset {
            title: Some(self.title.to_string()),
            description: Some(self.description.to_string()),
            media_type: Some(self.media_type.to_string()),
            roles: self.roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn asset(&self, href: &str) -> Asset {
        Asset {
            href: href.to_string(),
            title: Some(self.title.to_string()),
            description: Some(self.description.to_string()),
            media_type: Some(self.media_type.to_string()),
            roles: self.roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// A companion file published next to the point cloud, e.g. `<base>_PO.txt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sidecar {
    pub key: &'static str,
    pub suffix: &'static str,
    pub template: AssetTemplate,
}

impl Sidecar {
    /// Item-level asset; the description is only declared on the collection.
    pub fn asset(&self, href: &str) -> Asset {
        Asset {
            description: None,
            ..self.template.asset(href)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub roles: &'static [ProviderRole],
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkInfo {
    pub rel: &'static str,
    pub href: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Citation {
    pub citation: &'static str,
    pub doi: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetFamily {
    /// short name used in logs
    pub name: &'static str,
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub license: &'static str,
    pub providers: &'static [ProviderInfo],
    pub links: &'static [LinkInfo],
    pub citation: Option<Citation>,
    /// `[west, south, east, north]` per surveyed area
    pub spatial_extent: &'static [[f64; 4]],
    /// RFC 3339 start and end of every item; also the collection's interval
    pub item_window: [&'static str; 2],
    pub primary_asset: AssetTemplate,
    pub sidecars: &'static [Sidecar],
}

impl DatasetFamily {
    pub fn window(&self) -> [Option<DateTime<Utc>>; 2] {
        self.item_window.map(datetime::parse)
    }

    pub fn providers(&self) -> Vec<Provider> {
        self.providers
            .iter()
            .map(|p| Provider::new(p.name, p.roles, p.url))
            .collect()
    }

    pub fn links(&self) -> Vec<Link> {
        self.links
            .iter()
            .map(|l| Link::new(l.rel, l.href).with_title(l.title))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::datetime::utc;

    #[test]
    fn windows_parse() {
        assert_eq!(
            GEDI_CALVAL.window(),
            [utc(2019, 9, 13, 14, 0, 0), utc(2019, 9, 13, 23, 59, 59)]
        );
        assert_eq!(
            PANAMA.window(),
            [utc(2023, 5, 26, 0, 0, 0), utc(2023, 5, 27, 23, 59, 59)]
        );
    }

    #[test]
    fn sidecar_asset_has_no_description() {
        let sidecar = PANAMA.sidecars[0];
        let asset = sidecar.asset("a_PO.txt");
        assert_eq!(asset.description, None);
        assert_eq!(asset.title.as_deref(), Some("PO file"));
        assert!(sidecar.template.item_asset().description.is_some());
    }

    #[test]
    fn spatial_extents_are_ordered() {
        for family in [GEDI_CALVAL, PANAMA] {
            for [west, south, east, north] in family.spatial_extent {
                assert!(west <= east && south <= north, "{}", family.name);
            }
        }
    }
}
