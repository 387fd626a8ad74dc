use std::path::Path;

use coordinate_transformer::CrsTransform;
use pcd_core::{naming, RawMetadataBundle};
use pcd_pipeline::{convert_to_copc, extract_metadata, PointCloudEngine};

use crate::{
    error::StacError,
    extensions::{
        pointcloud::map_pointcloud, projection::map_projection, scientific::ScientificFields,
        ITEM_ASSETS_SCHEMA_URI, POINTCLOUD_SCHEMA_URI, PROJECTION_SCHEMA_URI,
        SCIENTIFIC_SCHEMA_URI,
    },
    family::{DatasetFamily, PRIMARY_ASSET_KEY},
    geometry::resolve_geometry,
    model::{
        collection::{Collection, Extent},
        item::Item,
    },
};

/// Builds the static collection of a dataset family. Nothing here depends on
/// the items.
pub fn build_collection(family: &DatasetFamily) -> Collection {
    let extent = Extent::new(family.spatial_extent, family.window());
    let mut collection = Collection::new(family.id, family.description, extent);
    collection.title = Some(family.title.to_string());
    collection.keywords = family.keywords.iter().map(|k| k.to_string()).collect();
    collection.license = family.license.to_string();
    collection.providers = family.providers();
    collection.links = family.links();
    collection.stac_extensions = vec![
        POINTCLOUD_SCHEMA_URI.to_string(),
        PROJECTION_SCHEMA_URI.to_string(),
        ITEM_ASSETS_SCHEMA_URI.to_string(),
    ];

    collection.item_assets.insert(
        PRIMARY_ASSET_KEY.to_string(),
        family.primary_asset.item_asset(),
    );
    for sidecar in family.sidecars {
        collection
            .item_assets
            .insert(sidecar.key.to_string(), sidecar.template.item_asset());
    }

    if let Some(citation) = family.citation {
        collection.scientific = Some(ScientificFields::new(citation.citation, citation.doi));
        collection
            .stac_extensions
            .push(SCIENTIFIC_SCHEMA_URI.to_string());
    }

    collection
}

/// Builds one item per source point cloud.
pub struct ItemBuilder<'a> {
    family: &'a DatasetFamily,
    engine: &'a dyn PointCloudEngine,
    crs: &'a dyn CrsTransform,
    convert: bool,
}

impl<'a> ItemBuilder<'a> {
    pub fn new(
        family: &'a DatasetFamily,
        engine: &'a dyn PointCloudEngine,
        crs: &'a dyn CrsTransform,
    ) -> Self {
        Self {
            family,
            engine,
            crs,
            convert: false,
        }
    }

    /// Converts the source to COPC inside the destination before reading it.
    pub fn convert_to_copc(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    pub fn build(&self, source: &str, destination: &Path) -> Result<Item, StacError> {
        let source = if self.convert {
            convert_to_copc(self.engine, source, destination)?
                .to_string_lossy()
                .into_owned()
        } else {
            source.to_string()
        };

        let bundle = extract_metadata(self.engine, &source)?;
        self.build_from_metadata(&source, &bundle)
    }

    /// Assembles the item for `source` from already extracted metadata.
    pub fn build_from_metadata(&self, source: &str, bundle: &RawMetadataBundle) -> Result<Item, StacError> {
        let family = self.family;
        let mut item = Item::new(naming::item_id(source));
        log::debug!("building {} item {}", family.name, item.id);

        let resolved = resolve_geometry(&bundle.boundary, &bundle.format_info, &bundle.stats, self.crs)?;
        item.geometry = Some(resolved.geometry);
        item.bbox = Some(resolved.bbox);

        let [start, end] = family.window();
        item.properties.datetime = None;
        item.properties.start_datetime = start;
        item.properties.end_datetime = end;

        let primary_key = naming::compound_extension(source).unwrap_or(PRIMARY_ASSET_KEY);
        item.add_asset(primary_key, family.primary_asset.asset(source));
        for sidecar in family.sidecars {
            let href = naming::sibling_href(source, sidecar.suffix);
            item.add_asset(sidecar.key, sidecar.asset(&href));
        }

        item.properties.pointcloud = Some(map_pointcloud(
            &bundle.boundary,
            &bundle.stats,
            &bundle.info,
            &bundle.format_info,
        ));
        item.add_extension(POINTCLOUD_SCHEMA_URI);

        item.properties.projection = Some(map_projection(
            &bundle.info,
            &bundle.boundary,
            &bundle.stats,
            self.crs,
        )?);
        item.add_extension(PROJECTION_SCHEMA_URI);

        Ok(item)
    }
}
