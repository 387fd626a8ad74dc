//! JSON Schema validation against bundled copies of the STAC core and
//! extension schemas, so no schema is fetched at run time.

use jsonschema::{Draft, Retrieve, Uri, ValidationError, Validator};
use serde_json::Value;

use crate::{
    error::StacError,
    extensions::{
        ITEM_ASSETS_SCHEMA_URI, POINTCLOUD_SCHEMA_URI, PROJECTION_SCHEMA_URI,
        SCIENTIFIC_SCHEMA_URI,
    },
};

pub const ITEM_SCHEMA_URI: &str =
    "https://schemas.stacspec.org/v1.1.0/item-spec/json-schema/item.json";
pub const COLLECTION_SCHEMA_URI: &str =
    "https://schemas.stacspec.org/v1.1.0/collection-spec/json-schema/collection.json";

const STAC_COMMON: &str = "https://schemas.stacspec.org/v1.1.0/item-spec/json-schema";

static BUNDLED: &[(&str, &str)] = &[
    (ITEM_SCHEMA_URI, include_str!("../../schemas/stac/item.json")),
    (COLLECTION_SCHEMA_URI, include_str!("../../schemas/stac/collection.json")),
    ("basics.json", include_str!("../../schemas/stac/basics.json")),
    ("datetime.json", include_str!("../../schemas/stac/datetime.json")),
    ("instrument.json", include_str!("../../schemas/stac/instrument.json")),
    ("licensing.json", include_str!("../../schemas/stac/licensing.json")),
    ("provider.json", include_str!("../../schemas/stac/provider.json")),
    (
        "https://geojson.org/schema/Feature.json",
        include_str!("../../schemas/geojson/Feature.json"),
    ),
    (
        "https://geojson.org/schema/Geometry.json",
        include_str!("../../schemas/geojson/Geometry.json"),
    ),
    (POINTCLOUD_SCHEMA_URI, include_str!("../../schemas/extensions/pointcloud.json")),
    (PROJECTION_SCHEMA_URI, include_str!("../../schemas/extensions/projection.json")),
    (SCIENTIFIC_SCHEMA_URI, include_str!("../../schemas/extensions/scientific.json")),
    (ITEM_ASSETS_SCHEMA_URI, include_str!("../../schemas/extensions/item-assets.json")),
];

/// Bundled schema text for `uri`, ignoring any fragment.
fn bundled(uri: &str) -> Option<&'static str> {
    let uri = uri.split_once('#').map_or(uri, |(base, _)| base);
    let short = uri
        .strip_prefix(STAC_COMMON)
        .and_then(|rest| rest.strip_prefix('/'));
    BUNDLED
        .iter()
        .find(|(id, _)| *id == uri || Some(*id) == short)
        .map(|(_, text)| *text)
}

/// Resolves `$ref`s from the bundle instead of the network.
struct BundledSchemas;

impl Retrieve for BundledSchemas {
    fn retrieve(
        &self,
        uri: &Uri<String>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let text = bundled(uri.as_str())
            .ok_or_else(|| format!("schema {} is not bundled", uri.as_str()))?;
        Ok(serde_json::from_str(text)?)
    }
}

fn compile(uri: &str, text: &str) -> Result<Validator, StacError> {
    let schema: Value = serde_json::from_str(text)?;
    jsonschema::options()
        .with_draft(Draft::Draft7)
        .with_retriever(BundledSchemas)
        .build(&schema)
        .map_err(|err| StacError::Schema {
            uri: uri.to_string(),
            message: err.to_string(),
        })
}

/// Extension schemas branch on `oneOf`, whose failures are reported at the
/// document root, so every line names the schema that rejected it.
fn describe(uri: &str, error: &ValidationError) -> String {
    let at = error.instance_path.to_string();
    let at = if at.is_empty() { "/" } else { at.as_str() };
    format!("{at}: {} ({uri})", error.masked())
}

/// Validates `document` against `core_uri` and then against every schema
/// listed in its `stac_extensions`, returning one line per violation.
pub fn schema_issues(core_uri: &str, document: &Value) -> Result<Vec<String>, StacError> {
    let mut uris = vec![core_uri];
    if let Some(declared) = document.get("stac_extensions").and_then(Value::as_array) {
        uris.extend(declared.iter().filter_map(Value::as_str));
    }

    let mut issues = Vec::new();
    for uri in uris {
        let Some(text) = bundled(uri) else {
            issues.push(format!("no bundled schema for {uri}"));
            continue;
        };
        let validator = compile(uri, text)?;
        let before = issues.len();
        issues.extend(validator.iter_errors(document).map(|error| describe(uri, &error)));
        if issues.len() > before {
            log::debug!("{} violation(s) of {uri}", issues.len() - before);
        }
    }
    Ok(issues)
}
