use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// One stage's metadata as reported by the point cloud engine.
///
/// The engine output is loosely typed and fields come and go between engine
/// versions and input files. Every read goes through [`MetadataBlock::lookup`]
/// so that a missing key is always an `Option::None` and never a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataBlock(Value);

impl Default for MetadataBlock {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for MetadataBlock {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl MetadataBlock {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// Follows `path` through nested objects.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.0, |value, key| value.as_object()?.get(*key))
    }

    /// Looks up `path` and deserializes it, `None` if absent or of the wrong shape.
    pub fn lookup_as<T: DeserializeOwned>(&self, path: &[&str]) -> Option<T> {
        self.lookup(path).and_then(|v| T::deserialize(v).ok())
    }

    /// Looks up `path` and deserializes it, falling back to `default`.
    pub fn lookup_or<T: DeserializeOwned>(&self, path: &[&str], default: T) -> T {
        self.lookup_as(path).unwrap_or(default)
    }

    /// Reads a float that the engine may have written as a number or a string.
    pub fn lookup_f64(&self, path: &[&str]) -> Option<f64> {
        self.lookup(path).and_then(lenient_f64)
    }

    /// Reads a non-empty string.
    pub fn lookup_str(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The four metadata blocks captured from one engine run over one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetadataBundle {
    /// hexbin boundary (`filters.hexbin`)
    pub boundary: MetadataBlock,
    /// per-dimension statistics and bounding boxes (`filters.stats`)
    pub stats: MetadataBlock,
    /// schema and spatial reference (`filters.info`)
    pub info: MetadataBlock,
    /// reader metadata (`readers.copc`)
    pub format_info: MetadataBlock,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block() -> MetadataBlock {
        MetadataBlock::new(json!({
            "bbox": {
                "EPSG:4326": {
                    "bbox": { "minx": "-110.5", "maxx": -110.4 }
                }
            },
            "avg_pt_per_sq_unit": 12.5,
            "srs": { "horizontal": "   " }
        }))
    }

    #[test]
    fn lookup_nested() {
        let b = block();
        assert_eq!(
            b.lookup(&["bbox", "EPSG:4326", "bbox", "maxx"]),
            Some(&json!(-110.4))
        );
        assert_eq!(b.lookup(&["bbox", "native", "bbox"]), None);
        assert_eq!(b.lookup(&["avg_pt_per_sq_unit", "deeper"]), None);
    }

    #[test]
    fn lookup_or_defaults_on_missing_and_on_wrong_shape() {
        let b = block();
        assert_eq!(b.lookup_or(&["avg_pt_per_sq_unit"], 0.0), 12.5);
        assert_eq!(b.lookup_or(&["missing"], 0.0), 0.0);
        assert_eq!(b.lookup_or(&["srs"], 7_u64), 7);
    }

    #[test]
    fn lookup_f64_accepts_numeric_strings() {
        let b = block();
        assert_eq!(b.lookup_f64(&["bbox", "EPSG:4326", "bbox", "minx"]), Some(-110.5));
        assert_eq!(b.lookup_f64(&["srs", "horizontal"]), None);
    }

    #[test]
    fn blank_strings_are_absent() {
        assert_eq!(block().lookup_str(&["srs", "horizontal"]), None);
    }

    #[test]
    fn default_block_is_empty() {
        assert!(MetadataBlock::default().is_empty());
        assert!(!block().is_empty());
    }
}
