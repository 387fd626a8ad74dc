mod common;

use common::{srer_bundle, srer_bundle_without_srs, FailingEngine, FixtureEngine, OriginCrs, SRER};
use pcd_stac::{
    extensions::{POINTCLOUD_SCHEMA_URI, PROJECTION_SCHEMA_URI},
    family::{GEDI_CALVAL, PANAMA},
    save_item, schema_issues, validate::ITEM_SCHEMA_URI, validate_item, ItemBuilder, StacError,
};
use serde_json::{json, Value};

fn to_json(item: &pcd_stac::Item) -> Value {
    serde_json::to_value(item).unwrap()
}

#[test]
fn gedi_item_from_fixture() {
    let engine = FixtureEngine::default();
    let source = format!("tests/data/{SRER}.copc.laz");
    let dir = tempfile::tempdir().unwrap();

    let item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build(&source, dir.path())
        .unwrap();

    assert_eq!(item.id, SRER);
    assert_eq!(engine.extracted.borrow().as_slice(), &[source.clone()]);
    assert!(engine.converted.borrow().is_empty());
    validate_item(&item).unwrap();

    let value = to_json(&item);
    assert_eq!(value["type"], "Feature");
    assert_eq!(value["stac_version"], "1.1.0");
    assert_eq!(
        value["stac_extensions"],
        json!([POINTCLOUD_SCHEMA_URI, PROJECTION_SCHEMA_URI])
    );
    assert_eq!(value["properties"]["datetime"], Value::Null);
    assert_eq!(value["properties"]["start_datetime"], "2019-09-13T14:00:00Z");
    assert_eq!(value["properties"]["end_datetime"], "2019-09-13T23:59:59Z");

    let assets = value["assets"].as_object().unwrap();
    assert_eq!(assets.keys().collect::<Vec<_>>(), vec!["copc.laz"]);
    assert_eq!(assets["copc.laz"]["href"], source.as_str());
    assert_eq!(assets["copc.laz"]["type"], "application/vnd.laszip+copc");
    assert_eq!(assets["copc.laz"]["roles"], json!(["data"]));
    assert_eq!(
        assets["copc.laz"]["description"],
        "Cloud Optimized Point Cloud (COPC) converted GEDI CalVal Airborne Lidar LAS data."
    );
}

#[test]
fn bbox_and_fallback_geometry_come_from_stats() {
    let bundle = srer_bundle_without_srs();
    let engine = FixtureEngine::default();
    let item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build_from_metadata("tile.copc.laz", &bundle)
        .unwrap();

    assert_eq!(
        item.bbox,
        Some(vec![-110.9784, 31.811, 951.02, -110.9678, 31.82, 1023.45])
    );
    // the reader reports no spatial reference, so nothing is reprojected
    assert_eq!(
        serde_json::to_value(item.geometry.as_ref().unwrap()).unwrap(),
        bundle.stats.lookup(&["bbox", "EPSG:4326", "boundary"]).cloned().unwrap()
    );
}

#[test]
fn hexbin_boundary_is_reprojected_when_srs_is_known() {
    let bundle = srer_bundle();
    let engine = FixtureEngine::default();

    let item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build_from_metadata("tile.copc.laz", &bundle)
        .unwrap();

    let geometry = serde_json::to_value(item.geometry.as_ref().unwrap()).unwrap();
    assert_eq!(geometry["type"], "MultiPolygon");
    assert_eq!(geometry["coordinates"][0][0][0], json!([0.0, 0.0]));
    assert_eq!(item.bbox.as_ref().map(Vec::len), Some(6));
}

#[test]
fn pointcloud_and_projection_properties() {
    let engine = FixtureEngine::default();
    let item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build_from_metadata("tile.copc.laz", &srer_bundle())
        .unwrap();
    let properties = &to_json(&item)["properties"];

    assert_eq!(properties["pc:count"], 18615935);
    assert_eq!(properties["pc:type"], "lidar");
    assert_eq!(properties["pc:encoding"], "LASzip");
    assert_eq!(properties["pc:density"], 18.77402);
    assert_eq!(properties["pc:schemas"].as_array().unwrap().len(), 8);
    assert_eq!(
        properties["pc:schemas"][3],
        json!({ "name": "Intensity", "size": 2, "type": "unsigned" })
    );

    let statistics = properties["pc:statistics"].as_array().unwrap();
    assert_eq!(statistics.len(), 3);
    assert_eq!(statistics[0]["position"], 0);
    assert_eq!(statistics[0]["average"], 502500.12);
    assert!(statistics[2].get("average").is_none());
    assert!(statistics[2].get("stddev").is_none());

    assert_eq!(
        properties["proj:bbox"],
        json!([502000.0, 3520000.0, 951.02, 503000.0, 3521000.0, 1023.45])
    );
    assert_eq!(properties["proj:projjson"]["name"], "WGS 84 / UTM zone 12N");
    assert_eq!(properties["proj:geometry"]["type"], "MultiPolygon");
    let wkt2 = properties["proj:wkt2"].as_str().unwrap();
    assert!(wkt2.starts_with("PROJCRS[\"PROJCS[\"WGS 84 / UTM zone 12N\""), "{wkt2}");
}

#[test]
fn horizontal_srs_becomes_wkt2() {
    let mut bundle = srer_bundle();
    bundle.info = json!({ "srs": { "horizontal": "EPSG:32612" } }).into();
    let engine = FixtureEngine::default();

    let item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build_from_metadata("tile.copc.laz", &bundle)
        .unwrap();

    let properties = &to_json(&item)["properties"];
    assert_eq!(properties["proj:wkt2"], "PROJCRS[\"EPSG:32612\"]");
    assert_eq!(properties["pc:schemas"], json!([]));
}

#[test]
fn missing_native_bbox_is_omitted() {
    let mut bundle = srer_bundle();
    bundle.stats = json!({
        "bbox": { "EPSG:4326": bundle.stats.lookup(&["bbox", "EPSG:4326"]).cloned().unwrap() }
    })
    .into();
    let engine = FixtureEngine::default();

    let item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build_from_metadata("tile.copc.laz", &bundle)
        .unwrap();

    let properties = &to_json(&item)["properties"];
    assert!(properties.get("proj:bbox").is_none());
    assert!(properties.get("pc:statistics").is_none());
    validate_item(&item).unwrap();
}

#[test]
fn panama_item_has_sidecars() {
    let engine = FixtureEngine::default();
    let source = "s3://bucket/ALS_Panama/BCI_001.copc.laz";
    let item = ItemBuilder::new(&PANAMA, &engine, &OriginCrs)
        .build_from_metadata(source, &srer_bundle())
        .unwrap();

    assert_eq!(item.id, "BCI_001");
    assert_eq!(
        item.assets.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["PO.txt", "copc.laz", "stat.log"]
    );
    assert_eq!(item.assets["PO.txt"].href, "s3://bucket/ALS_Panama/BCI_001_PO.txt");
    assert_eq!(item.assets["stat.log"].href, "s3://bucket/ALS_Panama/BCI_001_stat.log");
    assert_eq!(item.assets["stat.log"].description, None);
    assert_eq!(
        item.assets["copc.laz"].description.as_deref(),
        Some("Cloud Optimized Point Cloud (COPC)")
    );

    let value = to_json(&item);
    assert_eq!(value["properties"]["start_datetime"], "2023-05-26T00:00:00Z");
    assert_eq!(value["properties"]["end_datetime"], "2023-05-27T23:59:59Z");
}

#[test]
fn copc_conversion_lands_in_destination() {
    let engine = FixtureEngine::default();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("copc");

    let item = ItemBuilder::new(&PANAMA, &engine, &OriginCrs)
        .convert_to_copc(true)
        .build("/survey/BCI_001.las", &output)
        .unwrap();

    let expected = output.join("BCI_001.copc.laz");
    assert!(expected.exists());
    assert_eq!(
        engine.converted.borrow().as_slice(),
        &[(
            "/survey/BCI_001.las".to_string(),
            expected.to_string_lossy().into_owned()
        )]
    );
    assert_eq!(item.id, "BCI_001");
    assert_eq!(item.assets["copc.laz"].href, expected.to_string_lossy());
}

#[test]
fn engine_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let err = ItemBuilder::new(&GEDI_CALVAL, &FailingEngine, &OriginCrs)
        .build("missing.copc.laz", dir.path())
        .unwrap_err();
    assert!(matches!(err, StacError::Pipeline(_)));
    assert!(err.to_string().contains("Unable to open stream"));

    let err = ItemBuilder::new(&GEDI_CALVAL, &FailingEngine, &OriginCrs)
        .convert_to_copc(true)
        .build("broken.las", dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("Invalid file signature"));
}

#[test]
fn saved_item_is_named_after_its_id() {
    let engine = FixtureEngine::default();
    let dir = tempfile::tempdir().unwrap();
    let mut item = ItemBuilder::new(&PANAMA, &engine, &OriginCrs)
        .build("/survey/BCI_001.copc.laz", dir.path())
        .unwrap();

    let path = save_item(&mut item, dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap(), "BCI_001.json");
    let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["links"][0]["rel"], "self");
    assert_eq!(value["links"][0]["href"], &*path.to_string_lossy());
}

#[test]
fn saved_srer_item_passes_stac_schemas() {
    let engine = FixtureEngine::default();
    let dir = tempfile::tempdir().unwrap();
    let mut item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build(&format!("/data/{SRER}.copc.laz"), dir.path())
        .unwrap();

    let path = save_item(&mut item, dir.path()).unwrap();

    let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(schema_issues(ITEM_SCHEMA_URI, &value).unwrap(), Vec::<String>::new());
    assert!(value["properties"]["proj:wkt2"].is_string());
    assert!(value["properties"]["proj:bbox"].is_array());
}

#[test]
fn null_projection_bbox_fails_validation() {
    let engine = FixtureEngine::default();
    let item = ItemBuilder::new(&GEDI_CALVAL, &engine, &OriginCrs)
        .build_from_metadata("tile.copc.laz", &srer_bundle())
        .unwrap();
    let mut value = to_json(&item);
    value["properties"]["proj:bbox"] = Value::Null;

    let issues = schema_issues(ITEM_SCHEMA_URI, &value).unwrap();
    assert_eq!(issues.len(), 1, "{issues:?}");
    assert!(issues[0].contains(PROJECTION_SCHEMA_URI));
}
