use super::{AssetTemplate, DatasetFamily};
use crate::model::MEDIA_TYPE_COPC;

const COPC_ASSET: AssetTemplate = AssetTemplate {
    title: "COPC LAZ file",
    description:
        "Cloud Optimized Point Cloud (COPC) converted GEDI CalVal Airborne Lidar LAS data.",
    media_type: MEDIA_TYPE_COPC,
    roles: &["data"],
};

pub const GEDI_CALVAL: DatasetFamily = DatasetFamily {
    name: "gedi-calval",
    id: "GEDI_CalVal_Lidar_COPC",
    title: "GEDI CalVal Lidar COPC",
    description: "Airborne lidar point clouds collected for calibration and validation of the \
                  Global Ecosystem Dynamics Investigation (GEDI), converted to Cloud Optimized \
                  Point Cloud (COPC) format.",
    keywords: &[
        "GEDI",
        "CalVal",
        "Lidar",
        "COPC",
        "Point Cloud",
        "Airborne lidar scanning",
        "NEON",
    ],
    license: "other",
    providers: &[],
    links: &[],
    citation: None,
    spatial_extent: &[[-180.0, -90.0, 180.0, 90.0]],
    item_window: ["2019-09-13T14:00:00Z", "2019-09-13T23:59:59Z"],
    primary_asset: COPC_ASSET,
    sidecars: &[],
};
