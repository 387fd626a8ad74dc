use std::path::{Path, PathBuf};

use geojson::{Geometry, Position, Value};
use proj_sys_transformer::{ProjContext, ProjTransformer};

use crate::error::ProjectionError;

/// WGS84 geographic 2D, the CRS of STAC `geometry` and `bbox`.
pub const EPSG_WGS84_GEOGRAPHIC_2D: &str = "EPSG:4326";

/// Coordinate reference system operations used when assembling metadata.
pub trait CrsTransform {
    /// Reprojects every position of `geometry` from `source_crs` to EPSG:4326
    /// (lon, lat order). Z ordinates are carried through unchanged.
    fn reproject_geometry(
        &self,
        geometry: &Geometry,
        source_crs: &str,
    ) -> Result<Geometry, ProjectionError>;

    /// Renders a CRS definition as WKT2-2019.
    fn to_wkt2(&self, crs: &str) -> Result<String, ProjectionError>;
}

/// [`CrsTransform`] backed by PROJ.
#[derive(Debug, Clone, Default)]
pub struct ProjCrsTransform {
    proj_data_dir: Option<PathBuf>,
}

impl ProjCrsTransform {
    pub fn new(proj_data_dir: Option<&Path>) -> Self {
        Self {
            proj_data_dir: proj_data_dir.map(Path::to_path_buf),
        }
    }
}

impl CrsTransform for ProjCrsTransform {
    fn reproject_geometry(
        &self,
        geometry: &Geometry,
        source_crs: &str,
    ) -> Result<Geometry, ProjectionError> {
        let mut reprojected = Geometry::new(geometry.value.clone());
        if source_crs == EPSG_WGS84_GEOGRAPHIC_2D {
            return Ok(reprojected);
        }

        let mut positions = Vec::new();
        collect_positions(&mut reprojected.value, &mut positions);

        let mut xs = Vec::with_capacity(positions.len());
        let mut ys = Vec::with_capacity(positions.len());
        for (index, position) in positions.iter().enumerate() {
            match position.as_slice() {
                [x, y, ..] => {
                    xs.push(*x);
                    ys.push(*y);
                }
                short => {
                    return Err(ProjectionError::ShortPosition {
                        index,
                        len: short.len(),
                    })
                }
            }
        }

        let mut transformer = ProjTransformer::new(
            source_crs,
            EPSG_WGS84_GEOGRAPHIC_2D,
            self.proj_data_dir.as_deref(),
        )?;
        transformer.transform_xy_in_place(&mut xs, &mut ys)?;
        log::debug!("reprojected {} positions to {}", xs.len(), EPSG_WGS84_GEOGRAPHIC_2D);

        for ((position, x), y) in positions.into_iter().zip(xs).zip(ys) {
            position[0] = x;
            position[1] = y;
        }

        Ok(reprojected)
    }

    fn to_wkt2(&self, crs: &str) -> Result<String, ProjectionError> {
        let context = ProjContext::new(self.proj_data_dir.as_deref())?;
        Ok(context.to_wkt2_2019(crs)?)
    }
}

fn collect_positions<'a>(value: &'a mut Value, out: &mut Vec<&'a mut Position>) {
    match value {
        Value::Point(position) => out.push(position),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            out.extend(positions.iter_mut())
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            out.extend(lines.iter_mut().flatten())
        }
        Value::MultiPolygon(polygons) => out.extend(polygons.iter_mut().flatten().flatten()),
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_positions(&mut geometry.value, out);
            }
        }
    }
}
