use std::{
    ffi::{CStr, CString},
    os::raw::c_char,
    path::Path,
    ptr,
};

use proj_sys as proj;

#[derive(Debug)]
pub struct ProjError {
    pub code: i32,
    pub message: String,
    pub context: &'static str,
}

impl ProjError {
    fn new(message: &str, context: &'static str) -> Self {
        Self {
            code: 0,
            message: message.to_string(),
            context,
        }
    }
}

impl std::fmt::Display for ProjError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PROJ error ({}): {} {}",
            self.context, self.code, self.message
        )
    }
}

impl std::error::Error for ProjError {}

/// Owned PROJ context. A context must be used by only one thread at a time.
#[derive(Debug)]
pub struct ProjContext {
    ctx: *mut proj::PJ_CONTEXT,
}

impl ProjContext {
    pub fn new(proj_data_dir: Option<&Path>) -> Result<Self, ProjError> {
        let ctx = unsafe { proj::proj_context_create() };
        if ctx.is_null() {
            return Err(ProjError::new(
                "proj_context_create() returned NULL",
                "proj_context_create",
            ));
        }
        let context = Self { ctx };

        // Grid files are fetched from the CDN and cached locally.
        unsafe {
            proj::proj_context_set_enable_network(context.ctx, 1);
            proj::proj_grid_cache_set_enable(context.ctx, 1);
        }

        if let Some(dir) = proj_data_dir {
            let c_path = CString::new(dir.to_string_lossy().as_bytes()).map_err(|_| {
                ProjError::new(
                    "proj_data_dir contains NUL byte",
                    "proj_context_set_search_paths",
                )
            })?;
            let paths = [c_path.as_ptr()];
            unsafe {
                proj::proj_context_set_search_paths(
                    context.ctx,
                    paths.len() as i32,
                    paths.as_ptr(),
                );
            }
        }

        Ok(context)
    }

    /// Renders any CRS definition PROJ understands (WKT, PROJJSON, `EPSG:n`,
    /// proj strings) as WKT2-2019.
    pub fn to_wkt2_2019(&self, definition: &str) -> Result<String, ProjError> {
        let definition = CString::new(definition)
            .map_err(|_| ProjError::new("CRS definition contains NUL byte", "proj_create"))?;

        let pj = unsafe { proj::proj_create(self.ctx, definition.as_ptr()) };
        if pj.is_null() {
            return Err(self.last_error("proj_create"));
        }

        let wkt = unsafe {
            proj::proj_as_wkt(
                self.ctx,
                pj,
                proj::PJ_WKT_TYPE_PJ_WKT2_2019,
                ptr::null(),
            )
        };
        let result = if wkt.is_null() {
            Err(self.last_error("proj_as_wkt"))
        } else {
            Ok(unsafe { CStr::from_ptr(wkt as *const c_char) }
                .to_string_lossy()
                .into_owned())
        };

        unsafe {
            proj::proj_destroy(pj);
        }
        result
    }

    fn last_error(&self, context: &'static str) -> ProjError {
        let code = unsafe { proj::proj_context_errno(self.ctx) } as i32;
        ProjError {
            code,
            message: proj_error_message(self.ctx, code),
            context,
        }
    }
}

impl Drop for ProjContext {
    fn drop(&mut self) {
        unsafe {
            if !self.ctx.is_null() {
                proj::proj_context_destroy(self.ctx);
                self.ctx = ptr::null_mut();
            }
        }
    }
}

#[derive(Debug)]
pub struct ProjTransformer {
    pj: *mut proj::PJ,
    // dropped after `pj`
    context: ProjContext,
}

impl ProjTransformer {
    pub fn new(
        source: &str,
        target: &str,
        proj_data_dir: Option<&Path>,
    ) -> Result<Self, ProjError> {
        let context = ProjContext::new(proj_data_dir)?;

        let source = CString::new(source)
            .map_err(|_| ProjError::new("source CRS contains NUL byte", "proj_create_crs_to_crs"))?;
        let target = CString::new(target)
            .map_err(|_| ProjError::new("target CRS contains NUL byte", "proj_create_crs_to_crs"))?;

        let pj = unsafe {
            proj::proj_create_crs_to_crs(
                context.ctx,
                source.as_ptr(),
                target.as_ptr(),
                ptr::null_mut(),
            )
        };
        if pj.is_null() {
            return Err(context.last_error("proj_create_crs_to_crs"));
        }

        // Normalize axis order so geographic output is lon, lat.
        let normalized = unsafe { proj::proj_normalize_for_visualization(context.ctx, pj) };
        unsafe {
            proj::proj_destroy(pj);
        }
        if normalized.is_null() {
            return Err(context.last_error("proj_normalize_for_visualization"));
        }

        Ok(Self {
            pj: normalized,
            context,
        })
    }

    /// Transforms parallel coordinate arrays in place.
    pub fn transform_xy_in_place(&mut self, xs: &mut [f64], ys: &mut [f64]) -> Result<(), ProjError> {
        if xs.len() != ys.len() {
            return Err(ProjError::new(
                "coordinate arrays differ in length",
                "proj_trans_generic",
            ));
        }
        if xs.is_empty() {
            return Ok(());
        }

        let stride = std::mem::size_of::<f64>();
        let n = xs.len();

        unsafe {
            proj::proj_errno_reset(self.pj);

            proj::proj_trans_generic(
                self.pj,
                proj::PJ_DIRECTION_PJ_FWD,
                xs.as_mut_ptr(),
                stride,
                n,
                ys.as_mut_ptr(),
                stride,
                n,
                ptr::null_mut(),
                0,
                0,
                ptr::null_mut(),
                0,
                0,
            );

            let code = proj::proj_errno(self.pj);
            if code != 0 {
                return Err(ProjError {
                    code,
                    message: proj_error_message(self.context.ctx, code),
                    context: "proj_trans_generic",
                });
            }
        }

        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(ProjError::new(
                "transformation produced non-finite coordinates",
                "proj_trans_generic",
            ));
        }

        Ok(())
    }
}

impl Drop for ProjTransformer {
    fn drop(&mut self) {
        unsafe {
            if !self.pj.is_null() {
                proj::proj_destroy(self.pj);
                self.pj = ptr::null_mut();
            }
        }
    }
}

fn proj_error_message(ctx: *mut proj::PJ_CONTEXT, code: i32) -> String {
    let c_msg = unsafe { proj::proj_context_errno_string(ctx, code) };
    if c_msg.is_null() {
        return "unknown error".to_string();
    }
    unsafe { CStr::from_ptr(c_msg as *const c_char) }
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// WGS 84 / UTM zone 12N as PDAL reports it for LAS 1.2 files.
    const UTM_12N_WKT1: &str = "PROJCS[\"WGS 84 / UTM zone 12N\",GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563,AUTHORITY[\"EPSG\",\"7030\"]],AUTHORITY[\"EPSG\",\"6326\"]],PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],AUTHORITY[\"EPSG\",\"4326\"]],\
        PROJECTION[\"Transverse_Mercator\"],PARAMETER[\"latitude_of_origin\",0],PARAMETER[\"central_meridian\",-111],PARAMETER[\"scale_factor\",0.9996],PARAMETER[\"false_easting\",500000],PARAMETER[\"false_northing\",0],UNIT[\"metre\",1,AUTHORITY[\"EPSG\",\"9001\"]],AXIS[\"Easting\",EAST],AXIS[\"Northing\",NORTH],AUTHORITY[\"EPSG\",\"32612\"]]";

    #[test]
    fn web_mercator_origin_is_null_island() {
        let mut t = ProjTransformer::new("EPSG:3857", "EPSG:4326", None).unwrap();
        let mut xs = [0.0];
        let mut ys = [0.0];
        t.transform_xy_in_place(&mut xs, &mut ys).unwrap();
        assert!(xs[0].abs() < 1e-9);
        assert!(ys[0].abs() < 1e-9);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut t = ProjTransformer::new("EPSG:3857", "EPSG:4326", None).unwrap();
        let err = t
            .transform_xy_in_place(&mut [0.0, 1.0], &mut [0.0])
            .unwrap_err();
        assert_eq!(err.context, "proj_trans_generic");
    }

    #[test]
    fn epsg_code_renders_as_wkt2() {
        let ctx = ProjContext::new(None).unwrap();
        let wkt = ctx.to_wkt2_2019("EPSG:4326").unwrap();
        assert!(wkt.starts_with("GEOGCRS[\"WGS 84\""));
    }

    #[test]
    fn garbage_definition_is_an_error() {
        let ctx = ProjContext::new(None).unwrap();
        let err = ctx.to_wkt2_2019("not a crs").unwrap_err();
        assert_eq!(err.context, "proj_create");
    }

    #[test]
    fn wkt1_definition_renders_as_wkt2() {
        let ctx = ProjContext::new(None).unwrap();
        let wkt = ctx.to_wkt2_2019(UTM_12N_WKT1).unwrap();
        assert!(wkt.starts_with("PROJCRS[\"WGS 84 / UTM zone 12N\""), "{wkt}");
        assert!(wkt.contains("32612"));
    }

    #[test]
    fn wkt1_utm_corner_lands_in_arizona() {
        let mut t = ProjTransformer::new(UTM_12N_WKT1, "EPSG:4326", None).unwrap();
        let mut xs = [502000.0];
        let mut ys = [3520000.0];
        t.transform_xy_in_place(&mut xs, &mut ys).unwrap();
        assert!((xs[0] + 110.979).abs() < 0.01, "lon {}", xs[0]);
        assert!((ys[0] - 31.816).abs() < 0.01, "lat {}", ys[0]);
    }
}
