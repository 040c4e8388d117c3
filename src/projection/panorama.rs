//! The cylindrical panorama projector. Every point is mapped to angular coordinates on a
//! cylinder whose axis is the sensor's vertical axis, the angles are quantized by the angular
//! resolutions, and the clipped, rescaled ground-plane range is scattered into a dense `u8`
//! raster. Azimuth wraps the full 360 degree sweep, so the raster is the unrolled surface of
//! the cylinder with row 0 at the highest elevation.
//!
//! The radial coordinate is the horizontal component `sqrt(x^2 + y^2)` only. Using the full 3D
//! distance would project points onto a spherical cap instead of a cylinder.

use crate::Result;
use crate::errors::ProjectionError;
use crate::projection::{OutOfFramePolicy, PanoramaParams};
use crate::raster2::IntensityRaster;
use crate::scan::LidarScan;
use rayon::prelude::*;

/// The product of the panorama projection: the dense raster, plus the number of points that
/// were discarded under [`OutOfFramePolicy::Drop`]. Under the fail policy `dropped` is always
/// zero.
#[derive(Debug, Clone)]
pub struct Panorama {
    pub raster: IntensityRaster,
    pub dropped: usize,
}

/// Project a scan onto a cylindrical panorama raster.
///
/// Pixel intensity encodes the point's ground-plane range, clipped into `d_range` and rescaled
/// linearly onto [0, 255] with a truncating cast. When several points land in the same cell the
/// one latest in the input sequence wins; callers needing a different collision policy must
/// pre-filter the scan. Points whose cell falls outside the allocated raster are handled
/// according to `params.policy`.
///
/// # Arguments
///
/// * `scan`: the points to project, in collision-resolution order
/// * `params`: resolutions, vertical FOV, distance clipping range, fudge factor, and
///   out-of-frame policy
///
/// returns: Result<Panorama, Box<dyn Error, Global>>
///
/// # Examples
///
/// ```
/// use scanview::{LidarScan, OutOfFramePolicy, PanoramaParams, ScanPoint, VerticalFov};
/// use scanview::project_panorama;
///
/// let scan = LidarScan::new(vec![ScanPoint::new(10.0, 0.0, 0.0, 0.3)]);
/// let params = PanoramaParams {
///     v_res: 0.4,
///     h_res: 0.35,
///     v_fov: VerticalFov { min_deg: -24.0, max_deg: 9.0 },
///     d_range: (0.0, 100.0),
///     y_fudge: 0.0,
///     policy: OutOfFramePolicy::Fail,
/// };
/// let pano = project_panorama(&scan, &params).unwrap();
/// assert_eq!(pano.raster.get(514, 22), 25);
/// ```
pub fn project_panorama(scan: &LidarScan, params: &PanoramaParams) -> Result<Panorama> {
    params.validate()?;

    let h_res_rad = params.h_res.to_radians();
    let v_res_rad = params.v_res.to_radians();

    // The theoretical vertical pixel span of the FOV. The viewing plane distance re-expresses
    // the angular resolution as a flat projection distance, so the tangent of each FOV bound
    // scaled by it gives the pixel count below/above the horizon.
    let fov_total = params.v_fov.total();
    let d_plane = (fov_total / params.v_res) / fov_total.to_radians();
    let below = d_plane * (-params.v_fov.min_deg).to_radians().tan();
    let above = d_plane * params.v_fov.max_deg.to_radians().tan();

    let y_span = (below + above + params.y_fudge).ceil();
    let x_span = (360.0 / params.h_res).ceil();

    let width = x_span as u32 + 1;
    let height = y_span as u32 + 1;

    // Shifts that land the minimum theoretical coordinate on pixel zero: half the azimuth
    // sweep horizontally, the top of the FOV (plus fudge) vertically.
    let x_shift = 180.0 / params.h_res;
    let y_shift = params.v_fov.max_deg / params.v_res + params.y_fudge;

    let (d_min, d_max) = params.d_range;

    // Per-point cells and intensities, each derived from that point alone. The ordered collect
    // keeps the scatter pass below sequential in input order, which the last-write-wins
    // collision policy depends on.
    let cells: Vec<(i64, i64, u8)> = scan
        .points()
        .par_iter()
        .map(|p| {
            let d = p.ground_range();
            let az = p.position.y.atan2(p.position.x);
            let el = p.position.z.atan2(d);

            let x_img = (az / h_res_rad + x_shift).trunc() as i64;
            let y_img = (-el / v_res_rad + y_shift).trunc() as i64;

            let clipped = d.clamp(d_min, d_max);
            let value = ((clipped - d_min) / (d_max - d_min) * 255.0) as u8;

            (x_img, y_img, value)
        })
        .collect();

    let mut raster = IntensityRaster::empty(width, height);
    let mut dropped = 0;

    for (i, (x, y, value)) in cells.iter().enumerate() {
        if !raster.contains(*x, *y) {
            match params.policy {
                OutOfFramePolicy::Fail => {
                    return Err(ProjectionError::OutOfFrame {
                        index: i,
                        x: *x,
                        y: *y,
                    }
                    .into());
                }
                OutOfFramePolicy::Drop => {
                    dropped += 1;
                    continue;
                }
            }
        }

        raster.put(*x as u32, *y as u32, *value);
    }

    Ok(Panorama { raster, dropped })
}
