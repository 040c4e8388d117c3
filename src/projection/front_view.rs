//! The planar front view projector. Points map to the same angular pixel scheme as the
//! panorama, but the output is a sparse list of un-rounded (x, y, value) triples meant for
//! scatter-style rendering, not a dense raster. The view is mirrored horizontally relative to
//! the panorama (azimuth uses a flipped y) and its elevation axis is not negated; the two sign
//! conventions encode different viewing orientations and are kept as independent code paths.
//!
//! The range used for the depth encoding is the ground-plane distance `sqrt(x^2 + y^2)`, with
//! z excluded. This reproduces the behavior of the sensor reference output this projector is
//! matched against.

use crate::Result;
use crate::projection::{FrontViewParams, PixelValue, ValueSelector};
use crate::raster2::IntensityRaster;
use crate::scan::{LidarScan, ScanGrid, ScanPoint};
use itertools::Itertools;
use itertools::MinMaxResult::{MinMax, NoElements, OneElement};
use rayon::prelude::*;

/// Project a flat scan into front view pixel space, one triple per point, in input order.
///
/// # Arguments
///
/// * `scan`: the points to project
/// * `params`: resolutions, vertical FOV, value selector, and fudge factor
///
/// returns: Result<Vec<PixelValue, Global>, Box<dyn Error, Global>>
///
/// # Examples
///
/// ```
/// use scanview::{FrontViewParams, LidarScan, ScanPoint, ValueSelector, VerticalFov};
/// use scanview::project_front_view;
///
/// let scan = LidarScan::new(vec![ScanPoint::new(1.0, 2.0, 3.0, 0.5)]);
/// let params = FrontViewParams {
///     v_res: 0.4,
///     h_res: 0.35,
///     v_fov: VerticalFov { min_deg: -24.9, max_deg: 2.0 },
///     value_selector: ValueSelector::Reflectance,
///     y_fudge: 0.0,
/// };
/// let pixels = project_front_view(&scan, &params).unwrap();
/// assert_eq!(pixels[0].value, 0.5);
/// ```
pub fn project_front_view(scan: &LidarScan, params: &FrontViewParams) -> Result<Vec<PixelValue>> {
    params.validate()?;
    Ok(project_points(scan.points(), params))
}

/// Project a grid-shaped scan into front view pixel space. The per-element formulas are
/// identical to [`project_front_view`]; the grid is never flattened semantically, and the
/// output holds exactly `rows * cols` triples in row-major order so each one is attributable
/// to its originating (row, column).
pub fn project_front_view_grid(
    grid: &ScanGrid,
    params: &FrontViewParams,
) -> Result<Vec<PixelValue>> {
    params.validate()?;
    Ok(project_points(grid.points(), params))
}

fn project_points(points: &[ScanPoint], params: &FrontViewParams) -> Vec<PixelValue> {
    let h_res_rad = params.h_res.to_radians();
    let v_res_rad = params.v_res.to_radians();

    // Shifts that land the minimum theoretical coordinate on pixel zero
    let x_min = -180.0 / params.h_res;
    let y_min = params.v_fov.min_deg / params.v_res;

    points
        .par_iter()
        .map(|p| {
            let d = p.ground_range();

            let x = (-p.position.y).atan2(p.position.x) / h_res_rad - x_min;
            let y = p.position.z.atan2(d) / v_res_rad - y_min;

            let value = match params.value_selector {
                ValueSelector::Depth => -d,
                ValueSelector::Height => p.position.z,
                ValueSelector::Reflectance => p.reflectance,
            };

            PixelValue { x, y, value }
        })
        .collect()
}

/// Rasterize front view triples into a dense `u8` grid, a convenience for consumers without a
/// scatter plotter. Values are normalized over their full observed range, coordinates truncate
/// to integer cells, and later triples overwrite earlier ones. Triples whose cell falls outside
/// the extent declared by the parameters are ignored; the sparse triple list remains the
/// authoritative output of the projection.
///
/// # Arguments
///
/// * `pixels`: the projected triples to rasterize
/// * `params`: the parameters that produced them, used for the output extent
///
/// returns: Result<IntensityRaster, Box<dyn Error, Global>>
pub fn scatter_to_raster(pixels: &[PixelValue], params: &FrontViewParams) -> Result<IntensityRaster> {
    params.validate()?;

    let (x_extent, y_extent) = params.extent();
    let width = x_extent.ceil() as u32 + 1;
    let height = y_extent.ceil() as u32 + 1;

    let mut raster = IntensityRaster::empty(width, height);

    let (lo, hi) = match pixels.iter().map(|p| p.value).minmax() {
        NoElements => return Ok(raster),
        OneElement(v) => (v, v),
        MinMax(lo, hi) => (lo, hi),
    };
    let span = hi - lo;

    for p in pixels {
        let x = p.x.trunc() as i64;
        let y = p.y.trunc() as i64;
        if !raster.contains(x, y) {
            continue;
        }

        let f = if span > 0.0 { (p.value - lo) / span } else { 0.0 };
        raster.put(x as u32, y as u32, (f * 255.0) as u8);
    }

    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::VerticalFov;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn params(selector: ValueSelector) -> FrontViewParams {
        FrontViewParams {
            v_res: 0.4,
            h_res: 0.35,
            v_fov: VerticalFov {
                min_deg: -24.9,
                max_deg: 2.0,
            },
            value_selector: selector,
            y_fudge: 5.0,
        }
    }

    #[test_case(ValueSelector::Reflectance, 0.5)]
    #[test_case(ValueSelector::Height, 3.0)]
    #[test_case(ValueSelector::Depth, -2.2360679774997896; "depth is the negated ground range")]
    fn value_selection(selector: ValueSelector, expected: f64) {
        let scan = LidarScan::new(vec![ScanPoint::new(1.0, 2.0, 3.0, 0.5)]);
        let pixels = project_front_view(&scan, &params(selector)).unwrap();

        assert_eq!(pixels.len(), 1);
        assert_relative_eq!(pixels[0].value, expected, epsilon = 1.0e-12);
    }

    #[test]
    fn pixel_coordinates_follow_the_mirrored_convention() {
        let p = ScanPoint::new(1.0, 1.0, 0.5, 0.0);
        let scan = LidarScan::new(vec![p]);
        let fv = params(ValueSelector::Depth);
        let pixels = project_front_view(&scan, &fv).unwrap();

        // Azimuth flips y: atan2(-1, 1) = -45 degrees, shifted by half the sweep
        let expected_x = -45.0 / 0.35 + 180.0 / 0.35;
        // Elevation is unflipped: atan2(0.5, sqrt(2)) shifted by the FOV floor
        let expected_y = (0.5f64.atan2(2.0f64.sqrt())).to_degrees() / 0.4 + 24.9 / 0.4;

        assert_relative_eq!(pixels[0].x, expected_x, epsilon = 1.0e-9);
        assert_relative_eq!(pixels[0].y, expected_y, epsilon = 1.0e-9);
    }

    #[test]
    fn forward_point_sits_at_the_horizontal_center() {
        let scan = LidarScan::new(vec![ScanPoint::new(10.0, 0.0, 0.0, 0.0)]);
        let pixels = project_front_view(&scan, &params(ValueSelector::Depth)).unwrap();
        assert_relative_eq!(pixels[0].x, 180.0 / 0.35, epsilon = 1.0e-9);
    }

    #[test]
    fn positive_fov_floor_fails_fast() {
        let mut fv = params(ValueSelector::Depth);
        fv.v_fov = VerticalFov {
            min_deg: 1.0,
            max_deg: 5.0,
        };
        let scan = LidarScan::new(vec![ScanPoint::new(1.0, 0.0, 0.0, 0.0)]);
        assert!(project_front_view(&scan, &fv).is_err());
    }

    #[test]
    fn grid_projection_preserves_shape() {
        let mut points = Vec::new();
        for row in 0..64 {
            for col in 0..512 {
                let az = (col as f64 / 512.0 - 0.5) * std::f64::consts::PI;
                let z = -1.0 + row as f64 * 0.01;
                points.push(ScanPoint::new(
                    10.0 * az.cos(),
                    10.0 * az.sin(),
                    z,
                    0.5,
                ));
            }
        }
        let grid = ScanGrid::try_new(64, 512, points.clone()).unwrap();
        let fv = params(ValueSelector::Depth);

        let from_grid = project_front_view_grid(&grid, &fv).unwrap();
        assert_eq!(from_grid.len(), 64 * 512);

        // Each entry matches the flat projection of the same points in the same order, so a
        // triple at row-major index (row * 512 + col) is attributable to that grid cell
        let flat = project_front_view(&LidarScan::new(points), &fv).unwrap();
        assert_eq!(from_grid, flat);
    }

    #[test]
    fn scatter_normalizes_over_the_value_range() {
        let fv = params(ValueSelector::Depth);
        let scan = LidarScan::new(vec![
            ScanPoint::new(10.0, 0.0, 0.0, 0.0),
            ScanPoint::new(5.0, 0.1, 0.0, 0.0),
        ]);
        let pixels = project_front_view(&scan, &fv).unwrap();
        let raster = scatter_to_raster(&pixels, &fv).unwrap();

        // The far point carries the minimum value (depth is negated range) and the near point
        // the maximum, so they rasterize to 0 and 255
        let x_far = pixels[0].x.trunc() as u32;
        let y_far = pixels[0].y.trunc() as u32;
        let x_near = pixels[1].x.trunc() as u32;
        let y_near = pixels[1].y.trunc() as u32;

        assert_eq!(raster.get(x_far, y_far), 0);
        assert_eq!(raster.get(x_near, y_near), 255);
    }

    #[test]
    fn scatter_of_nothing_is_blank() {
        let fv = params(ValueSelector::Depth);
        let raster = scatter_to_raster(&[], &fv).unwrap();
        assert_eq!(raster.count_nonzero(), 0);
    }
}
