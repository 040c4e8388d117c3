//! In-memory representations of LIDAR scan data. A scan is an ordered sequence of points, each a
//! position in sensor-centered Cartesian space paired with a reflectance value. The order of the
//! points is not semantically significant, but it is preserved because the panorama projector
//! resolves raster collisions by input order.
//!
//! Sensor dumps store each point as four 32-bit floats; the in-memory types widen coordinates to
//! f64 so the projection math runs at full precision throughout.

use crate::errors::ProjectionError;
use crate::{Point3, Result};

/// A single LIDAR return: a position in sensor-centered space (meters) and the reflectance of
/// the surface that produced it. Reflectance is typically in [0, 1] but is not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPoint {
    pub position: Point3,
    pub reflectance: f64,
}

impl ScanPoint {
    pub fn new(x: f64, y: f64, z: f64, reflectance: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            reflectance,
        }
    }

    /// Build a point from a raw sensor record of four 32-bit floats in x, y, z, reflectance
    /// order, widening to f64.
    pub fn from_record(record: [f32; 4]) -> Self {
        Self::new(
            record[0] as f64,
            record[1] as f64,
            record[2] as f64,
            record[3] as f64,
        )
    }

    /// The ground-plane range of the point: its horizontal distance from the sensor's vertical
    /// axis, ignoring z. This is the radial coordinate of the cylindrical projection; the full 3D
    /// distance would instead map points onto a spherical cap.
    ///
    /// # Examples
    ///
    /// ```
    /// use scanview::ScanPoint;
    /// let p = ScanPoint::new(3.0, 4.0, 10.0, 0.5);
    /// assert_eq!(p.ground_range(), 5.0);
    /// ```
    pub fn ground_range(&self) -> f64 {
        self.position.x.hypot(self.position.y)
    }
}

/// An ordered, flat sequence of scan points.
#[derive(Debug, Clone, Default)]
pub struct LidarScan {
    points: Vec<ScanPoint>,
}

impl LidarScan {
    pub fn new(points: Vec<ScanPoint>) -> Self {
        Self { points }
    }

    pub fn from_records(records: &[[f32; 4]]) -> Self {
        Self {
            points: records.iter().map(|r| ScanPoint::from_record(*r)).collect(),
        }
    }

    /// Build a scan from a flat buffer of 32-bit floats laid out as repeating x, y, z,
    /// reflectance records. The buffer length must be a whole number of records.
    ///
    /// # Arguments
    ///
    /// * `raw`: the flat float buffer to reinterpret as point records
    ///
    /// returns: Result<LidarScan, Box<dyn Error, Global>>
    pub fn from_raw(raw: &[f32]) -> Result<Self> {
        if raw.len() % 4 != 0 {
            return Err(ProjectionError::InvalidParameter(format!(
                "raw buffer length {} is not a whole number of 4-float records",
                raw.len()
            ))
            .into());
        }

        let points = raw
            .chunks_exact(4)
            .map(|c| ScanPoint::from_record([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self { points })
    }

    pub fn push(&mut self, point: ScanPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[ScanPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<ScanPoint>> for LidarScan {
    fn from(points: Vec<ScanPoint>) -> Self {
        Self::new(points)
    }
}

/// A scan already partitioned into the sensor's native row/column layout, for instance one row
/// per laser channel and one column per firing. The grid is stored row-major and never
/// flattened; operations that consume it preserve the layout so each output element remains
/// attributable to its originating (row, column).
#[derive(Debug, Clone)]
pub struct ScanGrid {
    rows: usize,
    cols: usize,
    points: Vec<ScanPoint>,
}

impl ScanGrid {
    /// Create a grid from row-major points. The point count must match the declared shape.
    ///
    /// # Arguments
    ///
    /// * `rows`: number of scan lines
    /// * `cols`: number of samples per scan line
    /// * `points`: the row-major point data, of length `rows * cols`
    ///
    /// returns: Result<ScanGrid, Box<dyn Error, Global>>
    pub fn try_new(rows: usize, cols: usize, points: Vec<ScanPoint>) -> Result<Self> {
        if rows * cols != points.len() {
            return Err(ProjectionError::InvalidParameter(format!(
                "grid shape {}x{} does not match point count {}",
                rows,
                cols,
                points.len()
            ))
            .into());
        }

        Ok(Self { rows, cols, points })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The grid contents in row-major order.
    pub fn points(&self) -> &[ScanPoint] {
        &self.points
    }

    pub fn at(&self, row: usize, col: usize) -> &ScanPoint {
        &self.points[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn raw_buffer_becomes_points_in_order() {
        let raw = [
            1.0f32, 2.0, 3.0, 0.5, //
            -4.0, 5.0, -6.0, 0.25,
        ];
        let scan = LidarScan::from_raw(&raw).unwrap();

        assert_eq!(scan.len(), 2);
        assert_eq!(scan.points()[0], ScanPoint::new(1.0, 2.0, 3.0, 0.5));
        assert_eq!(scan.points()[1], ScanPoint::new(-4.0, 5.0, -6.0, 0.25));
    }

    #[test]
    fn raw_buffer_with_partial_record_fails() {
        let raw = [1.0f32, 2.0, 3.0, 0.5, 9.0];
        let result = LidarScan::from_raw(&raw);
        assert!(result.is_err());
    }

    #[test]
    fn ground_range_ignores_z() {
        let p = ScanPoint::new(3.0, -4.0, 100.0, 0.0);
        assert_relative_eq!(p.ground_range(), 5.0, epsilon = 1.0e-12);
    }

    #[test]
    fn grid_shape_mismatch_fails() {
        let points = vec![ScanPoint::new(0.0, 0.0, 0.0, 0.0); 7];
        assert!(ScanGrid::try_new(2, 4, points).is_err());
    }

    #[test]
    fn grid_indexing_is_row_major() {
        let points = (0..6)
            .map(|i| ScanPoint::new(i as f64, 0.0, 0.0, 0.0))
            .collect();
        let grid = ScanGrid::try_new(2, 3, points).unwrap();

        assert_eq!(grid.at(0, 2).position.x, 2.0);
        assert_eq!(grid.at(1, 0).position.x, 3.0);
    }
}
