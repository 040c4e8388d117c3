//! This crate contains tools for converting raw 3D LIDAR scans into 2D raster images by
//! projecting the points onto a cylindrical or planar surface around the sensor. It produces the
//! "range image" style representations consumed by visual inspection tooling and image-based
//! perception pipelines.
//!
//! There are two projection engines:
//!
//! - The cylindrical panorama projector ([`project_panorama`]) unrolls the full 360 degree sweep
//!   of a scan into a dense `u8` raster in which pixel intensity encodes clipped, rescaled range
//!   distance.
//!
//! - The planar front view projector ([`project_front_view`]) maps each point to un-rounded float
//!   pixel coordinates paired with a selectable scalar (depth, height, or reflectance), intended
//!   for scatter-style rendering rather than dense-grid storage.
//!
//! Both engines are pure functions of their inputs: the pixel coordinate of every point depends
//! only on that point and the projection parameters, and the only cross-point coupling is the
//! last-write-wins collision policy when the panorama raster is assembled.

use std::error::Error;

pub mod errors;
pub mod io;
pub mod projection;
pub mod raster2;
pub mod scan;

pub use parry3d_f64::na;

pub use image;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;

pub use errors::ProjectionError;
pub use projection::front_view::{project_front_view, project_front_view_grid, scatter_to_raster};
pub use projection::panorama::{Panorama, project_panorama};
pub use projection::{
    FrontViewParams, OutOfFramePolicy, PanoramaParams, PixelValue, ValueSelector, VerticalFov,
};
pub use raster2::IntensityRaster;
pub use scan::{LidarScan, ScanGrid, ScanPoint};

#[cfg(test)]
mod tests {}
