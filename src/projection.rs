//! The two projection engines and their shared parameter types. Both projectors quantize
//! cylindrical angular coordinates (azimuth, elevation) into pixel space by a per-degree
//! resolution, but they encode different viewing orientations: the panorama is an unrolled
//! cylinder while the front view is a horizontally mirrored scatter plot. The sign conventions
//! of the two paths are deliberately kept separate; see the module docs of each.

pub mod front_view;
pub mod panorama;

use crate::Result;
use crate::errors::ProjectionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The vertical angular range of the output image, in degrees. The sensor convention is that
/// the lower bound is at or below the horizon (zero or negative) and the upper bound may be
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalFov {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl VerticalFov {
    /// Create a vertical FOV, checking the sensor convention: `min_deg` must not be positive,
    /// and the interval must not be inverted.
    pub fn try_new(min_deg: f64, max_deg: f64) -> Result<Self> {
        let fov = Self { min_deg, max_deg };
        fov.validate()?;
        Ok(fov)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_deg > 0.0 {
            return Err(ProjectionError::InvalidParameter(format!(
                "vertical FOV lower bound must be <= 0 degrees, got {}",
                self.min_deg
            ))
            .into());
        }
        if self.max_deg < self.min_deg {
            return Err(ProjectionError::InvalidParameter(format!(
                "vertical FOV is inverted: ({}, {})",
                self.min_deg, self.max_deg
            ))
            .into());
        }
        Ok(())
    }

    /// Total angular span in degrees.
    pub fn total(&self) -> f64 {
        self.max_deg - self.min_deg
    }
}

/// Chooses which scalar the front view projector encodes per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSelector {
    /// Negated ground-plane range, so nearer points take larger encoded values and read as
    /// brighter under a typical colormap ordering.
    #[default]
    Depth,

    /// The raw z coordinate.
    Height,

    /// The raw reflectance value.
    Reflectance,
}

impl FromStr for ValueSelector {
    type Err = ProjectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "depth" => Ok(ValueSelector::Depth),
            "height" => Ok(ValueSelector::Height),
            "reflectance" => Ok(ValueSelector::Reflectance),
            other => Err(ProjectionError::InvalidParameter(format!(
                "unrecognized value selector '{}', expected depth, height, or reflectance",
                other
            ))),
        }
    }
}

/// What the panorama projector does with a point whose computed cell lies outside the
/// allocated raster. There is no silent clamping option: clamping would corrupt the boundary
/// row/column of the image without any indication to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfFramePolicy {
    /// Abort the whole projection with an error naming the offending point and its cell.
    #[default]
    Fail,

    /// Skip the point and keep going; the count of skipped points is reported on the output.
    Drop,
}

/// Parameters for the cylindrical panorama projection. `v_res` and `h_res` are angular
/// resolutions in degrees per pixel row/column, `d_range` is the clipping interval applied to
/// ground-plane range before intensity scaling, and `y_fudge` is an additive slack in pixel
/// rows reconciling the theoretical vertical extent with a specific sensor's empirical data
/// distribution. The fudge factor is a calibration constant supplied by the caller, never
/// computed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoramaParams {
    pub v_res: f64,
    pub h_res: f64,
    pub v_fov: VerticalFov,
    pub d_range: (f64, f64),
    pub y_fudge: f64,
    pub policy: OutOfFramePolicy,
}

impl PanoramaParams {
    pub fn validate(&self) -> Result<()> {
        validate_resolutions(self.v_res, self.h_res)?;
        self.v_fov.validate()?;
        if self.v_fov.total() <= 0.0 {
            return Err(ProjectionError::InvalidParameter(
                "panorama vertical FOV must span a positive angle".to_string(),
            )
            .into());
        }
        if self.d_range.1 <= self.d_range.0 {
            return Err(ProjectionError::InvalidParameter(format!(
                "distance range ({}, {}) is empty or inverted",
                self.d_range.0, self.d_range.1
            ))
            .into());
        }
        Ok(())
    }
}

/// Parameters for the planar front view projection. `y_fudge` extends the vertical pixel
/// extent, in the same role as for the panorama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontViewParams {
    pub v_res: f64,
    pub h_res: f64,
    pub v_fov: VerticalFov,
    pub value_selector: ValueSelector,
    pub y_fudge: f64,
}

impl FrontViewParams {
    pub fn validate(&self) -> Result<()> {
        validate_resolutions(self.v_res, self.h_res)?;
        self.v_fov.validate()
    }

    /// The pixel-space extent `(x, y)` the projection covers: the full azimuth sweep
    /// horizontally and the vertical FOV plus fudge vertically. Rendering collaborators use
    /// this to size their output surface.
    pub fn extent(&self) -> (f64, f64) {
        (
            360.0 / self.h_res,
            self.v_fov.total() / self.v_res + self.y_fudge,
        )
    }
}

/// A single point projected into un-rounded float pixel space, paired with its encoded value.
/// Downstream rendering performs its own rasterization or anti-aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelValue {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

fn validate_resolutions(v_res: f64, h_res: f64) -> Result<()> {
    if v_res <= 0.0 || h_res <= 0.0 {
        return Err(ProjectionError::InvalidParameter(format!(
            "angular resolutions must be positive, got v_res={}, h_res={}",
            v_res, h_res
        ))
        .into());
    }
    Ok(())
}
