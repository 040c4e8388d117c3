use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error taxonomy for the projection engines. All variants are local to a single call; the
/// projectors hold no state across invocations, so a retry with unchanged input always fails
/// identically.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A projection parameter was malformed: non-positive resolution, an inverted or
    /// positive-floored vertical field of view, a degenerate distance range, an unrecognized
    /// value selector name, or an ill-shaped input buffer.
    InvalidParameter(String),

    /// A point's computed pixel cell fell outside the allocated panorama raster while the
    /// out-of-frame policy was set to fail. Carries the input index of the offending point and
    /// the cell it mapped to.
    OutOfFrame { index: usize, x: i64, y: i64 },
}

impl Display for ProjectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            ProjectionError::OutOfFrame { index, x, y } => write!(
                f,
                "point {} projects to cell ({}, {}) outside the raster frame",
                index, x, y
            ),
        }
    }
}

impl Error for ProjectionError {}
