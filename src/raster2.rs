//! This module contains a dense 2D raster type for the panorama projector's output. The raster
//! is a grid of `u8` intensities backed by a grayscale image buffer, so it can be handed
//! directly to image encoding or display tooling without conversion. Unwritten cells hold 0,
//! which reads as black / no-data.

use crate::Result;
use crate::image::{GrayImage, Luma, Rgba, RgbaImage};
use colorgrad::Gradient;
use std::path::Path;

/// A dense raster of 8-bit intensity values with image-space addressing: x is the column index
/// growing rightward, y is the row index growing downward, and (0, 0) is the top-left cell.
#[derive(Debug, Clone)]
pub struct IntensityRaster {
    pub buffer: GrayImage,
}

impl IntensityRaster {
    /// Create a new raster by taking ownership of a grayscale image buffer.
    pub fn new(buffer: GrayImage) -> Self {
        Self { buffer }
    }

    /// Create an all-zero raster of the given dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            buffer: GrayImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.buffer.get_pixel(x, y)[0]
    }

    pub fn put(&mut self, x: u32, y: u32, value: u8) {
        self.buffer.put_pixel(x, y, Luma([value]));
    }

    /// Check whether a signed cell coordinate lies inside the raster.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Count of cells holding a nonzero intensity.
    pub fn count_nonzero(&self) -> usize {
        self.buffer.as_raw().iter().filter(|&&v| v > 0).count()
    }

    /// Encode the raster as a grayscale PNG at the given path.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.buffer.save(path).map_err(|e| e.into())
    }

    /// Render the raster to an image file using a color gradient map from the `colorgrad`
    /// crate. Each intensity is mapped through the gradient over the full `u8` range; no
    /// rescaling or clipping is applied here, since the projector has already encoded its
    /// values into [0, 255].
    ///
    /// # Arguments
    ///
    /// * `path`: the path to the output image file
    /// * `gradient`: a `Gradient` trait object that provides the color mapping
    ///
    /// returns: Result<(), Box<dyn Error, Global>>
    pub fn render_with_cmap(&self, path: &Path, gradient: &dyn Gradient) -> Result<()> {
        let mut img = RgbaImage::new(self.width(), self.height());

        for (x, y, p) in img.enumerate_pixels_mut() {
            let f = self.get(x, y) as f32 / 255.0;
            let color = gradient.at(f).to_rgba8();
            *p = Rgba(color);
        }

        img.save(path).map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_raster_is_zeroed() {
        let raster = IntensityRaster::empty(8, 4);
        assert_eq!(raster.width(), 8);
        assert_eq!(raster.height(), 4);
        assert_eq!(raster.count_nonzero(), 0);
    }

    #[test]
    fn put_and_get_round_trip() {
        let mut raster = IntensityRaster::empty(8, 4);
        raster.put(7, 3, 200);
        assert_eq!(raster.get(7, 3), 200);
        assert_eq!(raster.count_nonzero(), 1);
    }

    #[test]
    fn contains_rejects_out_of_frame_cells() {
        let raster = IntensityRaster::empty(8, 4);
        assert!(raster.contains(0, 0));
        assert!(raster.contains(7, 3));
        assert!(!raster.contains(8, 0));
        assert!(!raster.contains(0, 4));
        assert!(!raster.contains(-1, 2));
    }
}
