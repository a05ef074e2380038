//! Image loading utilities for texture data

use crate::assets::AssetError;
use std::path::Path;

/// Decoded RGBA8 image ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Raw RGBA pixel data, row-major, 4 bytes per pixel
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Load and decode an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        log::debug!("Loading image from: {:?}", path);

        let decoded = image::open(path)
            .map_err(|e| AssetError::LoadFailed(format!("failed to decode {:?}: {}", path, e)))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Loaded image {}x{} from {:?}", width, height, path);

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Decode an image from an in-memory buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("failed to decode buffer: {}", e)))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Create a solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&color);
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a two-color checkerboard with square cells of `cell` pixels
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                pixels.extend_from_slice(if even { &a } else { &b });
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.pixels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.pixels[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let a = [255, 255, 255, 255];
        let b = [0, 0, 0, 255];
        let img = ImageData::checkerboard(4, 4, 2, a, b);

        // First cell is color a, the next cell over is color b.
        assert_eq!(&img.pixels[0..4], &a);
        let third_pixel = (2 * 4) as usize;
        assert_eq!(&img.pixels[third_pixel..third_pixel + 4], &b);
    }

    #[test]
    fn test_checkerboard_zero_cell_clamped() {
        let img = ImageData::checkerboard(2, 2, 0, [1, 1, 1, 1], [2, 2, 2, 2]);
        assert_eq!(img.size_bytes(), 2 * 2 * 4);
    }
}
