use std::sync::{Arc, Weak};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use parking_lot::RwLock;

use crate::error::SurfaceError;

/// Shared handle to the live drawing surface. The shell owns the `Arc`.
pub type SurfaceHandle = Arc<RwLock<Surface>>;

/// Non-owning handle held by the editor
pub type WeakSurface = Weak<RwLock<Surface>>;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The live pixel buffer tools paint into.
///
/// Every mutable access bumps `version`, which the shell uses to decide
/// when the on-screen texture has to be re-uploaded.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
    version: u64,
}

impl Surface {
    /// Creates a fully transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, TRANSPARENT),
            version: 0,
        })
    }

    /// Creates a surface and wraps it in a shareable handle
    pub fn shared(width: u32, height: u32) -> Result<SurfaceHandle, SurfaceError> {
        Ok(Arc::new(RwLock::new(Self::new(width, height)?)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Mutable access to the pixel buffer. Marks the surface as changed.
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        self.version += 1;
        &mut self.pixels
    }

    /// Clears every pixel to transparent
    pub fn clear(&mut self) {
        for pixel in self.pixels_mut().pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    /// Clears the surface and copies `image` onto it.
    ///
    /// The image is stretched to the surface's current dimensions when the
    /// sizes disagree.
    pub fn restore(&mut self, image: &RgbaImage) {
        self.clear();
        let (width, height) = (self.width(), self.height());
        if image.dimensions() == (width, height) {
            self.pixels_mut().clone_from(image);
        } else {
            log::debug!(
                "Scaling {}x{} image onto {}x{} surface",
                image.width(),
                image.height(),
                width,
                height
            );
            *self.pixels_mut() = imageops::resize(image, width, height, FilterType::Nearest);
        }
    }

    /// Resizes the surface, keeping the overlapping top-left region.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let mut resized = RgbaImage::from_pixel(width, height, TRANSPARENT);
        imageops::replace(&mut resized, &self.pixels, 0, 0);
        *self.pixels_mut() = resized;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_surface_is_rejected() {
        assert_eq!(
            Surface::new(0, 10).unwrap_err(),
            SurfaceError::InvalidDimensions { width: 0, height: 10 }
        );
    }

    #[test]
    fn test_mutation_bumps_version() {
        let mut surface = Surface::new(4, 4).unwrap();
        let before = surface.version();
        surface.pixels_mut().put_pixel(1, 1, Rgba([255, 0, 0, 255]));
        assert!(surface.version() > before);
        assert_eq!(surface.pixel(1, 1), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_restore_scales_to_current_size() {
        let mut surface = Surface::new(4, 4).unwrap();
        let source = RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255]));
        surface.restore(&source);
        assert_eq!(surface.size(), [4, 4]);
        assert_eq!(surface.pixel(3, 3), Some(Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_resize_keeps_top_left() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.pixels_mut().put_pixel(0, 0, Rgba([1, 2, 3, 255]));
        surface.resize(8, 2).unwrap();
        assert_eq!(surface.size(), [8, 2]);
        assert_eq!(surface.pixel(0, 0), Some(Rgba([1, 2, 3, 255])));
        assert_eq!(surface.pixel(7, 1), Some(TRANSPARENT));
    }
}
