//! Image decoding for the viewer.
//!
//! Decoding happens through the `image` crate and always lands in RGBA8 —
//! the only layout the quad pipeline uploads.

use std::fmt;
use std::path::{Path, PathBuf};

/// Decoded image pixels, RGBA8 row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Wraps already-decoded RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0, "image must have at least one pixel");
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self { width, height, pixels }
    }

    /// Height over width.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// A failed image load; the viewer keeps its previous visual state.
#[derive(Debug)]
pub struct ImageLoadError {
    pub path: PathBuf,
    pub source: image::ImageError,
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load image {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for ImageLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Decodes the image at `path` into RGBA8.
pub fn load_image(path: &Path) -> Result<ImageData, ImageLoadError> {
    let decoded = image::open(path).map_err(|source| ImageLoadError {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("loaded image {} ({width}x{height})", path.display());

    Ok(ImageData::from_rgba8(width, height, rgba.into_raw()))
}
