//! LSB steganography over image carriers.
//!
//! Wraps a decoded image and flattens its color channels into the shared
//! bitstream codec. Lossless containers only (PNG, BMP) — a lossy re-encode
//! would destroy the embedded LSBs.
//!
//! Sample ordering contract: pixels row-major (top-left to bottom-right),
//! R then G then B within each pixel. Alpha channels are never touched.
//! Both embedding and extraction depend on this exact order.

use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use super::codec::{self, CapacityError};

/// Errors that can occur while handling an image carrier.
#[derive(Error, Debug)]
pub enum ImageCarrierError {
    #[error("message does not fit: {0}")]
    Capacity(#[from] CapacityError),

    #[error("image load error: {0}")]
    Load(String),

    #[error("image save error: {0}")]
    Save(String),
}

/// An image carrier for LSB embedding.
pub struct ImageCarrier {
    image: DynamicImage,
}

impl ImageCarrier {
    /// Loads a carrier image from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImageCarrierError> {
        let image = image::open(path).map_err(|e| ImageCarrierError::Load(e.to_string()))?;
        Ok(Self { image })
    }

    /// Loads a carrier image from encoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageCarrierError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ImageCarrierError::Load(e.to_string()))?;
        Ok(Self { image })
    }

    /// Wraps an already-decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Usable payload capacity in bytes (end-marker overhead subtracted).
    pub fn capacity(&self) -> usize {
        let (width, height) = self.image.dimensions();
        codec::capacity_bytes(width as usize * height as usize * 3)
    }

    /// Embeds `frame` into the image's RGB LSBs.
    ///
    /// Returns a new image; the carrier itself is not modified. Fails with a
    /// capacity error before any pixel is touched.
    pub fn embed(&self, frame: &[u8]) -> Result<DynamicImage, ImageCarrierError> {
        let mut rgba = self.image.to_rgba8();
        let mut samples = flatten_rgb(&rgba);

        codec::embed(&mut samples, frame)?;

        for (pixel, chunk) in rgba.pixels_mut().zip(samples.chunks_exact(3)) {
            pixel.0[..3].copy_from_slice(chunk);
        }

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    /// Extracts an embedded frame, or `None` when the image carries nothing.
    pub fn extract(&self) -> Option<Vec<u8>> {
        let rgba = self.image.to_rgba8();
        codec::extract(&flatten_rgb(&rgba))
    }

    /// Saves the image. The target must be a lossless format (PNG or BMP).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageCarrierError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !matches!(ext.as_str(), "png" | "bmp") {
            return Err(ImageCarrierError::Save(format!(
                "refusing lossy or unknown output format '{ext}' (use .png or .bmp)"
            )));
        }

        self.image
            .save(path)
            .map_err(|e| ImageCarrierError::Save(e.to_string()))
    }

    /// Returns the image encoded as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ImageCarrierError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ImageCarrierError::Save(e.to_string()))?;
        Ok(bytes)
    }

    /// Returns a reference to the underlying image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Flattens RGB channels in the documented sample order, skipping alpha.
fn flatten_rgb(rgba: &RgbaImage) -> Vec<u8> {
    let mut samples = Vec::with_capacity(rgba.width() as usize * rgba.height() as usize * 3);
    for pixel in rgba.pixels() {
        samples.extend_from_slice(&pixel.0[..3]);
    }
    samples
}
