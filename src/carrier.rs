//! Carrier abstraction over the supported media types.
//!
//! The carrier kind is resolved ONCE from the file extension and then
//! carried as a typed value; nothing downstream re-inspects file names.
//! Supported: PNG/BMP images and 16-bit PCM WAV audio.

use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::stego::{AudioCarrier, AudioCarrierError, ImageCarrier, ImageCarrierError};

/// Errors that can occur while loading, embedding into, or saving a carrier.
#[derive(Error, Debug)]
pub enum CarrierError {
    #[error("unsupported carrier format '{0}' (supported: png, bmp, wav)")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Image(#[from] ImageCarrierError),

    #[error(transparent)]
    Audio(#[from] AudioCarrierError),
}

/// The closed set of carrier media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    Image,
    Audio,
}

impl CarrierKind {
    /// Resolves the kind from a file extension, or `None` when unsupported.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();

        match ext.as_str() {
            "png" | "bmp" => Some(CarrierKind::Image),
            "wav" => Some(CarrierKind::Audio),
            _ => None,
        }
    }
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarrierKind::Image => write!(f, "image"),
            CarrierKind::Audio => write!(f, "audio"),
        }
    }
}

/// A loaded carrier, ready for embedding or extraction.
pub enum Carrier {
    Image(ImageCarrier),
    Audio(AudioCarrier),
}

impl Carrier {
    /// Loads a carrier, resolving its kind from the file extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CarrierError> {
        let path = path.as_ref();

        match CarrierKind::from_path(path) {
            Some(CarrierKind::Image) => Ok(Carrier::Image(ImageCarrier::from_file(path)?)),
            Some(CarrierKind::Audio) => Ok(Carrier::Audio(AudioCarrier::from_file(path)?)),
            None => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_string();
                Err(CarrierError::UnsupportedFormat(ext))
            }
        }
    }

    /// The carrier's media type.
    pub fn kind(&self) -> CarrierKind {
        match self {
            Carrier::Image(_) => CarrierKind::Image,
            Carrier::Audio(_) => CarrierKind::Audio,
        }
    }

    /// Usable payload capacity in bytes.
    pub fn capacity(&self) -> usize {
        match self {
            Carrier::Image(c) => c.capacity(),
            Carrier::Audio(c) => c.capacity(),
        }
    }

    /// Embeds a frame, returning a new carrier of the same kind.
    ///
    /// The operation works on a private copy of the sample buffer; this
    /// carrier is left untouched even on failure.
    pub fn embed(&self, frame: &[u8]) -> Result<Carrier, CarrierError> {
        match self {
            Carrier::Image(c) => Ok(Carrier::Image(ImageCarrier::from_image(c.embed(frame)?))),
            Carrier::Audio(c) => Ok(Carrier::Audio(c.embed(frame)?)),
        }
    }

    /// Extracts an embedded frame, or `None` when the carrier holds nothing.
    pub fn extract(&self) -> Option<Vec<u8>> {
        match self {
            Carrier::Image(c) => c.extract(),
            Carrier::Audio(c) => c.extract(),
        }
    }

    /// Saves the carrier back to its native container format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CarrierError> {
        match self {
            Carrier::Image(c) => c.save(path)?,
            Carrier::Audio(c) => c.save(path)?,
        }
        Ok(())
    }
}
