//! Steganographic carrier codec.
//!
//! - [`codec`]: the pure LSB bitstream codec (embed/extract over samples)
//! - [`image`]: image carriers (PNG, BMP) — one bit per RGB channel
//! - [`audio`]: WAV carriers — one bit per 16-bit PCM sample

pub mod audio;
pub mod codec;
pub mod image;

pub use audio::{AudioCarrier, AudioCarrierError};
pub use codec::{CapacityError, LsbSample, END_MARKER, MARKER_BITS};
pub use image::{ImageCarrier, ImageCarrierError};
