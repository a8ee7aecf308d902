//! Message encoding: envelope then carrier.
//!
//! 1. UTF-8 encode the message
//! 2. Seal it in the authenticated envelope when a password is given
//!    (plain UTF-8 bytes otherwise)
//! 3. Embed the resulting frame into the carrier's LSBs
//!
//! Every call is self-contained: the carrier, message and password arrive as
//! explicit arguments and the result is a new carrier — no ambient state.

use thiserror::Error;

use crate::carrier::{Carrier, CarrierError};
use crate::crypto::{self, EnvelopeError, DEFAULT_ITERATIONS};

/// Errors that can occur during encoding.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("empty message")]
    EmptyMessage,

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Carrier(#[from] CarrierError),
}

/// Configuration for the encoder.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// PBKDF2 iteration count for key derivation. Values below the accepted
    /// minimum are clamped up; irrelevant without a password.
    pub iterations: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Hides `message` in `carrier`, optionally sealed under `password`.
///
/// A `None` or empty password embeds the plain UTF-8 bytes. Returns a new
/// carrier with the frame embedded; the input carrier is never modified.
pub fn encode(
    carrier: &Carrier,
    message: &str,
    password: Option<&str>,
) -> Result<Carrier, EncodeError> {
    encode_with_options(carrier, message, password, &EncodeOptions::default())
}

/// Hides a message with custom options.
pub fn encode_with_options(
    carrier: &Carrier,
    message: &str,
    password: Option<&str>,
    options: &EncodeOptions,
) -> Result<Carrier, EncodeError> {
    if message.is_empty() {
        return Err(EncodeError::EmptyMessage);
    }

    let frame = match password.filter(|p| !p.is_empty()) {
        Some(password) => crypto::seal(message.as_bytes(), password, options.iterations)?,
        None => message.as_bytes().to_vec(),
    };

    Ok(carrier.embed(&frame)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::ImageCarrier;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn test_carrier() -> Carrier {
        let img = ImageBuffer::from_fn(100, 100, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        Carrier::Image(ImageCarrier::from_image(DynamicImage::ImageRgb8(img)))
    }

    #[test]
    fn test_encode_plaintext() {
        let carrier = test_carrier();
        let stego = encode(&carrier, "plain message", None).unwrap();

        let frame = stego.extract().unwrap();
        assert_eq!(frame, b"plain message");
    }

    #[test]
    fn test_encode_empty_password_means_plaintext() {
        let carrier = test_carrier();
        let stego = encode(&carrier, "no crypto here", Some("")).unwrap();

        assert_eq!(stego.extract().unwrap(), b"no crypto here");
    }

    #[test]
    fn test_encode_with_password_produces_envelope() {
        let carrier = test_carrier();
        let stego = encode(&carrier, "secret", Some("pw")).unwrap();

        let frame = stego.extract().unwrap();
        // Sealed frames carry the envelope header, not the plaintext.
        assert!(frame.len() >= crypto::HEADER_LEN + crypto::TAG_LEN);
        assert_ne!(frame, b"secret");
    }

    #[test]
    fn test_encode_empty_message_rejected() {
        let carrier = test_carrier();
        let result = encode(&carrier, "", None);
        assert!(matches!(result, Err(EncodeError::EmptyMessage)));
    }

    #[test]
    fn test_encode_capacity_exceeded() {
        let img = ImageBuffer::from_fn(2, 2, |_, _| Rgb([0u8, 0, 0]));
        let carrier = Carrier::Image(ImageCarrier::from_image(DynamicImage::ImageRgb8(img)));

        let long_message = "x".repeat(100);
        let result = encode(&carrier, &long_message, None);
        assert!(matches!(result, Err(EncodeError::Carrier(_))));
    }
}
