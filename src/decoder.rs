//! Message decoding: carrier then envelope.
//!
//! 1. Extract the embedded frame from the carrier's LSBs
//! 2. Open the authenticated envelope when a password is given
//! 3. Decode the plaintext as UTF-8, falling back to a lossless
//!    single-byte decoding for non-UTF-8 payloads
//!
//! "Nothing embedded" is a legitimate result, not a fault: it comes back as
//! `Ok(None)`. Errors are reserved for actual failures (bad password,
//! corrupted envelope).

use thiserror::Error;

use crate::carrier::Carrier;
use crate::crypto::{self, EnvelopeError};

/// Errors that can occur during decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Recovers a hidden message from `carrier`.
///
/// Returns `Ok(None)` when the carrier holds no end marker — an unmodified
/// file, not an error. A `None` or empty password reads the frame as plain
/// text; otherwise the frame is opened as an authenticated envelope and any
/// key/tag mismatch surfaces as [`EnvelopeError::AuthenticationFailed`].
pub fn decode(carrier: &Carrier, password: Option<&str>) -> Result<Option<String>, DecodeError> {
    let frame = match carrier.extract() {
        Some(frame) => frame,
        None => return Ok(None),
    };

    let plaintext = match password.filter(|p| !p.is_empty()) {
        Some(password) => crypto::open(&frame, password)?,
        None => frame,
    };

    Ok(Some(decode_text(plaintext)))
}

/// Decodes payload bytes as UTF-8, or losslessly maps each byte to the
/// corresponding Latin-1 character when the payload is not valid UTF-8.
/// Information is preserved either way.
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}
