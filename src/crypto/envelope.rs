//! Authenticated-encryption envelope around the payload.
//!
//! Envelope layout (all fields recoverable from the bytes alone):
//!
//! ```text
//! [4 bytes ] PBKDF2 iteration count (big-endian u32)
//! [16 bytes] PBKDF2 salt (random per encoding)
//! [12 bytes] ChaCha20-Poly1305 nonce (random per encoding)
//! [N bytes ] ciphertext (includes the 16-byte Poly1305 tag)
//! ```
//!
//! The salt MUST be random per encoding: a constant salt would make every
//! password-derived key identical across files.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use thiserror::Error;

use super::kdf::{derive_key, MAX_ITERATIONS, MIN_ITERATIONS, SALT_LEN};

/// ChaCha20-Poly1305 nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Poly1305 authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Fixed envelope header size: iterations + salt + nonce.
pub const HEADER_LEN: usize = 4 + SALT_LEN + NONCE_LEN;

/// Errors that can occur while sealing or opening an envelope.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Structurally invalid envelope: too short, or an iteration count
    /// outside the accepted range. Detectable without the password.
    #[error("envelope is truncated or structurally invalid")]
    MalformedEnvelope,

    /// Key/tag mismatch. Deliberately does not say whether the password was
    /// wrong or the ciphertext corrupted.
    #[error("decryption failed")]
    AuthenticationFailed,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Seals `message` under `password` into an envelope.
///
/// A fresh random salt and nonce are drawn for every call; sealing the same
/// message twice yields different envelopes. Iteration counts below the
/// minimum are clamped up to it.
pub fn seal(message: &[u8], password: &str, iterations: u32) -> Result<Vec<u8>, EnvelopeError> {
    use rand::RngCore;

    let iterations = iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS);

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(password, &salt, iterations);
    let cipher = ChaCha20Poly1305::new_from_slice(&*key)
        .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), message)
        .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;

    let mut envelope = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    envelope.extend_from_slice(&iterations.to_be_bytes());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&nonce_bytes);
    envelope.extend_from_slice(&ciphertext);

    Ok(envelope)
}

/// Opens an envelope, returning the plaintext.
///
/// Any key/tag mismatch surfaces as the single generic
/// [`EnvelopeError::AuthenticationFailed`] — wrong password and corrupted
/// ciphertext are indistinguishable, and both paths run the full key
/// derivation and decryption.
pub fn open(envelope: &[u8], password: &str) -> Result<Vec<u8>, EnvelopeError> {
    if envelope.len() < HEADER_LEN + TAG_LEN {
        return Err(EnvelopeError::MalformedEnvelope);
    }

    let iterations = u32::from_be_bytes([envelope[0], envelope[1], envelope[2], envelope[3]]);
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
        return Err(EnvelopeError::MalformedEnvelope);
    }

    let salt = &envelope[4..4 + SALT_LEN];
    let nonce = &envelope[4 + SALT_LEN..HEADER_LEN];
    let ciphertext = &envelope[HEADER_LEN..];

    let key = derive_key(password, salt, iterations);
    let cipher = ChaCha20Poly1305::new_from_slice(&*key)
        .map_err(|_| EnvelopeError::AuthenticationFailed)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| EnvelopeError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::DEFAULT_ITERATIONS;

    #[test]
    fn test_seal_open_roundtrip() {
        let message = b"Hello, envelope!";
        let envelope = seal(message, "secret123", DEFAULT_ITERATIONS).unwrap();
        let opened = open(&envelope, "secret123").unwrap();
        assert_eq!(opened, message);
    }

    #[test]
    fn test_wrong_password_fails() {
        let envelope = seal(b"secret data", "correct", DEFAULT_ITERATIONS).unwrap();
        let result = open(&envelope, "wrong");
        assert_eq!(result, Err(EnvelopeError::AuthenticationFailed));
    }

    #[test]
    fn test_tampered_ciphertext_fails_identically() {
        let mut envelope = seal(b"secret data", "pass", DEFAULT_ITERATIONS).unwrap();
        let last = envelope.len() - 1;
        envelope[last] ^= 0xFF;

        // Same error as a wrong password: the cause must not leak.
        assert_eq!(open(&envelope, "pass"), Err(EnvelopeError::AuthenticationFailed));
    }

    #[test]
    fn test_truncated_envelope_is_malformed() {
        assert_eq!(open(&[], "pass"), Err(EnvelopeError::MalformedEnvelope));
        assert_eq!(
            open(&[0u8; HEADER_LEN + TAG_LEN - 1], "pass"),
            Err(EnvelopeError::MalformedEnvelope)
        );
    }

    #[test]
    fn test_iteration_count_out_of_range_is_malformed() {
        let mut envelope = seal(b"data", "pass", DEFAULT_ITERATIONS).unwrap();
        // Forge an iteration count below the accepted minimum.
        envelope[..4].copy_from_slice(&1u32.to_be_bytes());
        assert_eq!(open(&envelope, "pass"), Err(EnvelopeError::MalformedEnvelope));
    }

    #[test]
    fn test_salt_is_random_per_encoding() {
        let a = seal(b"same message", "same pass", DEFAULT_ITERATIONS).unwrap();
        let b = seal(b"same message", "same pass", DEFAULT_ITERATIONS).unwrap();

        let salt_a = &a[4..4 + SALT_LEN];
        let salt_b = &b[4..4 + SALT_LEN];
        assert_ne!(salt_a, salt_b, "salt must be fresh per encoding");
        assert_ne!(a, b, "repeated sealing must not produce identical envelopes");
    }

    #[test]
    fn test_low_iteration_request_is_clamped() {
        let envelope = seal(b"data", "pass", 10).unwrap();
        let stored = u32::from_be_bytes([envelope[0], envelope[1], envelope[2], envelope[3]]);
        assert_eq!(stored, MIN_ITERATIONS);
        assert_eq!(open(&envelope, "pass").unwrap(), b"data");
    }

    #[test]
    fn test_empty_message() {
        let envelope = seal(b"", "pass", DEFAULT_ITERATIONS).unwrap();
        assert_eq!(open(&envelope, "pass").unwrap(), b"");
    }
}
