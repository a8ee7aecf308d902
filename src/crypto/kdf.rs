//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA256 with a random per-encoding salt. The salt travels in
//! the envelope header so decoding re-derives the same key without external
//! state. Derived keys are held in [`Zeroizing`] buffers and never persisted.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (256-bit).
pub const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count ever accepted; requests below this are clamped up.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Upper sanity bound, so a corrupted header cannot demand an absurd amount
/// of work during decoding.
pub const MAX_ITERATIONS: u32 = 10_000_000;

/// Derives a 256-bit key from a password and salt.
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut *key);
    key
}
