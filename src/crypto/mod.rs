//! Cryptographic envelope for payload protection.
//!
//! This module provides:
//! - Key derivation from a password (PBKDF2-HMAC-SHA256, random salt)
//! - Authenticated encryption of the payload (ChaCha20-Poly1305)
//! - The self-describing envelope layout that carries salt, nonce and
//!   iteration count alongside the ciphertext

pub mod envelope;
pub mod kdf;

pub use envelope::{open, seal, EnvelopeError, HEADER_LEN, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, DEFAULT_ITERATIONS, KEY_LEN, MAX_ITERATIONS, MIN_ITERATIONS, SALT_LEN};
