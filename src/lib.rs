//! # Bithide - Hide secret text in plain sight
//!
//! Bithide hides messages in the least significant bits of carrier files
//! (PNG/BMP images and 16-bit PCM WAV audio), optionally protected by
//! password-derived authenticated encryption.
//!
//! ## Overview
//!
//! Encoding is two codecs composed linearly:
//! - The **envelope codec** seals the message under a password
//!   (PBKDF2-HMAC-SHA256 key derivation, ChaCha20-Poly1305 AEAD) — or
//!   passes the UTF-8 bytes through when no password is given
//! - The **carrier codec** writes the framed bytes into the carrier's
//!   sample LSBs, terminated by a 16-bit end marker
//!
//! Decoding is the mirror image. Extraction without a marker is a
//! legitimate negative (`None`), not an error, and a wrong password is
//! indistinguishable from corrupted data by design.
//!
//! ## Example
//!
//! ```no_run
//! use bithide::{decode, encode, Carrier};
//!
//! let carrier = Carrier::from_file("cover.png").unwrap();
//!
//! // Hide a message under a password; the cover file is untouched.
//! let stego = encode(&carrier, "meet at dawn", Some("hunter2")).unwrap();
//! stego.save("secret.png").unwrap();
//!
//! // Recover it later.
//! let loaded = Carrier::from_file("secret.png").unwrap();
//! let message = decode(&loaded, Some("hunter2")).unwrap();
//! assert_eq!(message.as_deref(), Some("meet at dawn"));
//! ```
//!
//! ## Modules
//!
//! - [`stego`]: the LSB bitstream codec and per-format carriers
//! - [`crypto`]: key derivation and the authenticated envelope
//! - [`carrier`]: typed dispatch over the supported media kinds
//! - [`encoder`] / [`decoder`]: the composed hide/reveal operations

pub mod carrier;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod stego;

// Re-export commonly used types at the crate root
pub use carrier::{Carrier, CarrierError, CarrierKind};
pub use decoder::{decode, DecodeError};
pub use encoder::{encode, encode_with_options, EncodeError, EncodeOptions};
pub use stego::{
    AudioCarrier, AudioCarrierError, CapacityError, ImageCarrier, ImageCarrierError,
};
