//! Cryptographic primitives for text sealing
//!
//! This module provides:
//! - SHA-256 key derivation from key text
//! - AES-256-GCM authenticated encryption into Base64 envelopes
//! - Key handles with zeroize-on-drop security
//!
//! Everything here is synchronous; see [`crate::SymmetricCipher`] for the
//! async API.

mod codec;
mod encryption;
mod key_derivation;
mod secure_memory;

pub use codec::{Codec, PaddingMode, Utf8Mode, DEFAULT_CODEC};
pub use encryption::{
    decrypt, decrypt_utf8, decrypt_with, encrypt, encrypt_with, open, seal, Envelope,
    MAX_PLAINTEXT_LEN, NONCE_LEN, TAG_LEN,
};
pub use key_derivation::{
    derive_key, derive_key_from_utf8, generate_key_text, RECOMMENDED_KEY_TEXT_LEN,
};
pub use secure_memory::{Algorithm, KeyMaterial, KeyUsage, SymmetricKey, KEY_LEN, SYMMETRIC_USAGES};
