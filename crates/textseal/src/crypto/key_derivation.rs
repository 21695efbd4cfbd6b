//! Symmetric key derivation from key text
//!
//! The key is the SHA-256 digest of the UTF-8 bytes of the text, with no
//! salt and no iterations. The same text always yields the same key, so
//! key strength is exactly the entropy of the text. Use
//! [`generate_key_text`] when the caller does not already hold a
//! high-entropy secret.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::secure_memory::{Algorithm, KeyMaterial, SymmetricKey, SYMMETRIC_USAGES};
use crate::error::{Result, SealError};

/// Length of key text returned by [`generate_key_text`] by default
pub const RECOMMENDED_KEY_TEXT_LEN: usize = 32;

/// Derive an AES-256-GCM key from text
///
/// # Arguments
/// * `text` - Key text to be hashed. A 32-character random string is recommended.
///
/// # Returns
/// A key usable for both encryption and decryption
pub fn derive_key(text: &str) -> Result<SymmetricKey> {
    let material = digest_text(text);
    let key = SymmetricKey::import(material, Algorithm::AesGcm, &SYMMETRIC_USAGES)?;

    debug!("Derived {} key from {} bytes of key text", key.algorithm(), text.len());
    Ok(key)
}

/// Derive a key from raw bytes that must hold UTF-8 text
pub fn derive_key_from_utf8(bytes: &[u8]) -> Result<SymmetricKey> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SealError::InputValidation(format!("Key text is not valid UTF-8: {}", e)))?;
    derive_key(text)
}

fn digest_text(text: &str) -> KeyMaterial {
    KeyMaterial::new(Sha256::digest(text.as_bytes()).into())
}

/// Generate random key text of `len` characters from the standard Base64 alphabet
pub fn generate_key_text(len: usize) -> String {
    // Each Base64 character carries 6 bits
    let mut bytes = vec![0u8; (len * 3).div_ceil(4)];
    OsRng.fill_bytes(&mut bytes);

    let mut text = STANDARD_NO_PAD.encode(&bytes);
    text.truncate(len);
    text
}
