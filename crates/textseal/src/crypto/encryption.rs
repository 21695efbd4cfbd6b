//! AES-256-GCM authenticated encryption of text
//!
//! Envelope format: `{base64(nonce)}{base64(ciphertext_with_tag)}`
//! - Nonce: 12 bytes (96 bits), always 16 Base64 characters without padding
//! - Ciphertext: variable length, with the 16-byte auth tag appended
//!
//! Because the nonce part never carries padding, decoding the whole envelope
//! once yields `nonce || ciphertext_with_tag`, split at byte 12.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use tracing::trace;

use super::codec::{Codec, DEFAULT_CODEC};
use super::secure_memory::{KeyUsage, SymmetricKey};
use crate::error::{Result, SealError};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// Largest plaintext AES-GCM accepts: 2^39 - 256 bits
pub const MAX_PLAINTEXT_LEN: u64 = (1 << 36) - 32;

/// Nonce and ciphertext of a single encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Ciphertext with the authentication tag appended
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Encode as envelope text
    pub fn encode_with(&self, codec: &Codec) -> String {
        let mut text = codec.encode(&self.nonce);
        text.push_str(&codec.encode(&self.ciphertext));
        text
    }

    /// Parse envelope text.
    ///
    /// Fails with an encoding error on malformed Base64 and with a crypto
    /// error when fewer than 12 bytes remain after decoding.
    pub fn decode_with(text: &str, codec: &Codec) -> Result<Self> {
        let raw = codec.decode(text)?;
        if raw.len() < NONCE_LEN {
            return Err(SealError::CryptoOperation(format!(
                "Envelope too short: expected at least {} bytes, got {}",
                NONCE_LEN,
                raw.len()
            )));
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode_with(&DEFAULT_CODEC))
    }
}

impl std::str::FromStr for Envelope {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode_with(s, &DEFAULT_CODEC)
    }
}

fn build_cipher(key: &SymmetricKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.material().as_bytes())
        .map_err(|e| SealError::CryptoOperation(format!("Failed to create cipher: {}", e)))
}

/// Encrypt plaintext bytes with a fresh random nonce
pub fn seal(plaintext: &[u8], key: &SymmetricKey) -> Result<Envelope> {
    key.require(KeyUsage::Encrypt)?;

    if plaintext.len() as u64 > MAX_PLAINTEXT_LEN {
        return Err(SealError::CryptoOperation(format!(
            "Plaintext too long for {}: {} bytes",
            key.algorithm(),
            plaintext.len()
        )));
    }

    let cipher = build_cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // aes-gcm appends the auth tag to the ciphertext
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| SealError::CryptoOperation(format!("Encryption failed: {}", e)))?;

    trace!("Sealed {} plaintext bytes", plaintext.len());
    Ok(Envelope {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt and authenticate an envelope
pub fn open(envelope: &Envelope, key: &SymmetricKey) -> Result<Vec<u8>> {
    key.require(KeyUsage::Decrypt)?;

    let cipher = build_cipher(key)?;
    let nonce = Nonce::from_slice(&envelope.nonce);

    let plaintext = cipher
        .decrypt(nonce, envelope.ciphertext.as_slice())
        .map_err(|_| {
            SealError::CryptoOperation(
                "Decryption failed: invalid key or corrupted data".to_string(),
            )
        })?;

    trace!("Opened {} ciphertext bytes", envelope.ciphertext.len());
    Ok(plaintext)
}

/// Encrypt a string and return the envelope text
pub fn encrypt(plaintext: &str, key: &SymmetricKey) -> Result<String> {
    encrypt_with(plaintext, key, &DEFAULT_CODEC)
}

/// Encrypt a string, reusing the given codec
pub fn encrypt_with(plaintext: &str, key: &SymmetricKey, codec: &Codec) -> Result<String> {
    let envelope = seal(plaintext.as_bytes(), key)?;
    Ok(envelope.encode_with(codec))
}

/// Decrypt envelope text back to the original string
pub fn decrypt(envelope: &str, key: &SymmetricKey) -> Result<String> {
    decrypt_with(envelope, key, &DEFAULT_CODEC)
}

/// Decrypt envelope text, reusing the given codec
pub fn decrypt_with(envelope: &str, key: &SymmetricKey, codec: &Codec) -> Result<String> {
    let envelope = Envelope::decode_with(envelope, codec)?;
    let plaintext = open(&envelope, key)?;
    codec.decode_text(plaintext)
}

/// Decrypt envelope text held as raw bytes
pub fn decrypt_utf8(envelope: &[u8], key: &SymmetricKey) -> Result<String> {
    let envelope = std::str::from_utf8(envelope)
        .map_err(|e| SealError::InputValidation(format!("Envelope is not text: {}", e)))?;
    decrypt(envelope, key)
}
