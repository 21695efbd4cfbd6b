//! Key handles with automatic zeroization

use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, SealError};

/// Byte length of an AES-256 key
pub const KEY_LEN: usize = 32;

/// Raw 32-byte key material - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    bytes: [u8; KEY_LEN],
}

impl KeyMaterial {
    /// Wrap raw key bytes
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Create from a slice (must be exactly 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = slice.try_into().map_err(|_| {
            SealError::InputValidation(format!(
                "Invalid key material length: expected {}, got {}",
                KEY_LEN,
                slice.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// AEAD algorithm a key is imported for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// AES-GCM with a 256-bit key
    AesGcm,
}

impl Algorithm {
    /// Algorithm name as used by platform crypto APIs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AesGcm => "AES-GCM",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations a key may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    WrapKey,
    UnwrapKey,
}

/// Usages granted to keys produced by [`derive_key`](super::derive_key)
pub const SYMMETRIC_USAGES: [KeyUsage; 2] = [KeyUsage::Encrypt, KeyUsage::Decrypt];

/// Imported symmetric key.
///
/// The material cannot be read back out. Clones share the same material,
/// which is zeroed once the last handle is dropped.
#[derive(Clone)]
pub struct SymmetricKey {
    inner: Arc<KeyInner>,
}

struct KeyInner {
    material: KeyMaterial,
    algorithm: Algorithm,
    usages: Vec<KeyUsage>,
}

impl SymmetricKey {
    /// Import key material for `algorithm`, restricted to `usages`.
    ///
    /// Only [`KeyUsage::Encrypt`] and [`KeyUsage::Decrypt`] are accepted.
    pub fn import(
        material: KeyMaterial,
        algorithm: Algorithm,
        usages: &[KeyUsage],
    ) -> Result<Self> {
        if usages.is_empty() {
            return Err(SealError::InputValidation(
                "Key usages must not be empty".to_string(),
            ));
        }
        if let Some(usage) = usages.iter().find(|u| !SYMMETRIC_USAGES.contains(*u)) {
            return Err(SealError::InputValidation(format!(
                "Unsupported key usage for {}: {:?}",
                algorithm, usage
            )));
        }

        let mut usages = usages.to_vec();
        usages.sort();
        usages.dedup();

        Ok(Self {
            inner: Arc::new(KeyInner {
                material,
                algorithm,
                usages,
            }),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.inner.algorithm
    }

    pub fn usages(&self) -> &[KeyUsage] {
        &self.inner.usages
    }

    /// Check whether the key was imported with `usage`
    pub fn allows(&self, usage: KeyUsage) -> bool {
        self.inner.usages.contains(&usage)
    }

    pub(crate) fn require(&self, usage: KeyUsage) -> Result<()> {
        if self.allows(usage) {
            Ok(())
        } else {
            Err(SealError::CryptoOperation(format!(
                "Key does not permit {:?}",
                usage
            )))
        }
    }

    pub(crate) fn material(&self) -> &KeyMaterial {
        &self.inner.material
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("algorithm", &self.inner.algorithm)
            .field("usages", &self.inner.usages)
            .field("material", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> KeyMaterial {
        KeyMaterial::new([7u8; KEY_LEN])
    }

    #[test]
    fn test_key_material_from_slice() {
        let bytes = [42u8; KEY_LEN];
        let material = KeyMaterial::from_slice(&bytes).unwrap();
        assert_eq!(material.as_bytes(), &bytes);
    }

    #[test]
    fn test_key_material_from_invalid_slice() {
        let err = KeyMaterial::from_slice(&[42u8; 16]).unwrap_err();
        assert!(err.is_input_validation());
    }

    #[test]
    fn test_import_symmetric_usages() {
        let key = SymmetricKey::import(material(), Algorithm::AesGcm, &SYMMETRIC_USAGES).unwrap();
        assert_eq!(key.algorithm().name(), "AES-GCM");
        assert!(key.allows(KeyUsage::Encrypt));
        assert!(key.allows(KeyUsage::Decrypt));
        assert!(!key.allows(KeyUsage::Sign));
    }

    #[test]
    fn test_import_rejects_other_usages() {
        let err = SymmetricKey::import(
            material(),
            Algorithm::AesGcm,
            &[KeyUsage::Encrypt, KeyUsage::WrapKey],
        )
        .unwrap_err();
        assert!(err.is_input_validation());

        let err = SymmetricKey::import(material(), Algorithm::AesGcm, &[]).unwrap_err();
        assert!(err.is_input_validation());
    }

    #[test]
    fn test_import_dedups_usages() {
        let key = SymmetricKey::import(
            material(),
            Algorithm::AesGcm,
            &[KeyUsage::Decrypt, KeyUsage::Encrypt, KeyUsage::Decrypt],
        )
        .unwrap();
        assert_eq!(key.usages(), &[KeyUsage::Encrypt, KeyUsage::Decrypt]);
    }

    #[test]
    fn test_require_missing_usage() {
        let key = SymmetricKey::import(material(), Algorithm::AesGcm, &[KeyUsage::Decrypt]).unwrap();
        assert!(key.require(KeyUsage::Decrypt).is_ok());
        assert!(key.require(KeyUsage::Encrypt).unwrap_err().is_crypto_failure());
    }

    #[test]
    fn test_clone_shares_material() {
        let key = SymmetricKey::import(material(), Algorithm::AesGcm, &SYMMETRIC_USAGES).unwrap();
        let clone = key.clone();
        assert!(Arc::ptr_eq(&key.inner, &clone.inner));
    }

    #[test]
    fn test_debug_redacted() {
        let key = SymmetricKey::import(material(), Algorithm::AesGcm, &SYMMETRIC_USAGES).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("7, 7"));

        let debug = format!("{:?}", material());
        assert!(debug.contains("REDACTED"));
    }
}
