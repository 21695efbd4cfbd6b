//! Async text cipher

use tracing::debug;

use crate::crypto::{self, Codec, SymmetricKey};
use crate::error::{Result, SealError};
use crate::settings::Settings;

/// Derives keys and seals text according to [`Settings`].
///
/// Holds no key and no mutable state, so one instance can be shared across
/// tasks. Every call resolves to a single success or failure.
#[derive(Debug, Clone, Default)]
pub struct SymmetricCipher {
    codec: Codec,
    offload_blocking: bool,
}

impl SymmetricCipher {
    /// Create a cipher with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cipher from settings
    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            codec: settings.codec.build(),
            offload_blocking: settings.offload_blocking,
        }
    }

    /// Replace the codec used for envelopes
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Whether primitives run on the blocking thread pool
    pub fn offloads_blocking(&self) -> bool {
        self.offload_blocking
    }

    /// Derive a key from key text
    pub async fn derive_key(&self, text: &str) -> Result<SymmetricKey> {
        if !self.offload_blocking {
            return crypto::derive_key(text);
        }

        let text = text.to_owned();
        run_blocking(move || crypto::derive_key(&text)).await
    }

    /// Encrypt a string into envelope text
    pub async fn encrypt(&self, plaintext: &str, key: &SymmetricKey) -> Result<String> {
        if !self.offload_blocking {
            return crypto::encrypt_with(plaintext, key, &self.codec);
        }

        let plaintext = plaintext.to_owned();
        let key = key.clone();
        let codec = self.codec.clone();
        run_blocking(move || crypto::encrypt_with(&plaintext, &key, &codec)).await
    }

    /// Decrypt envelope text back to the original string
    pub async fn decrypt(&self, envelope: &str, key: &SymmetricKey) -> Result<String> {
        if !self.offload_blocking {
            return crypto::decrypt_with(envelope, key, &self.codec);
        }

        let envelope = envelope.to_owned();
        let key = key.clone();
        let codec = self.codec.clone();
        run_blocking(move || crypto::decrypt_with(&envelope, &key, &codec)).await
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    debug!("Offloading crypto operation to blocking pool");
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| SealError::CryptoOperation(format!("Crypto task failed: {}", e)))?
}

/// Derive a key from key text using default settings
pub async fn derive_key(text: &str) -> Result<SymmetricKey> {
    SymmetricCipher::new().derive_key(text).await
}

/// Encrypt a string using default settings
pub async fn encrypt(plaintext: &str, key: &SymmetricKey) -> Result<String> {
    SymmetricCipher::new().encrypt(plaintext, key).await
}

/// Decrypt envelope text using default settings
pub async fn decrypt(envelope: &str, key: &SymmetricKey) -> Result<String> {
    SymmetricCipher::new().decrypt(envelope, key).await
}
