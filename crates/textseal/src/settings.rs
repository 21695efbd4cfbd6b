//! Cipher settings
//!
//! Plain JSON configuration for [`SymmetricCipher`](crate::SymmetricCipher).
//! Settings never contain key text or key material.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::crypto::{Codec, PaddingMode, Utf8Mode};
use crate::error::{Result, SealError};

/// Current settings format version
pub const SETTINGS_VERSION: u32 = 1;

/// Envelope codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CodecSettings {
    /// Padding accepted when decoding envelopes
    pub padding: PaddingMode,
    /// Handling of decrypted bytes that are not valid UTF-8
    pub utf8: Utf8Mode,
}

impl CodecSettings {
    /// Build the codec these settings describe
    pub fn build(&self) -> Codec {
        Codec::new(self.padding, self.utf8)
    }
}

/// Cipher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings file version
    pub version: u32,
    /// Run crypto primitives on the blocking thread pool
    pub offload_blocking: bool,
    /// Envelope codec configuration
    pub codec: CodecSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self {
            version: SETTINGS_VERSION,
            offload_blocking: false,
            codec: CodecSettings::default(),
        }
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults if it is absent
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::new());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let settings = Self::from_json(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.version != SETTINGS_VERSION {
            return Err(SealError::Config(format!(
                "Unsupported settings version: {}",
                self.version
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert_eq!(settings.version, 1);
        assert!(!settings.offload_blocking);
        assert_eq!(settings.codec.padding, PaddingMode::Indifferent);
        assert_eq!(settings.codec.utf8, Utf8Mode::Strict);
    }

    #[test]
    fn test_from_json_camel_case() {
        let settings = Settings::from_json(
            r#"{"version":1,"offloadBlocking":true,"codec":{"padding":"canonical","utf8":"lossy"}}"#,
        )
        .unwrap();

        assert!(settings.offload_blocking);
        let codec = settings.codec.build();
        assert_eq!(codec.padding(), PaddingMode::Canonical);
        assert_eq!(codec.utf8(), Utf8Mode::Lossy);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let settings = Settings::from_json(r#"{"offloadBlocking":true}"#).unwrap();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.codec, CodecSettings::default());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let err = Settings::from_json(r#"{"codec":{"padding":"sometimes"}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = Settings::from_json(r#"{"version":2}"#).unwrap_err();
        assert!(matches!(err, SealError::Config(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(&temp_dir.path().join("textseal.json"))
            .await
            .unwrap();
        assert_eq!(settings, Settings::new());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("textseal.json");

        let mut expected = Settings::new();
        expected.offload_blocking = true;
        expected.codec.padding = PaddingMode::Canonical;
        tokio::fs::write(&path, serde_json::to_string_pretty(&expected).unwrap())
            .await
            .unwrap();

        let settings = Settings::load(&path).await.unwrap();
        assert_eq!(settings, expected);
    }

    #[tokio::test]
    async fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("textseal.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = Settings::load(&path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
