//! Reusable text codec for envelopes
//!
//! Bundles the Base64 engine used for envelopes with the UTF-8 policy
//! applied to decrypted plaintext. A codec is immutable, so one instance
//! can be shared by every call; [`DEFAULT_CODEC`] is the process-wide one.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine as _,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SealError};

/// How strictly `=` padding is checked when decoding an envelope.
///
/// Encoding always emits padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingMode {
    /// Padding must be present and canonical
    Canonical,
    /// Padding may be present or omitted
    #[default]
    Indifferent,
}

/// What to do when decrypted bytes are not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Utf8Mode {
    /// Fail with an encoding error
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD
    Lossy,
}

/// Process-wide codec with default settings
pub static DEFAULT_CODEC: Codec = Codec::new(PaddingMode::Indifferent, Utf8Mode::Strict);

/// Base64 engine plus UTF-8 policy
#[derive(Debug, Clone)]
pub struct Codec {
    engine: GeneralPurpose,
    padding: PaddingMode,
    utf8: Utf8Mode,
}

impl Codec {
    /// Create a codec over the standard Base64 alphabet
    pub const fn new(padding: PaddingMode, utf8: Utf8Mode) -> Self {
        let decode_padding = match padding {
            PaddingMode::Canonical => DecodePaddingMode::RequireCanonical,
            PaddingMode::Indifferent => DecodePaddingMode::Indifferent,
        };
        let config = GeneralPurposeConfig::new()
            .with_encode_padding(true)
            .with_decode_padding_mode(decode_padding);

        Self {
            engine: GeneralPurpose::new(&alphabet::STANDARD, config),
            padding,
            utf8,
        }
    }

    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    pub fn utf8(&self) -> Utf8Mode {
        self.utf8
    }

    /// Base64-encode raw bytes
    pub fn encode(&self, bytes: &[u8]) -> String {
        self.engine.encode(bytes)
    }

    /// Decode Base64 text into raw bytes
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        self.engine
            .decode(text)
            .map_err(|e| SealError::Encoding(format!("Invalid Base64: {}", e)))
    }

    /// Turn decrypted bytes back into text according to the UTF-8 policy
    pub fn decode_text(&self, bytes: Vec<u8>) -> Result<String> {
        match self.utf8 {
            Utf8Mode::Strict => String::from_utf8(bytes).map_err(|e| {
                SealError::Encoding(format!("Decrypted data is not valid UTF-8: {}", e))
            }),
            Utf8Mode::Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        DEFAULT_CODEC.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_standard_alphabet_with_padding() {
        let codec = Codec::default();
        assert_eq!(codec.encode(&[0xfb, 0xff]), "+/8=");
    }

    #[test]
    fn test_decode_rejects_characters_outside_alphabet() {
        let err = DEFAULT_CODEC.decode("abc*").unwrap_err();
        assert!(err.is_encoding());

        // URL-safe alphabet is not accepted
        assert!(DEFAULT_CODEC.decode("-_8=").is_err());
    }

    #[test]
    fn test_padding_modes() {
        let lenient = Codec::new(PaddingMode::Indifferent, Utf8Mode::Strict);
        let canonical = Codec::new(PaddingMode::Canonical, Utf8Mode::Strict);

        assert_eq!(lenient.decode("+/8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(lenient.decode("+/8=").unwrap(), vec![0xfb, 0xff]);
        assert!(canonical.decode("+/8").is_err());
        assert_eq!(canonical.decode("+/8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_utf8_modes() {
        let invalid = vec![b'o', b'k', 0xff];

        let strict = Codec::new(PaddingMode::Indifferent, Utf8Mode::Strict);
        assert!(strict.decode_text(invalid.clone()).unwrap_err().is_encoding());

        let lossy = Codec::new(PaddingMode::Indifferent, Utf8Mode::Lossy);
        assert_eq!(lossy.decode_text(invalid).unwrap(), "ok\u{FFFD}");
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(
            serde_json::to_string(&PaddingMode::Canonical).unwrap(),
            "\"canonical\""
        );
        let mode: Utf8Mode = serde_json::from_str("\"lossy\"").unwrap();
        assert_eq!(mode, Utf8Mode::Lossy);
    }
}
