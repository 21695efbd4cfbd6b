//! # textseal
//!
//! Passphrase-style symmetric encryption of short strings:
//! - SHA-256 key derivation from key text
//! - AES-256-GCM encryption into `base64(nonce) || base64(ciphertext)` envelopes
//! - Key handles with zeroize-on-drop security
//!
//! ```rust,ignore
//! let key = textseal::derive_key("correct-horse-battery-staple-32").await?;
//! let envelope = textseal::encrypt("hello world", &key).await?;
//! assert_eq!(textseal::decrypt(&envelope, &key).await?, "hello world");
//! ```
//!
//! The envelope format is fixed and unversioned. Keys are derived without a
//! salt, so the key text must carry the entropy itself.

pub mod crypto;
pub mod error;
pub mod settings;
mod cipher;

pub use cipher::{decrypt, derive_key, encrypt, SymmetricCipher};
pub use crypto::{Codec, Envelope, SymmetricKey};
pub use error::{ErrorKind, Result, SealError};
pub use settings::{CodecSettings, Settings};
