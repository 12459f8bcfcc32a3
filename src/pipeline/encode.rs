//! Payload encoding: raw bytes ⇄ base64 text.
//!
//! The standard alphabet with padding is used, so every byte sequence maps
//! to exactly one string and back. The text form is an inert intermediate;
//! it is never written anywhere.

use crate::error::ElfExecError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Base64 text produced by [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode `bytes` as base64. Infallible for any input, including empty.
pub fn encode(bytes: &[u8]) -> EncodedPayload {
    let text = STANDARD.encode(bytes);
    debug!("Encoded {} bytes → {} bytes base64", bytes.len(), text.len());
    EncodedPayload(text)
}

/// Decode base64 text back into the original bytes.
///
/// Accepts an [`EncodedPayload`] or any `&str`; malformed input (bad length,
/// characters outside the alphabet, bad padding) is
/// [`ElfExecError::DecodeFailed`].
pub fn decode(text: impl AsRef<str>) -> Result<Vec<u8>, ElfExecError> {
    let bytes = STANDARD.decode(text.as_ref())?;
    debug!("Decoded {} bytes", bytes.len());
    Ok(bytes)
}
