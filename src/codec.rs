//! Reversible transform between raw paste text and the stored representation.

use crate::core::{EncodedContent, PasteError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encode raw text into the stored representation.
///
/// Total and deterministic; never fails for valid UTF-8 input.
pub fn encode(raw: &str) -> EncodedContent {
    EncodedContent::new(STANDARD.encode(raw.as_bytes()))
}

/// Decode stored content back into raw text.
///
/// Inverse of [`encode`]: `decode(encode(x)) == x` for all `x`. Fails with
/// [`PasteError::Decode`] when the stored value is not valid base64 or the
/// decoded bytes are not UTF-8.
pub fn decode(content: &EncodedContent) -> Result<String> {
    let bytes = STANDARD
        .decode(content.as_str())
        .map_err(|err| PasteError::Decode(format!("invalid base64 content: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| PasteError::Decode(format!("content is not valid UTF-8: {err}")))
}
