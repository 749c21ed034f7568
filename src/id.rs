//! Paste identifier generation.

use crate::core::PasteId;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::Rng;

/// Length of every generated identifier.
pub const ID_LENGTH: usize = 8;

const ID_SPACE: u32 = 100_000_000;

/// Generate a fresh candidate identifier. Never fails.
///
/// The id is the base64 rendering of a random integer below 10^8
/// (zero-padded to eight decimal digits so the encoding is always long
/// enough), truncated to [`ID_LENGTH`] characters.
///
/// No uniqueness check is performed here: the generator hands out
/// candidates only. Collision handling is layered on top by the caller —
/// the lifecycle engine retries with a fresh candidate when the store
/// reports a conflict on create.
pub fn new_id() -> PasteId {
    let n = rand::rng().random_range(0..ID_SPACE);
    let encoded = STANDARD.encode(format!("{n:08}"));
    PasteId::new(&encoded[..ID_LENGTH])
}
