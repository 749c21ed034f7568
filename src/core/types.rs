use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External-facing identifier of a paste.
///
/// Ids are short opaque strings assigned once at creation. The storage
/// collaborator addresses pastes by this value as its primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PasteId(String);

impl PasteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Paste content in its stored (base64) representation.
///
/// The raw text is recovered with [`crate::codec::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedContent(String);

impl EncodedContent {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// An empty encoding, used for the password field of unprotected pastes.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The sole persisted entity: one stored text blob with TTL and optional
/// read-once semantics.
///
/// Pastes are immutable once created; there is no update operation. The
/// expiration instant is never stored, it is recomputed from `created` and
/// `lifetime_hours` on demand (see [`crate::policy::expires_at`]).
///
/// Field names follow the document-store wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paste {
    pub id: PasteId,
    pub lifetime_hours: u32,
    pub content: EncodedContent,
    pub delete_on_read: bool,
    pub created: DateTime<Utc>,
    /// Encoded access password; empty means unprotected.
    #[serde(default = "EncodedContent::empty")]
    pub password: EncodedContent,
}
