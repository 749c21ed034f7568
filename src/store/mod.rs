pub mod memory;

pub use memory::MemoryStore;

use crate::core::{Paste, PasteId, Result};
use async_trait::async_trait;

/// CRUD façade over the storage collaborator.
///
/// The lifecycle engine and the sweeper depend on storage only through
/// this trait, so the in-memory store used in tests and a remote document
/// store are interchangeable. Implementations must be safe for concurrent
/// use: request handlers and the sweeper call into the same instance
/// simultaneously, with no locking imposed on individual pastes.
#[async_trait]
pub trait PasteStore: Send + Sync {
    /// Store a new paste under its id.
    ///
    /// Fails with [`crate::PasteError::Conflict`] when the id already
    /// exists and [`crate::PasteError::Unavailable`] on transport or auth
    /// failure.
    async fn create(&self, paste: &Paste) -> Result<()>;

    /// Fetch a paste, or [`crate::PasteError::NotFound`].
    async fn read(&self, id: &PasteId) -> Result<Paste>;

    /// Remove a paste. Idempotent: deleting an absent id succeeds, since
    /// the sweeper and a read-triggered delete may race to remove the
    /// same entry.
    async fn delete(&self, id: &PasteId) -> Result<()>;

    /// Full scan of every stored paste.
    ///
    /// Used only by the sweeper; acceptable while paste volume stays
    /// small. A backend scaling this up should serve it from an indexed
    /// expiry query instead, without changing deletion semantics.
    async fn list_all(&self) -> Result<Vec<Paste>>;
}
