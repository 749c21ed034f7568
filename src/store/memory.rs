use super::PasteStore;
use crate::core::{Paste, PasteError, PasteId, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process paste store backed by a `HashMap`.
///
/// The default backend and the test double in one: it honors the full
/// [`PasteStore`] contract, including idempotent deletes and the conflict
/// signal on duplicate create.
#[derive(Default)]
pub struct MemoryStore {
    pastes: RwLock<HashMap<PasteId, Paste>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pastes.
    pub async fn len(&self) -> usize {
        self.pastes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pastes.read().await.is_empty()
    }
}

#[async_trait]
impl PasteStore for MemoryStore {
    async fn create(&self, paste: &Paste) -> Result<()> {
        let mut pastes = self.pastes.write().await;
        if pastes.contains_key(&paste.id) {
            return Err(PasteError::Conflict(paste.id.to_string()));
        }
        pastes.insert(paste.id.clone(), paste.clone());
        Ok(())
    }

    async fn read(&self, id: &PasteId) -> Result<Paste> {
        self.pastes
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| PasteError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &PasteId) -> Result<()> {
        // Absent id is success, not NotFound: concurrent deleters may race.
        self.pastes.write().await.remove(id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Paste>> {
        Ok(self.pastes.read().await.values().cloned().collect())
    }
}
