//! Orchestrates paste create/read/delete on top of the store adapter,
//! including the delete-on-read grace-period protocol.

use crate::codec;
use crate::core::{EncodedContent, Paste, PasteError, PasteId, Result};
use crate::event::{Event, EventSender};
use crate::id;
use crate::policy;
use crate::store::PasteStore;
use chrono::Utc;
use std::sync::Arc;

const SOURCE: &str = "engine";

/// How many fresh ids to try when create hits a conflict.
///
/// The id generator performs no uniqueness check of its own; retrying here
/// is the collision handling layer. The 8-character id space makes more
/// than a couple of consecutive collisions vanishingly unlikely, so a
/// small bound suffices before the conflict is surfaced as fatal.
const MAX_CREATE_ATTEMPTS: usize = 3;

/// Entry point for request handlers: every paste operation goes through
/// here rather than straight to the store.
pub struct LifecycleEngine {
    store: Arc<dyn PasteStore>,
    events: EventSender,
}

impl LifecycleEngine {
    pub fn new(store: Arc<dyn PasteStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    /// Create an unprotected paste.
    ///
    /// A `lifetime_hours` of zero selects the default lifetime
    /// ([`policy::DEFAULT_LIFETIME_HOURS`]).
    pub async fn create_paste(
        &self,
        content: &str,
        lifetime_hours: u32,
        delete_on_read: bool,
    ) -> Result<Paste> {
        self.create_paste_with_password(content, lifetime_hours, delete_on_read, None)
            .await
    }

    /// Create a paste, optionally protected by a password.
    pub async fn create_paste_with_password(
        &self,
        content: &str,
        lifetime_hours: u32,
        delete_on_read: bool,
        password: Option<&str>,
    ) -> Result<Paste> {
        if content.is_empty() {
            return Err(PasteError::Invalid("content must not be empty".into()));
        }
        let lifetime_hours = if lifetime_hours == 0 {
            policy::DEFAULT_LIFETIME_HOURS
        } else {
            lifetime_hours
        };
        let content = codec::encode(content);
        let password = password.map(codec::encode).unwrap_or_else(EncodedContent::empty);

        let mut last_conflict = None;
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let paste = Paste {
                id: id::new_id(),
                lifetime_hours,
                content: content.clone(),
                delete_on_read,
                created: Utc::now(),
                password: password.clone(),
            };
            match self.store.create(&paste).await {
                Ok(()) => {
                    self.events
                        .send(Event::info(format!("created paste {}", paste.id), SOURCE))
                        .await;
                    return Ok(paste);
                }
                Err(err @ PasteError::Conflict(_)) => {
                    self.events
                        .send(Event::warning(
                            format!("id collision on create, retrying: {err}"),
                            SOURCE,
                        ))
                        .await;
                    last_conflict = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_conflict
            .unwrap_or_else(|| PasteError::Internal("create retry loop ran zero times".into())))
    }

    /// Fetch a paste by id.
    ///
    /// When the paste is marked delete-on-read and its grace period has
    /// elapsed, the entry is deleted as a side effect of serving it. The
    /// read result is never withheld because of that deletion: a delete
    /// failure is reported as an event and the content is returned anyway.
    /// This is an at-least-once-serve contract; a concurrent read inside
    /// the race window may still observe the content before the delete
    /// lands.
    pub async fn get_paste(&self, id: &PasteId) -> Result<Paste> {
        let paste = self.store.read(id).await?;
        if policy::is_read_once_deletable(&paste, Utc::now()) {
            match self.store.delete(id).await {
                Ok(()) => {
                    self.events
                        .send(Event::info(format!("deleted read-once paste {id}"), SOURCE))
                        .await;
                }
                Err(err) => {
                    self.events
                        .send(Event::warning(
                            format!("failed to delete read-once paste {id}: {err}"),
                            SOURCE,
                        ))
                        .await;
                }
            }
        }
        Ok(paste)
    }

    /// Remove a paste by id. Idempotent, like the underlying store delete.
    pub async fn delete_paste(&self, id: &PasteId) -> Result<()> {
        self.store.delete(id).await?;
        self.events
            .send(Event::info(format!("deleted paste {id}"), SOURCE))
            .await;
        Ok(())
    }
}
