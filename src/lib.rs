// ============================================================================
// Pastebox Library
// ============================================================================

pub mod codec;
pub mod config;
pub mod core;
pub mod engine;
pub mod event;
pub mod id;
pub mod policy;
pub mod store;
pub mod sweeper;

// Re-export main types for convenience
pub use crate::core::{EncodedContent, Paste, PasteError, PasteId, Result};
pub use engine::LifecycleEngine;
pub use store::{MemoryStore, PasteStore};
pub use sweeper::{SweepStats, Sweeper, SweeperHandle, SweeperOpts};

// Re-export the event channel API
pub use event::{
    DEFAULT_EVENT_CAPACITY, Event, EventReceiver, EventSender, Severity, event_channel,
    run_consumer,
};
pub use config::StoreConfig;
