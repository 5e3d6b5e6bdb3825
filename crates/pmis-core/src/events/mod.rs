//! Domain events emitted by the document store.
//!
//! Events are published on a broadcast channel after every successful
//! write. Explorer views subscribe to them to know when their derived
//! folder tree is stale.

pub mod document;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

pub use document::DocumentEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<UserId>,
    /// Store revision after the write that produced this event.
    pub revision: u64,
    /// The event payload.
    pub payload: DocumentEvent,
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<UserId>, revision: u64, payload: DocumentEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            revision,
            payload,
        }
    }
}
