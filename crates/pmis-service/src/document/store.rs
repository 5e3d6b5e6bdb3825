//! In-memory document record store.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

use pmis_core::error::{AppError, ErrorKind};
use pmis_core::events::{DocumentEvent, DomainEvent};
use pmis_core::result::AppResult;
use pmis_core::traits::Repository;
use pmis_core::types::{DocumentId, ProjectId, UserId};
use pmis_entity::document::Document;

#[derive(Debug, Default)]
struct StoreInner {
    documents: Vec<Document>,
    revision: u64,
}

impl StoreInner {
    fn position(&self, id: &DocumentId) -> Option<usize> {
        self.documents.iter().position(|doc| &doc.id == id)
    }
}

/// The shared, ordered collection of document records.
///
/// Readers get owned snapshots. Every successful write bumps the revision
/// and publishes a [`DomainEvent`] carrying it.
#[derive(Debug)]
pub struct DocumentStore {
    inner: RwLock<StoreInner>,
    events: broadcast::Sender<DomainEvent>,
}

impl DocumentStore {
    /// Creates an empty store whose event channel holds `event_buffer`
    /// undelivered events per subscriber.
    pub fn new(event_buffer: usize) -> Self {
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Self {
            inner: RwLock::new(StoreInner::default()),
            events,
        }
    }

    /// Creates a store preloaded with `documents`, in order.
    ///
    /// Fails with a conflict if two documents share an id.
    pub fn with_documents(documents: Vec<Document>, event_buffer: usize) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(documents.len());
        for doc in &documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(AppError::conflict(format!(
                    "Duplicate document id '{}' in seed",
                    doc.id
                )));
            }
        }

        debug!(documents = documents.len(), "Document store seeded");
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Ok(Self {
            inner: RwLock::new(StoreInner {
                documents,
                revision: 0,
            }),
            events,
        })
    }

    /// Subscribe to document events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    /// Snapshot of every document together with the revision it reflects.
    pub async fn snapshot(&self) -> (Vec<Document>, u64) {
        let inner = self.inner.read().await;
        (inner.documents.clone(), inner.revision)
    }

    /// Documents belonging to `project_id`, in store order.
    pub async fn find_by_project(&self, project_id: &ProjectId) -> Vec<Document> {
        self.inner
            .read()
            .await
            .documents
            .iter()
            .filter(|doc| &doc.project_id == project_id)
            .cloned()
            .collect()
    }

    /// Append a new document on behalf of `actor`.
    pub async fn insert(&self, actor: Option<&UserId>, document: Document) -> AppResult<Document> {
        let mut inner = self.inner.write().await;
        if inner.position(&document.id).is_some() {
            return Err(AppError::conflict(format!(
                "Document '{}' already exists",
                document.id
            )));
        }
        inner.documents.push(document.clone());
        inner.revision += 1;

        info!(
            document_id = %document.id,
            project_id = %document.project_id,
            revision = inner.revision,
            "Document created"
        );
        self.publish(
            actor,
            inner.revision,
            DocumentEvent::Created {
                document_id: document.id.clone(),
                project_id: document.project_id.clone(),
                name: document.name.clone(),
            },
        );
        Ok(document)
    }

    /// Apply `change` to the document `id` atomically.
    ///
    /// `change` works on a copy; if it fails the stored record is left
    /// untouched and no revision is consumed. On success the copy replaces
    /// the record and the event it returned is published.
    pub async fn modify<F>(&self, actor: Option<&UserId>, id: &DocumentId, change: F) -> AppResult<Document>
    where
        F: FnOnce(&mut Document) -> AppResult<DocumentEvent>,
    {
        let mut inner = self.inner.write().await;
        let pos = inner
            .position(id)
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;

        let mut updated = inner.documents[pos].clone();
        let event = change(&mut updated)?;
        if updated.id != *id {
            return Err(AppError::validation("Document id cannot change"));
        }
        inner.documents[pos] = updated.clone();
        inner.revision += 1;

        debug!(document_id = %id, revision = inner.revision, "Document modified");
        self.publish(actor, inner.revision, event);
        Ok(updated)
    }

    /// Remove the document `id` on behalf of `actor`, returning it.
    pub async fn remove(&self, actor: Option<&UserId>, id: &DocumentId) -> AppResult<Document> {
        let mut inner = self.inner.write().await;
        let pos = inner
            .position(id)
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;
        let removed = inner.documents.remove(pos);
        inner.revision += 1;

        info!(document_id = %id, revision = inner.revision, "Document deleted");
        self.publish(
            actor,
            inner.revision,
            DocumentEvent::Deleted {
                document_id: removed.id.clone(),
                name: removed.name.clone(),
            },
        );
        Ok(removed)
    }

    fn publish(&self, actor: Option<&UserId>, revision: u64, payload: DocumentEvent) {
        // No subscribers is not an error.
        let _ = self
            .events
            .send(DomainEvent::new(actor.cloned(), revision, payload));
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl Repository<Document, DocumentId> for DocumentStore {
    async fn find_by_id(&self, id: &DocumentId) -> AppResult<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner.position(id).map(|pos| inner.documents[pos].clone()))
    }

    async fn list(&self) -> AppResult<Vec<Document>> {
        Ok(self.inner.read().await.documents.clone())
    }

    async fn create(&self, entity: Document) -> AppResult<Document> {
        self.insert(None, entity).await
    }

    async fn update(&self, entity: Document) -> AppResult<Document> {
        let id = entity.id.clone();
        self.modify(None, &id, move |doc| {
            *doc = entity;
            Ok(DocumentEvent::Updated {
                document_id: doc.id.clone(),
            })
        })
        .await
    }

    async fn delete(&self, id: &DocumentId) -> AppResult<bool> {
        match self.remove(None, id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is(ErrorKind::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.inner.read().await.documents.len() as u64)
    }

    async fn revision(&self) -> u64 {
        self.inner.read().await.revision
    }
}
