//! Generic repository trait for record stores.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic CRUD repository trait.
///
/// Reads return owned snapshots; callers never hold a reference into the
/// store. Entity-specific queries are defined on the concrete store types.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its identifier.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Snapshot of every entity, in insertion order.
    async fn list(&self) -> AppResult<Vec<Entity>>;

    /// Insert a new entity and return it.
    async fn create(&self, entity: Entity) -> AppResult<Entity>;

    /// Replace an existing entity and return the stored version.
    async fn update(&self, entity: Entity) -> AppResult<Entity>;

    /// Delete an entity by its identifier. Returns `true` if deleted.
    async fn delete(&self, id: &Id) -> AppResult<bool>;

    /// Count stored entities.
    async fn count(&self) -> AppResult<u64>;

    /// Monotonic counter bumped on every successful write.
    async fn revision(&self) -> u64;
}
