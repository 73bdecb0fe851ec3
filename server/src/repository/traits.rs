//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity, ReorderReport, TodoRef};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities in display order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity, failing with `NotFound` if it is gone
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID, failing with `NotFound` if it is absent
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Manual ordering inside priority tiers
#[async_trait]
pub trait TodoOrderingOperations {
    /// Order value for the next created record (max + 1, or 0 when empty)
    async fn next_order(&self) -> DomainResult<i64>;

    /// Give every referenced record its index in `refs` as the new order.
    ///
    /// Runs as one transaction. References that cannot be applied are
    /// reported in the returned report; a store error rolls everything back.
    async fn reorder_batch(&self, refs: &[TodoRef]) -> DomainResult<ReorderReport>;
}
