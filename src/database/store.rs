use async_trait::async_trait;
use thiserror::Error;

use crate::query::Identified;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Backend(String),
}

/// A persisted record type
pub trait Entity: Identified + Clone + Send + Sync + 'static {
    /// Fields supplied by the caller on insert; the id is server-assigned.
    type Draft: Send + 'static;

    const KIND: &'static str;

    fn from_draft(id: i32, draft: Self::Draft) -> Self;

    /// Whether two distinct records would violate a uniqueness constraint
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    fn not_found(id: i32) -> StoreError {
        StoreError::NotFound(format!("{} {} not found", Self::KIND, id))
    }
}

/// Storage collaborator for one entity type. Every mutation is all-or-nothing.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    /// The full collection, ordered by id
    async fn all(&self) -> Result<Vec<T>, StoreError>;

    async fn find_one(&self, id: i32) -> Result<Option<T>, StoreError>;

    async fn insert(&self, draft: T::Draft) -> Result<T, StoreError>;

    /// Replace the stored record with the same id
    async fn update(&self, entity: T) -> Result<T, StoreError>;

    async fn delete(&self, id: i32) -> Result<(), StoreError>;

    async fn get_404(&self, id: i32) -> Result<T, StoreError> {
        self.find_one(id).await?.ok_or_else(|| T::not_found(id))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.all().await?.len())
    }

    /// Connectivity probe for health checks
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
