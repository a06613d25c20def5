use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Client, ClientPatch, NewClient};

/// Remote table holding one row per client.
///
/// Each call is a single independent request; there are no transactions and
/// concurrent writers to the same row are last-write-wins.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// All rows, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Client>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Client>, StoreError>;

    /// Assigns `id`, `created_at` and `updated_at`.
    async fn insert(&self, record: NewClient) -> Result<Client, StoreError>;

    /// Writes the set fields of `patch` plus `patch.updated_at`.
    async fn update(&self, id: Uuid, patch: ClientPatch) -> Result<Client, StoreError>;
}

#[async_trait]
impl<T> ClientStore for std::sync::Arc<T>
where
    T: ClientStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Client>, StoreError> {
        (**self).list().await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Client>, StoreError> {
        (**self).get(id).await
    }

    async fn insert(&self, record: NewClient) -> Result<Client, StoreError> {
        (**self).insert(record).await
    }

    async fn update(&self, id: Uuid, patch: ClientPatch) -> Result<Client, StoreError> {
        (**self).update(id, patch).await
    }
}
