use async_trait::async_trait;
use chrono::Utc;
use nexus_core::{Client, ClientPatch, ClientStore, NewClient, StoreError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Client table held in process memory. Rows keep insertion order so that
/// clients created in the same instant still list newest first.
#[derive(Default)]
pub struct InMemoryClientStore {
    rows: RwLock<Vec<Client>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            rows: RwLock::new(clients),
        }
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn list(&self) -> Result<Vec<Client>, StoreError> {
        let rows = self.rows.read().await;
        let mut clients: Vec<Client> = rows.iter().rev().cloned().collect();
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clients)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Client>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|client| client.id == id).cloned())
    }

    async fn insert(&self, record: NewClient) -> Result<Client, StoreError> {
        let client = record.into_client(Uuid::new_v4(), Utc::now());

        let mut rows = self.rows.write().await;
        rows.push(client.clone());

        Ok(client)
    }

    async fn update(&self, id: Uuid, patch: ClientPatch) -> Result<Client, StoreError> {
        let mut rows = self.rows.write().await;
        let client = rows
            .iter_mut()
            .find(|client| client.id == id)
            .ok_or(StoreError::NotFound(id))?;

        patch.apply_to(client);
        Ok(client.clone())
    }
}
