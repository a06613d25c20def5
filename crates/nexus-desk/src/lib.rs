//! The client desk: what the agent does with the client list. Every write
//! is followed by a full reload, and the reloaded list is what callers show.

pub mod form;

use nexus_core::{Client, ClientPatch, ClientStore, StoreError, ValidationError};
use nexus_ledger::{PortfolioSummary, apply_payment, format_amount, parse_payment_amount};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

pub use form::ClientForm;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ClientDesk<S>
where
    S: ClientStore,
{
    store: S,
    // One write in flight at a time, like a disabled submit button.
    write_gate: Mutex<()>,
}

impl<S> ClientDesk<S>
where
    S: ClientStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn load_clients(&self) -> Result<Vec<Client>, DeskError> {
        self.store.list().await.map_err(|err| {
            error!("failed to load clients: {err}");
            DeskError::Store(err)
        })
    }

    /// Inserts a new client, or replaces every form field of `editing`.
    pub async fn save_client(
        &self,
        editing: Option<Uuid>,
        form: ClientForm,
    ) -> Result<Vec<Client>, DeskError> {
        let record = form.validate()?;
        let _gate = self.write_gate.lock().await;

        let saved = match editing {
            Some(id) => self.store.update(id, ClientPatch::full(record)).await,
            None => self.store.insert(record).await,
        }
        .map_err(|err| {
            error!("failed to save client: {err}");
            DeskError::Store(err)
        })?;

        info!(
            "client {} saved with commission {}",
            saved.id,
            format_amount(saved.my_commission)
        );

        self.load_clients().await
    }

    /// Records one payment typed into the payment dialog.
    pub async fn record_payment(
        &self,
        client_id: Uuid,
        raw_amount: &str,
    ) -> Result<Vec<Client>, DeskError> {
        let amount = parse_payment_amount(raw_amount)?;
        let _gate = self.write_gate.lock().await;

        let client = self
            .store
            .get(client_id)
            .await
            .and_then(|found| found.ok_or(StoreError::NotFound(client_id)))
            .map_err(|err| {
                error!("failed to load client {client_id} for payment: {err}");
                DeskError::Store(err)
            })?;

        let outcome = apply_payment(&client, amount)?;
        let patch = ClientPatch::payment(outcome.monto_pagado, outcome.status);

        self.store.update(client_id, patch).await.map_err(|err| {
            error!("failed to record payment for client {client_id}: {err}");
            DeskError::Store(err)
        })?;

        info!(
            "payment of {} recorded for client {}; paid {} of {}, status {}",
            format_amount(amount),
            client_id,
            format_amount(outcome.monto_pagado),
            format_amount(client.free_amount),
            outcome.status
        );

        self.load_clients().await
    }

    pub async fn summary(&self) -> Result<PortfolioSummary, DeskError> {
        let clients = self.load_clients().await?;
        Ok(PortfolioSummary::from_clients(&clients))
    }
}
