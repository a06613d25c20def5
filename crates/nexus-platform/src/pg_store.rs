use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use nexus_core::{Client, ClientPatch, ClientStatus, ClientStore, NewClient, StoreError};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

const CLIENT_COLUMNS: &str = "id, name, phone, destination, travel_date, free_amount, \
     my_commission, monto_pagado, status, created_at, updated_at";

/// `clientela` table in Postgres. Identity and both timestamps come from
/// column defaults on insert.
#[derive(Clone)]
pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn list(&self) -> Result<Vec<Client>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clientela ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to list clients")?;

        rows.iter()
            .map(client_from_row)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(StoreError::Backend)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Client>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clientela WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch client")?;

        row.as_ref()
            .map(client_from_row)
            .transpose()
            .map_err(StoreError::Backend)
    }

    async fn insert(&self, record: NewClient) -> Result<Client, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO clientela (
                name, phone, destination, travel_date, free_amount,
                my_commission, monto_pagado, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(&record.name)
        .bind(&record.phone)
        .bind(&record.destination)
        .bind(record.travel_date)
        .bind(record.free_amount)
        .bind(record.my_commission)
        .bind(record.monto_pagado)
        .bind(record.status.as_str())
        .fetch_one(&self.pool)
        .await
        .context("failed to insert client")?;

        client_from_row(&row).map_err(StoreError::Backend)
    }

    async fn update(&self, id: Uuid, patch: ClientPatch) -> Result<Client, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE clientela
            SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                destination = COALESCE($4, destination),
                travel_date = COALESCE($5, travel_date),
                free_amount = COALESCE($6, free_amount),
                my_commission = COALESCE($7, my_commission),
                monto_pagado = COALESCE($8, monto_pagado),
                status = COALESCE($9, status),
                updated_at = $10
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.phone)
        .bind(patch.destination)
        .bind(patch.travel_date)
        .bind(patch.free_amount)
        .bind(patch.my_commission)
        .bind(patch.monto_pagado)
        .bind(patch.status.map(ClientStatus::as_str))
        .bind(patch.updated_at)
        .fetch_optional(&self.pool)
        .await
        .context("failed to update client")?;

        match row {
            Some(row) => client_from_row(&row).map_err(StoreError::Backend),
            None => Err(StoreError::NotFound(id)),
        }
    }
}

fn client_from_row(row: &PgRow) -> anyhow::Result<Client> {
    let status: String = row.try_get("status")?;

    Ok(Client {
        id: row.try_get::<Uuid, _>("id")?,
        name: row.try_get::<String, _>("name")?,
        phone: row.try_get::<String, _>("phone")?,
        destination: row.try_get::<String, _>("destination")?,
        travel_date: row.try_get::<NaiveDate, _>("travel_date")?,
        free_amount: row.try_get::<Decimal, _>("free_amount")?,
        my_commission: row.try_get::<Decimal, _>("my_commission")?,
        monto_pagado: row.try_get::<Decimal, _>("monto_pagado")?,
        status: status
            .parse::<ClientStatus>()
            .with_context(|| format!("client row has unknown status '{status}'"))?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
