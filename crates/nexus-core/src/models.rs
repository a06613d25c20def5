use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Pending,
    Paid,
    Completed,
}

impl ClientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Completed => "completed",
        }
    }

    /// The only automatic transition: reaching the quoted amount marks the
    /// client `paid`, unless it was already closed out as `completed`.
    pub fn after_payment(self, reached_quote: bool) -> Self {
        match self {
            Self::Completed => Self::Completed,
            _ if reached_quote => Self::Paid,
            other => other,
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::invalid(
                "status",
                format!("unknown status '{other}'"),
            )),
        }
    }
}

/// One travel-booking engagement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub destination: String,
    pub travel_date: NaiveDate,
    pub free_amount: Decimal,
    pub my_commission: Decimal,
    pub monto_pagado: Decimal,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the store assigns `id` and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub destination: String,
    pub travel_date: NaiveDate,
    pub free_amount: Decimal,
    pub my_commission: Decimal,
    pub monto_pagado: Decimal,
    pub status: ClientStatus,
}

impl NewClient {
    pub fn into_client(self, id: Uuid, now: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name,
            phone: self.phone,
            destination: self.destination,
            travel_date: self.travel_date,
            free_amount: self.free_amount,
            my_commission: self.my_commission,
            monto_pagado: self.monto_pagado,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update payload. `updated_at` is not optional: every mutation refreshes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_commission: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto_pagado: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    pub updated_at: DateTime<Utc>,
}

impl ClientPatch {
    /// Full-record edit from the client form.
    pub fn full(record: NewClient) -> Self {
        Self {
            name: Some(record.name),
            phone: Some(record.phone),
            destination: Some(record.destination),
            travel_date: Some(record.travel_date),
            free_amount: Some(record.free_amount),
            my_commission: Some(record.my_commission),
            monto_pagado: Some(record.monto_pagado),
            status: Some(record.status),
            updated_at: Utc::now(),
        }
    }

    /// Partial update written by the payment dialog.
    pub fn payment(monto_pagado: Decimal, status: ClientStatus) -> Self {
        Self {
            name: None,
            phone: None,
            destination: None,
            travel_date: None,
            free_amount: None,
            my_commission: None,
            monto_pagado: Some(monto_pagado),
            status: Some(status),
            updated_at: Utc::now(),
        }
    }

    pub fn apply_to(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(destination) = self.destination {
            client.destination = destination;
        }
        if let Some(travel_date) = self.travel_date {
            client.travel_date = travel_date;
        }
        if let Some(free_amount) = self.free_amount {
            client.free_amount = free_amount;
        }
        if let Some(my_commission) = self.my_commission {
            client.my_commission = my_commission;
        }
        if let Some(monto_pagado) = self.monto_pagado {
            client.monto_pagado = monto_pagado;
        }
        if let Some(status) = self.status {
            client.status = status;
        }
        client.updated_at = self.updated_at;
    }
}
