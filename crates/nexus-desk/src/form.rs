use chrono::NaiveDate;
use nexus_core::{ClientStatus, NewClient, ValidationError};
use nexus_ledger::{compute_commission, parse_amount_or_zero};
use serde::{Deserialize, Serialize};

/// Raw values from the create/edit form, as typed by the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientForm {
    pub name: String,
    pub phone: String,
    pub destination: String,
    /// `YYYY-MM-DD`
    pub travel_date: String,
    pub free_amount: String,
    #[serde(default)]
    pub monto_pagado: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ClientForm {
    /// Checks required fields and builds the record to persist. The
    /// commission is always recomputed from the quote.
    pub fn validate(&self) -> Result<NewClient, ValidationError> {
        let name = required_text("name", &self.name)?;
        let phone = required_text("phone", &self.phone)?;
        let destination = required_text("destination", &self.destination)?;

        let travel_date = self.travel_date.trim();
        if travel_date.is_empty() {
            return Err(ValidationError::required("travel_date"));
        }
        let travel_date = NaiveDate::parse_from_str(travel_date, "%Y-%m-%d").map_err(|_| {
            ValidationError::invalid("travel_date", "travel_date must be a YYYY-MM-DD date")
        })?;

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => ClientStatus::Pending,
            Some(raw) => raw.parse()?,
        };

        let free_amount = parse_amount_or_zero(&self.free_amount);

        Ok(NewClient {
            name,
            phone,
            destination,
            travel_date,
            free_amount,
            my_commission: compute_commission(free_amount),
            monto_pagado: parse_amount_or_zero(&self.monto_pagado),
            status,
        })
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(trimmed.to_string())
}
