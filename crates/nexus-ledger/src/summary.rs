use nexus_core::{Client, ClientStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dashboard totals over the current client list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortfolioSummary {
    pub total_clients: usize,
    pub pending_count: usize,
    pub paid_count: usize,
    pub completed_count: usize,
    pub total_commission: Decimal,
    pub total_quoted: Decimal,
    pub total_collected: Decimal,
}

impl PortfolioSummary {
    pub fn from_clients(clients: &[Client]) -> Self {
        clients
            .iter()
            .fold(Self::default(), |mut summary, client| {
                summary.total_clients += 1;
                match client.status {
                    ClientStatus::Pending => summary.pending_count += 1,
                    ClientStatus::Paid => summary.paid_count += 1,
                    ClientStatus::Completed => summary.completed_count += 1,
                }
                summary.total_commission =
                    summary.total_commission.saturating_add(client.my_commission);
                summary.total_quoted = summary.total_quoted.saturating_add(client.free_amount);
                summary.total_collected =
                    summary.total_collected.saturating_add(client.monto_pagado);
                summary
            })
    }

    pub fn count(&self, status: ClientStatus) -> usize {
        match status {
            ClientStatus::Pending => self.pending_count,
            ClientStatus::Paid => self.paid_count,
            ClientStatus::Completed => self.completed_count,
        }
    }
}
