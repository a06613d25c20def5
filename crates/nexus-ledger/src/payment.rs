use nexus_core::{Client, ClientStatus, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// New amount-paid and status for a client after one payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub monto_pagado: Decimal,
    pub status: ClientStatus,
    /// What is still owed against the quote; zero once reached or exceeded.
    pub balance_due: Decimal,
    pub overpaid: bool,
}

/// Adds `payment` to what the client has paid so far.
///
/// Reaching the quoted amount moves the client to `paid` unless it is
/// already `completed`. Over-payment is accepted as is.
pub fn apply_payment(client: &Client, payment: Decimal) -> Result<PaymentOutcome, ValidationError> {
    if payment <= Decimal::ZERO {
        return Err(ValidationError::invalid(
            "amount",
            "amount must be greater than zero",
        ));
    }

    let monto_pagado = client
        .monto_pagado
        .checked_add(payment)
        .ok_or_else(|| ValidationError::invalid("amount", "amount is too large"))?;
    let reached_quote = monto_pagado >= client.free_amount;

    Ok(PaymentOutcome {
        monto_pagado,
        status: client.status.after_payment(reached_quote),
        balance_due: (client.free_amount - monto_pagado).max(Decimal::ZERO),
        overpaid: monto_pagado > client.free_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::client;

    #[test]
    fn partial_payment_keeps_status() {
        let c = client(1000, 0, ClientStatus::Pending);
        let outcome = apply_payment(&c, Decimal::from(600)).unwrap();

        assert_eq!(outcome.monto_pagado, Decimal::from(600));
        assert_eq!(outcome.status, ClientStatus::Pending);
        assert_eq!(outcome.balance_due, Decimal::from(400));
        assert!(!outcome.overpaid);
    }

    #[test]
    fn reaching_the_quote_marks_paid() {
        let c = client(1000, 600, ClientStatus::Pending);
        let outcome = apply_payment(&c, Decimal::from(400)).unwrap();

        assert_eq!(outcome.monto_pagado, Decimal::from(1000));
        assert_eq!(outcome.status, ClientStatus::Paid);
        assert_eq!(outcome.balance_due, Decimal::ZERO);
    }

    #[test]
    fn completed_client_is_never_downgraded() {
        let c = client(500, 500, ClientStatus::Completed);
        let outcome = apply_payment(&c, Decimal::from(100)).unwrap();

        assert_eq!(outcome.monto_pagado, Decimal::from(600));
        assert_eq!(outcome.status, ClientStatus::Completed);
        assert!(outcome.overpaid);
    }

    #[test]
    fn completed_client_below_quote_stays_completed() {
        let c = client(500, 0, ClientStatus::Completed);
        let outcome = apply_payment(&c, Decimal::from(10)).unwrap();
        assert_eq!(outcome.status, ClientStatus::Completed);
    }

    #[test]
    fn non_positive_payment_is_rejected() {
        let c = client(200, 0, ClientStatus::Pending);
        assert!(apply_payment(&c, Decimal::ZERO).is_err());
        assert!(apply_payment(&c, Decimal::from(-5)).is_err());
    }

    #[test]
    fn payment_that_overflows_the_running_total_is_rejected() {
        let mut c = client(1000, 0, ClientStatus::Pending);
        c.monto_pagado = Decimal::MAX;

        let err = apply_payment(&c, Decimal::ONE).unwrap_err();
        assert_eq!(err.field, "amount");
    }

    #[test]
    fn free_trip_is_paid_by_any_payment() {
        let c = client(0, 0, ClientStatus::Pending);
        let outcome = apply_payment(&c, Decimal::new(1, 2)).unwrap();
        assert_eq!(outcome.status, ClientStatus::Paid);
    }

    #[test]
    fn overpayment_is_not_clamped() {
        let c = client(300, 0, ClientStatus::Pending);
        let outcome = apply_payment(&c, Decimal::from(450)).unwrap();

        assert_eq!(outcome.monto_pagado, Decimal::from(450));
        assert_eq!(outcome.status, ClientStatus::Paid);
        assert_eq!(outcome.balance_due, Decimal::ZERO);
        assert!(outcome.overpaid);
    }

    #[test]
    fn paid_client_stays_paid_on_extra_payment() {
        let c = client(300, 300, ClientStatus::Paid);
        let outcome = apply_payment(&c, Decimal::from(20)).unwrap();
        assert_eq!(outcome.status, ClientStatus::Paid);
    }

    #[test]
    fn repeated_payments_accumulate() {
        let mut c = client(1000, 0, ClientStatus::Pending);
        for _ in 0..3 {
            let outcome = apply_payment(&c, Decimal::from(250)).unwrap();
            c.monto_pagado = outcome.monto_pagado;
            c.status = outcome.status;
        }
        assert_eq!(c.monto_pagado, Decimal::from(750));
        assert_eq!(c.status, ClientStatus::Pending);
    }
}
