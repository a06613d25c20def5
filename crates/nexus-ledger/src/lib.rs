//! Money rules for travel clients: the agent's commission, payment
//! accumulation with its status transition, and the portfolio totals shown
//! on the dashboard.

pub mod amount;
pub mod commission;
pub mod payment;
pub mod summary;

pub use amount::{MONEY_SCALE, format_amount, parse_amount_or_zero, parse_payment_amount};
pub use commission::{COMMISSION_RATE, compute_commission};
pub use payment::{PaymentOutcome, apply_payment};
pub use summary::PortfolioSummary;
