pub mod config;
pub mod contracts;
pub mod db;
pub mod pg_store;

pub use config::{ServiceConfig, StoreBackend};
pub use contracts::{ClientListResponse, ErrorResponse, RecordPaymentRequest};
pub use db::connect_database;
pub use pg_store::PgClientStore;
