pub mod error;
pub mod models;
pub mod storage;

pub use error::{StoreError, ValidationError};
pub use models::{Client, ClientPatch, ClientStatus, NewClient};
pub use storage::ClientStore;
