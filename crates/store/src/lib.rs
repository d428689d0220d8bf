// Record store - durable entity tables over a single SQLite connection

pub mod error;
pub mod files;
pub mod store;

pub use error::StoreError;
pub use store::{AdFilter, ContractFilter, RecordStore};
