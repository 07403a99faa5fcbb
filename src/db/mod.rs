pub mod connection;
pub mod errors;
pub mod store;

#[cfg(test)]
pub(crate) mod memory;

pub use connection::{connect, ensure_indexes};
pub use errors::StoreError;
pub use store::{MongoRecordStore, RecordStore};
