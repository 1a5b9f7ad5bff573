pub mod database;

pub use database::{ApiKeyStore, StateStore};
