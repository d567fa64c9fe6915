//! Browser client-storage adapters.

pub mod web_storage;
