//! Client storage contracts and lightweight test adapters.

mod client;

pub use client::{
    load_typed_with, save_typed_with, ClientStorage, MemoryClientStorage, NoopClientStorage,
    StorageScope,
};
