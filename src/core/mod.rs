//! Core business logic module
//!
//! This module contains the ledger's two stateful components:
//! - `account_store` - concurrency-safe keyed account storage
//! - `engine` - transfer resolution over the store

pub mod account_store;
pub mod engine;

pub use account_store::AccountStore;
pub use engine::TransferEngine;
