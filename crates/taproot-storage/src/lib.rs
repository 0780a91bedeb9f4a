//! Taproot Storage - backing stores for the Taproot graph engine
//!
//! This crate provides [`taproot_core::GraphStore`] implementations. Only
//! the in-memory snapshot store is included; it enforces the revision
//! partition invariant on write and serves queries from one immutable
//! snapshot.

pub mod error;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
