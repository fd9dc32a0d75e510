//! # Haven Store
//!
//! Generic in-memory repository implementation of the domain's
//! `Repository` port.

pub mod memory;

pub use memory::MemoryStore;
