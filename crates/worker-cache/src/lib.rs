//! Versioned cache generations for the CareConnect offline caching proxy.
//!
//! This crate provides:
//! - `Snapshot` - An immutable capture of a response at the moment it was
//!   cached, with freshness derived from its `date` header
//! - `CacheStore` - The persistent generation-addressed key-value store seam
//! - `MemoryStore` - An in-memory `CacheStore` for tests and embedding
//!
//! A cache generation is a named snapshot-store of cached responses. Exactly
//! one generation is current at any time; every other generation found at
//! activation is garbage and gets deleted wholesale.

mod memory;
mod snapshot;
mod store;

pub use memory::*;
pub use snapshot::*;
pub use store::*;
