//! Catalog store and its persistence contract.
//!
//! # Responsibility
//! - Keep the in-memory astro collection and its JSON document in sync.
//! - Enforce name uniqueness on every write path.
//!
//! # Invariants
//! - There is no dirty or batched state: a successful call has already
//!   been written through the file provider.
//! - Calls are sequential; the store is driven by one caller at a time.

pub mod astro_store;
pub mod placement;
