//! Catalog domain model.
//!
//! # Responsibility
//! - Define the astro record, its star system and moons.
//! - Own the persisted text encoding for multi-line sections.
//!
//! # Invariants
//! - Every astro is identified by its unique `name`.
//! - Records produced by deserialization are fully populated.

pub mod astro;
pub mod text;
