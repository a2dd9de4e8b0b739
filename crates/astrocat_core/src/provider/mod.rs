//! Capabilities the store and UI layer depend on.
//!
//! # Responsibility
//! - Define the file provider contract used for catalog durability.
//! - Provide filesystem and in-memory implementations.
//! - Import user-selected media into the managed media directory.

pub mod file;
pub mod media;
pub mod memory;
