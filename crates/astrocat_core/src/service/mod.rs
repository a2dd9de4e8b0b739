//! Core use-case services.
//!
//! # Responsibility
//! - Turn UI-level input (forms, picks) into store calls.
//! - Keep the UI layer decoupled from record normalization details.

pub mod astro_service;
