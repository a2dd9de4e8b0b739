//! Core catalog logic for Astrocat.
//! This crate owns the astro store and every invariant over its records.

pub mod config;
pub mod logging;
pub mod model;
pub mod provider;
pub mod service;
pub mod store;

pub use config::{CanvasBounds, StoreConfig, DATA_FILE_NAME, MEDIA_DIR_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::astro::{
    AstroRecord, AstroValidationError, Category, Coordinates, MediaType, Moon, StarSystem,
    TextField, DEFAULT_STAR_NAME, DEFAULT_STAR_TYPE,
};
pub use model::text::{escape_newlines, unescape_newlines};
pub use provider::file::{FileProvider, FsFileProvider, ProviderError};
pub use provider::media::{MediaError, MediaImport, MediaLibrary};
pub use provider::memory::MemoryFileProvider;
pub use service::astro_service::{AstroForm, AstroService, CategoryGroup, MoonRow};
pub use store::astro_store::{
    AstroStore, LoadError, SaveError, StoreError, StoreResult, UpsertOutcome,
};
pub use store::placement::{FixedPlacement, Placement, RandomPlacement};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
