//! Fixed store configuration.
//!
//! # Responsibility
//! - Hold the compile-time locations of the catalog document and media folder.
//! - Describe the starmap canvas used when placing new astros.
//!
//! # Invariants
//! - Paths are relative to the file provider root.
//! - There is no environment or file based override; tests build configs directly.

/// Relative path of the catalog JSON document.
pub const DATA_FILE_NAME: &str = "data.json";
/// Relative directory that receives imported media assets.
pub const MEDIA_DIR_NAME: &str = "media";
/// Default starmap canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Default starmap canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Pixel bounds of the starmap canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub width: u32,
    pub height: u32,
}

impl CanvasBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// Location and placement settings for one astro store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Catalog document path, relative to the provider root.
    pub data_file: String,
    /// Media directory path, relative to the provider root.
    pub media_dir: String,
    /// Bounds used for coordinates of astros that have none.
    pub canvas: CanvasBounds,
}

impl StoreConfig {
    /// Returns a config that keeps the default media dir and canvas but
    /// points at another catalog document.
    pub fn with_data_file(data_file: impl Into<String>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: DATA_FILE_NAME.to_string(),
            media_dir: MEDIA_DIR_NAME.to_string(),
            canvas: CanvasBounds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasBounds, StoreConfig};

    #[test]
    fn default_config_uses_fixed_locations() {
        let config = StoreConfig::default();
        assert_eq!(config.data_file, "data.json");
        assert_eq!(config.media_dir, "media");
        assert_eq!(config.canvas, CanvasBounds::new(800, 600));
    }

    #[test]
    fn with_data_file_keeps_other_defaults() {
        let config = StoreConfig::with_data_file("catalog/astros.json");
        assert_eq!(config.data_file, "catalog/astros.json");
        assert_eq!(config.media_dir, "media");
    }
}
