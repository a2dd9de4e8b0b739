//! Media import into the managed media directory.
//!
//! # Responsibility
//! - Classify a user-selected file as image or video by extension.
//! - Copy it under a collision-resistant generated name.
//!
//! # Invariants
//! - Only the fixed extension sets below are accepted.
//! - Returned relative paths always use `/` and start with the media dir.
//! - The file picker itself is owned by the caller.

use crate::model::astro::MediaType;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
pub const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "webm", "ogg", "mov", "avi", "mkv"];

static UNSAFE_FILE_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_.\-]").expect("valid file name regex"));

/// Media import failures.
#[derive(Debug)]
pub enum MediaError {
    /// Extension (lower-cased, with leading dot, or empty) is not supported.
    UnsupportedType { extension: String },
    MissingFileName,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for MediaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType { extension } => {
                write!(f, "unsupported media file type: `{extension}`")
            }
            Self::MissingFileName => write!(f, "selected media path has no file name"),
            Self::Io { path, source } => {
                write!(f, "media i/o error at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for MediaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result of a successful import, ready to store on an astro record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaImport {
    pub relative_path: String,
    pub original_name: String,
    pub media_type: MediaType,
}

/// Maps a bare extension (no dot, any case) to a media type.
pub fn media_type_for_extension(extension: &str) -> Option<MediaType> {
    let lowered = extension.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&lowered.as_str()) {
        Some(MediaType::Image)
    } else if VIDEO_EXTENSIONS.contains(&lowered.as_str()) {
        Some(MediaType::Video)
    } else {
        None
    }
}

/// Builds `<millis>_<kind>_<safe stem><.ext>` for an original file name.
pub fn generated_file_name(
    timestamp_ms: i64,
    media_type: MediaType,
    original_name: &str,
) -> String {
    let path = Path::new(original_name);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_ascii_lowercase()))
        .unwrap_or_default();
    let safe_stem = UNSAFE_FILE_CHAR_RE.replace_all(&stem, "_");
    format!(
        "{timestamp_ms}_{}_{safe_stem}{extension}",
        media_type.as_str()
    )
}

/// Managed media directory under one application root.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
    media_dir: String,
}

impl MediaLibrary {
    pub fn new(root: impl Into<PathBuf>, media_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            media_dir: media_dir.into(),
        }
    }

    pub fn directory(&self) -> PathBuf {
        self.root.join(&self.media_dir)
    }

    /// Copies `source` into the media directory.
    ///
    /// # Errors
    /// - `MissingFileName` when `source` has no final component.
    /// - `UnsupportedType` for extensions outside the image/video sets.
    /// - `Io` when the directory cannot be created or the copy fails.
    pub fn import(&self, source: &Path) -> Result<MediaImport, MediaError> {
        let started_at = Instant::now();
        let original_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or(MediaError::MissingFileName)?;
        let bare_extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type_for_extension(&bare_extension).ok_or_else(|| {
            MediaError::UnsupportedType {
                extension: if bare_extension.is_empty() {
                    String::new()
                } else {
                    format!(".{}", bare_extension.to_ascii_lowercase())
                },
            }
        })?;

        let directory = self.directory();
        if !directory.exists() {
            std::fs::create_dir_all(&directory).map_err(|source| MediaError::Io {
                path: directory.clone(),
                source,
            })?;
            info!(
                "event=media_dir_create module=media status=ok path={}",
                directory.display()
            );
        }

        let file_name = generated_file_name(
            chrono::Utc::now().timestamp_millis(),
            media_type,
            &original_name,
        );
        let destination = directory.join(&file_name);
        if let Err(source) = std::fs::copy(source, &destination) {
            error!(
                "event=media_import module=media status=error duration_ms={} error_code=copy_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            return Err(MediaError::Io {
                path: destination,
                source,
            });
        }

        let relative_path = format!("{}/{}", self.media_dir.trim_end_matches('/'), file_name);
        info!(
            "event=media_import module=media status=ok duration_ms={} media_type={} path={}",
            started_at.elapsed().as_millis(),
            media_type.as_str(),
            relative_path
        );
        Ok(MediaImport {
            relative_path,
            original_name,
            media_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{generated_file_name, media_type_for_extension};
    use crate::model::astro::MediaType;

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(media_type_for_extension("PNG"), Some(MediaType::Image));
        assert_eq!(media_type_for_extension("mkv"), Some(MediaType::Video));
        assert_eq!(media_type_for_extension("txt"), None);
        assert_eq!(media_type_for_extension(""), None);
    }

    #[test]
    fn generated_name_sanitizes_stem_and_lowercases_extension() {
        let name = generated_file_name(1_700_000_000_000, MediaType::Image, "Nébula shot (1).PNG");
        assert_eq!(name, "1700000000000_image_N_bula_shot__1_.png");
    }

    #[test]
    fn generated_name_keeps_inner_dots() {
        let name = generated_file_name(42, MediaType::Video, "orbit.v2.mp4");
        assert_eq!(name, "42_video_orbit.v2.mp4");
    }
}
