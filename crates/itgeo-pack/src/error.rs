//! Error types for deck packaging.
//!
//! Packaging consumes resources an author maintains by hand (template
//! files, media assets), so every missing-resource error names the path or
//! layout the author needs to create.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading packaging resources or writing the
/// archive.
#[derive(Debug, Error)]
pub enum PackError {
    /// The template directory does not exist.
    #[error("template directory not found: {path}")]
    TemplateDirNotFound { path: PathBuf },

    /// The template directory contains no layout files.
    #[error("no card layout templates (*.html) in {path}")]
    NoTemplates { path: PathBuf },

    /// A layout file has no front/back separator line.
    #[error("template {name:?} is missing the front/back separator")]
    MissingSeparator { name: String },

    /// The shared stylesheet does not exist.
    #[error("stylesheet not found: {path}")]
    StylesheetNotFound { path: PathBuf },

    /// A layout the note model requires has no template file.
    #[error("required card layout {name:?} has no template")]
    MissingLayout { name: String },

    /// The media directory does not exist.
    #[error("media directory not found: {path}")]
    MediaDirNotFound { path: PathBuf },

    /// The media directory contains no files.
    #[error("no media assets in {path}")]
    NoMedia { path: PathBuf },

    /// Canonical serialization of the deck payload failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] itgeo_core::CanonicalizationError),

    /// The zip writer failed.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for packaging operations.
pub type PackResult<T> = Result<T, PackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_separator_display() {
        let err = PackError::MissingSeparator {
            name: "Label - Map".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "template \"Label - Map\" is missing the front/back separator"
        );
    }

    #[test]
    fn missing_layout_display() {
        let err = PackError::MissingLayout {
            name: "Capital - Label".to_string(),
        };
        assert!(format!("{err}").contains("Capital - Label"));
    }

    #[test]
    fn no_media_display() {
        let err = PackError::NoMedia {
            path: PathBuf::from("media"),
        };
        assert_eq!(format!("{err}"), "no media assets in media");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = PackError::from(io_err);
        assert!(format!("{err}").contains("access denied"));
    }
}
