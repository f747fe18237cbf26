//! Media asset listing.
//!
//! The media directory holds one image per entity, named `<code>.png` by
//! convention. Listing does not validate names against the deck; an image
//! for a code with no card simply ships unused, and a card whose image is
//! absent renders with a broken reference in the study application.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{PackError, PackResult};

/// The media files to bundle, sorted by path for determinism.
#[derive(Debug, Clone)]
pub struct MediaSet {
    files: Vec<PathBuf>,
}

impl MediaSet {
    /// List every regular file directly inside `dir` (no recursion).
    ///
    /// # Errors
    ///
    /// Fatal when the directory is missing or holds no files.
    pub fn scan(dir: &Path) -> PackResult<Self> {
        let entries = fs::read_dir(dir).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                PackError::MediaDirNotFound {
                    path: dir.to_path_buf(),
                }
            } else {
                PackError::Io(e)
            }
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        if files.is_empty() {
            return Err(PackError::NoMedia {
                path: dir.to_path_buf(),
            });
        }
        files.sort();
        Ok(Self { files })
    }

    /// The listed files, sorted.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
