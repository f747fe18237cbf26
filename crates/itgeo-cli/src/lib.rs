//! # itgeo-cli — CLI Tool for the Deck Toolchain
//!
//! Provides the `itgeo` command-line interface over `itgeo-core` and
//! `itgeo-pack`.
//!
//! ## Subcommands
//!
//! - `itgeo build` — Derive the deck and write the archive plus statistics.
//! - `itgeo validate` — Load and validate the entity table, write nothing.
//! - `itgeo readme` — Render the README from the statistics record.
//!
//! ## Project Layout
//!
//! Commands run against a deck project rooted at the directory holding
//! `data/` and `templates/`:
//!
//! ```bash
//! itgeo build
//! itgeo validate --data data/entities.csv
//! itgeo readme > README.md
//! ```

pub mod build;
pub mod readme;
pub mod validate;

use std::path::{Path, PathBuf};

/// Default entity table path, relative to the project root.
pub const DEFAULT_DATA_FILE: &str = "data/entities.csv";

/// Default template directory, relative to the project root.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default media directory, relative to the project root.
pub const DEFAULT_MEDIA_DIR: &str = "media";

/// Default output directory, relative to the project root.
pub const DEFAULT_OUT_DIR: &str = "build";

/// File name of the statistics record under the output directory.
pub const BUILDINFO_FILE: &str = "buildinfo.json";

/// File name of the README template inside the template directory.
pub const README_TEMPLATE_FILE: &str = "README.template.md";

/// Resolve a path that may be relative to the project root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `project_root`, uses that. Otherwise returns the
/// path relative to the current directory.
pub fn resolve_path(path: &Path, project_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let root_relative = project_root.join(path);
    if root_relative.exists() {
        root_relative
    } else {
        path.to_path_buf()
    }
}
