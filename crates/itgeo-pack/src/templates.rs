//! Card layout templates and the shared stylesheet.
//!
//! Each `*.html` file in the template directory is one layout: the file
//! stem is the layout name, the content splits on the first separator line
//! into front and back. Both halves are opaque text to this crate; the
//! study application interprets the field placeholders inside them.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PackError, PackResult};

/// File name of the shared stylesheet inside the template directory.
pub const STYLESHEET_FILE: &str = "style.css";

/// Separator between a template's front and back halves.
pub const FRONT_BACK_SEPARATOR: &str = "\n--\n";

/// Front and back of one card layout.
#[derive(Debug, Clone)]
pub struct TemplateBody {
    pub front: String,
    pub back: String,
}

/// All layouts found in one template directory, plus the stylesheet.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    layouts: BTreeMap<String, TemplateBody>,
    stylesheet: String,
}

impl TemplateSet {
    /// Load every layout and the stylesheet from `dir`.
    ///
    /// # Errors
    ///
    /// Fatal when the directory is missing, holds no `*.html` files, a
    /// template lacks the separator, or `style.css` is absent.
    pub fn load(dir: &Path) -> PackResult<Self> {
        let entries = fs::read_dir(dir).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                PackError::TemplateDirNotFound {
                    path: dir.to_path_buf(),
                }
            } else {
                PackError::Io(e)
            }
        })?;

        let mut layouts = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(OsStr::to_str) != Some("html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            let text = fs::read_to_string(&path)?;
            let Some((front, back)) = text.split_once(FRONT_BACK_SEPARATOR) else {
                return Err(PackError::MissingSeparator {
                    name: name.to_string(),
                });
            };
            layouts.insert(
                name.to_string(),
                TemplateBody {
                    front: front.to_string(),
                    back: back.to_string(),
                },
            );
        }
        if layouts.is_empty() {
            return Err(PackError::NoTemplates {
                path: dir.to_path_buf(),
            });
        }

        let stylesheet_path = dir.join(STYLESHEET_FILE);
        let stylesheet = fs::read_to_string(&stylesheet_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                PackError::StylesheetNotFound {
                    path: stylesheet_path.clone(),
                }
            } else {
                PackError::Io(e)
            }
        })?;

        Ok(Self { layouts, stylesheet })
    }

    /// The layout named `name`, if a template file supplied it.
    pub fn get(&self, name: &str) -> Option<&TemplateBody> {
        self.layouts.get(name)
    }

    /// All layout names, sorted.
    pub fn layout_names(&self) -> Vec<&str> {
        self.layouts.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }
}
