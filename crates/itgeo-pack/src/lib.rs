//! # itgeo-pack — Deck Packaging
//!
//! Turns an assembled deck into the artifact a study application imports.
//! It provides:
//!
//! - **Templates** ([`templates`]): loads card layout files and the shared
//!   stylesheet from the template directory.
//!
//! - **Model** ([`model`]): the fixed note schema (fields, identity
//!   constants) assembled with the loaded layouts.
//!
//! - **Media** ([`media`]): lists the per-entity images to bundle.
//!
//! - **Archive** ([`archive`]): writes the ZIP container with `deck.json`
//!   and the media entries.
//!
//! ## Data Format
//!
//! `deck.json` is the canonical-JSON serialization of the deck and model,
//! produced via [`CanonicalBytes`](itgeo_core::CanonicalBytes), so its
//! bytes (and their SHA-256 digest) are reproducible across runs.

pub mod archive;
pub mod error;
pub mod media;
pub mod model;
pub mod templates;

// Re-export primary types.
pub use archive::{DeckArchive, ARCHIVE_FILE, DECK_PAYLOAD_FILE, MEDIA_PREFIX};
pub use error::{PackError, PackResult};
pub use media::MediaSet;
pub use model::{CardLayout, NoteModel, MODEL_ID, MODEL_NAME, NOTE_FIELDS, REQUIRED_LAYOUTS};
pub use templates::{TemplateBody, TemplateSet, FRONT_BACK_SEPARATOR, STYLESHEET_FILE};
