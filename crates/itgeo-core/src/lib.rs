//! # itgeo-core — Deck Derivation Engine
//!
//! This crate turns the Italian NUTS entity table into a flashcard deck:
//! validated rows in, notes with stable identities and hierarchical tags
//! out. It is the leaf of the workspace; `itgeo-pack` and the CLI build on
//! it and it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `NutsCode`, `Tag`,
//!    `NoteGuid` — validated constructors, no bare strings crossing module
//!    boundaries.
//!
//! 2. **`CanonicalBytes` newtype.** ALL digest computation over structured
//!    data flows through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` for digests, so the packaged `deck.json` is
//!    byte-identical across runs.
//!
//! 3. **Closed `NutsLevel` enum.** One definition, three variants,
//!    exhaustive `match` everywhere. The level column is parsed into it at
//!    load and never handled as a bare integer again.
//!
//! 4. **Identity from code alone.** A note's guid hashes only the entity's
//!    own NUTS code, so relabelling a row never orphans study progress.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `itgeo-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod card;
pub mod deck;
pub mod digest;
pub mod entity;
pub mod error;
pub mod index;
pub mod level;
pub mod report;
pub mod slug;
pub mod tag;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use card::{build_note, build_tags, media_file_name, Note, NoteFields, NoteGuid};
pub use deck::{Deck, DECK_ID, DECK_NAME};
pub use digest::{sha256_hex, Sha256Accumulator};
pub use entity::{load_entities, read_entities, EntityRow, NutsCode, SUPPRESSED_PROVINCE_TYPE};
pub use error::{CanonicalizationError, CoreError, CoreResult};
pub use index::{AncestorOverrides, EntityIndex};
pub use level::NutsLevel;
pub use report::BuildInfo;
pub use slug::slugify;
pub use tag::{Tag, TAG_NAMESPACE};
