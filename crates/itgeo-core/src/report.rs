//! Aggregate statistics for one build.
//!
//! [`BuildInfo`] is written next to the packaged deck as `buildinfo.json`
//! and read back by the README renderer, so it derives both `Serialize`
//! and `Deserialize`. Field declaration order is the wire order.

use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::entity::EntityRow;
use crate::level::NutsLevel;

/// Statistics over one assembled deck and its source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Total source rows, all levels, suppressed included.
    pub entities: usize,
    /// Source rows at NUTS level 2.
    pub nuts2: usize,
    /// Source rows at NUTS level 3.
    pub nuts3: usize,
    /// Notes retained in the deck.
    pub notes: usize,
    /// Distinct non-empty tags across all notes.
    pub tags: usize,
    /// Media assets bundled into the archive.
    pub media: usize,
}

impl BuildInfo {
    /// Aggregate the counts for one build.
    pub fn collect(rows: &[EntityRow], deck: &Deck, media_count: usize) -> Self {
        let level_rows = |level: NutsLevel| rows.iter().filter(|r| r.level() == level).count();
        Self {
            entities: rows.len(),
            nuts2: level_rows(NutsLevel::Level2),
            nuts3: level_rows(NutsLevel::Level3),
            notes: deck.note_count(),
            tags: deck.distinct_tag_count(),
            media: media_count,
        }
    }
}
