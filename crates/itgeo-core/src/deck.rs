//! Deck assembly: filtering rules, note accumulation, duplicate defense.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::card::{build_note, Note, NoteGuid};
use crate::error::{CoreError, CoreResult};
use crate::index::EntityIndex;
use crate::level::NutsLevel;
use crate::tag::Tag;

/// Deck identity, fixed so regenerated decks replace rather than duplicate
/// an installed copy.
pub const DECK_ID: i64 = 1_753_847_914;

/// Display name of the deck.
pub const DECK_NAME: &str = "Geografia d'Italia";

/// The assembled deck: identity constants plus the retained notes.
#[derive(Debug, Serialize)]
pub struct Deck {
    id: i64,
    name: String,
    notes: Vec<Note>,
    #[serde(skip)]
    seen: BTreeSet<NoteGuid>,
}

impl Deck {
    /// An empty deck with the fixed identity constants.
    pub fn new() -> Self {
        Self {
            id: DECK_ID,
            name: DECK_NAME.to_string(),
            notes: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    /// Build the deck from every retained row of the table.
    ///
    /// Level 1 rows (groups of regions) and suppressed provinces are
    /// skipped; everything else becomes exactly one note, in table order.
    pub fn assemble(index: &EntityIndex<'_>) -> CoreResult<Self> {
        let mut deck = Self::new();
        for row in index.rows() {
            if row.level() == NutsLevel::Level1 || row.is_suppressed() {
                continue;
            }
            deck.push(build_note(row, index)?)?;
        }
        Ok(deck)
    }

    /// Append a note, rejecting duplicate identities.
    ///
    /// Same-level code duplicates are caught at index build; this guards
    /// the remaining case of one code string reused across levels.
    pub fn push(&mut self, note: Note) -> CoreResult<()> {
        if !self.seen.insert(note.guid().clone()) {
            return Err(CoreError::DuplicateGuid {
                guid: note.guid().to_string(),
                label: note.fields().label.clone(),
            });
        }
        self.notes.push(note);
        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The retained notes, in table order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Notes whose source row sat at `level`.
    pub fn level_count(&self, level: NutsLevel) -> usize {
        self.notes.iter().filter(|n| n.level() == level).count()
    }

    /// Distinct non-empty tags across all notes.
    pub fn distinct_tag_count(&self) -> usize {
        self.notes
            .iter()
            .flat_map(Note::tags)
            .filter(|t| !t.is_empty())
            .map(Tag::as_str)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
