//! Card identity and tag derivation.
//!
//! A note's guid is a SHA-256 over a domain prefix and the entity's own
//! code, nothing else. Labels, capitals and types can all be corrected in
//! the source table without minting new cards, so study progress tracked
//! against the guid survives regeneration. The code is the one column that
//! must stay stable.

use serde::Serialize;

use crate::digest::Sha256Accumulator;
use crate::entity::{EntityRow, NutsCode};
use crate::error::CoreResult;
use crate::index::EntityIndex;
use crate::level::NutsLevel;
use crate::tag::{Tag, TAG_NAMESPACE};

/// Domain prefix for note guid hashing, versioned so a future identity
/// scheme change cannot collide with existing guids.
const GUID_DOMAIN: &[u8] = b"itgeo-note-v1\0";

/// Stable note identity, hex SHA-256 of the domain-prefixed entity code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoteGuid(String);

impl NoteGuid {
    /// Derive the guid for an entity's own code.
    pub fn derive(code: &NutsCode) -> Self {
        let mut acc = Sha256Accumulator::new();
        acc.update(GUID_DOMAIN);
        acc.update(code.as_str().as_bytes());
        Self(acc.finalize_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NoteGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five display fields of one card, keyed by the note model's field
/// names.
#[derive(Debug, Clone, Serialize)]
pub struct NoteFields {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Type")]
    pub entity_type: String,
    #[serde(rename = "Capital")]
    pub capital: String,
    #[serde(rename = "Abbreviation")]
    pub abbreviation: String,
    #[serde(rename = "Map")]
    pub map: String,
}

/// Media asset name for an entity, `<code>.png`.
pub fn media_file_name(code: &NutsCode) -> String {
    format!("{code}.png")
}

/// One assembled note: identity, level, display fields and tags.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    guid: NoteGuid,
    level: NutsLevel,
    fields: NoteFields,
    tags: Vec<Tag>,
}

impl Note {
    pub fn guid(&self) -> &NoteGuid {
        &self.guid
    }

    pub fn level(&self) -> NutsLevel {
        self.level
    }

    pub fn fields(&self) -> &NoteFields {
        &self.fields
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// The full tag set for one row, in rendering order: own code, semantic
/// type, then ancestors from the nearest level up.
pub fn build_tags(row: &EntityRow, index: &EntityIndex<'_>) -> CoreResult<Vec<Tag>> {
    let mut tags = vec![
        Tag::path([TAG_NAMESPACE, "NUTS", row.own_code().as_str()]),
        row.level().type_tag(),
    ];
    for level in [NutsLevel::Level2, NutsLevel::Level1] {
        if let Some(code) = row.ancestor_code(level) {
            tags.push(index.ancestor_tag(level, code)?);
        }
    }
    Ok(tags)
}

/// Assemble the note for one row: guid from the own code, fields copied
/// from the row, the map field pointing at the row's media asset.
pub fn build_note(row: &EntityRow, index: &EntityIndex<'_>) -> CoreResult<Note> {
    let tags = build_tags(row, index)?;
    Ok(Note {
        guid: NoteGuid::derive(row.own_code()),
        level: row.level(),
        fields: NoteFields {
            label: row.label().to_string(),
            entity_type: row.entity_type().to_string(),
            capital: row.capital().to_string(),
            abbreviation: row.abbreviation().to_string(),
            map: format!("<img src=\"{}\">", media_file_name(row.own_code())),
        },
        tags,
    })
}
