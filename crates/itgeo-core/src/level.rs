//! NUTS hierarchy levels.
//!
//! The source table classifies every entity at one of three NUTS levels:
//! level 1 groups regions into macro-areas, level 2 is a region, level 3 is
//! a province. The level drives the card filter (level 1 never becomes a
//! card), the semantic type tag, and the category segment of ancestor tags.

use serde::{Serialize, Serializer};

use crate::tag::{Tag, TAG_NAMESPACE};

/// A NUTS hierarchy level, closed over the three levels the table uses.
///
/// Any other level value is a malformed-input error at table load, so code
/// past the loader never sees an out-of-range level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NutsLevel {
    /// Group of regions (e.g. Nord-Ovest). Excluded from the card set.
    Level1,
    /// Region (e.g. Piemonte).
    Level2,
    /// Province or metropolitan city (e.g. Torino).
    Level3,
}

impl NutsLevel {
    /// All levels, shallowest first.
    pub fn all_levels() -> &'static [NutsLevel] {
        &[NutsLevel::Level1, NutsLevel::Level2, NutsLevel::Level3]
    }

    /// Parse a numeric level indicator.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Level1),
            2 => Some(Self::Level2),
            3 => Some(Self::Level3),
            _ => None,
        }
    }

    /// The numeric level indicator as it appears in the table.
    pub fn number(self) -> u8 {
        match self {
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
        }
    }

    /// Column-style name, used in diagnostics (`NUTS1`, `NUTS2`, `NUTS3`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Level1 => "NUTS1",
            Self::Level2 => "NUTS2",
            Self::Level3 => "NUTS3",
        }
    }

    /// Semantic type tag for a card at this level.
    ///
    /// Level 1 entities stay out of the active study rotation, so they carry
    /// the suspend marker instead of a type.
    pub fn type_tag(self) -> Tag {
        match self {
            Self::Level1 => Tag::path([TAG_NAMESPACE, "suspend"]),
            Self::Level2 => Tag::path([TAG_NAMESPACE, "type", "region"]),
            Self::Level3 => Tag::path([TAG_NAMESPACE, "type", "province"]),
        }
    }

    /// Category segment used when this level appears as an ancestor in a
    /// tag path (`itgeo:<category>:<slug>`).
    pub fn category_segment(self) -> &'static str {
        match self {
            Self::Level1 => "area",
            Self::Level2 => "region",
            Self::Level3 => "province",
        }
    }
}

impl std::fmt::Display for NutsLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NutsLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}
