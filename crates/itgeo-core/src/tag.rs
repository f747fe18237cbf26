//! Tag paths for the study-app taxonomy.
//!
//! Every tag in the deck is a colon-delimited path of ASCII segments under
//! the `itgeo` namespace, e.g. `itgeo:NUTS:ITC11` or `itgeo:region:piemonte`.

use serde::Serialize;

/// Namespace segment leading every tag in the deck.
pub const TAG_NAMESPACE: &str = "itgeo";

/// A hierarchical tag path.
///
/// Tags are stable across runs for unchanged input: a tag built from an
/// ancestor's label changes only when that label changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Tag(String);

impl Tag {
    /// Join segments into a colon-delimited path.
    pub fn path<'a, I>(segments: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Tag(segments.into_iter().collect::<Vec<_>>().join(":"))
    }

    /// The rendered tag path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for a tag with no content at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
