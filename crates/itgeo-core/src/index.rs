//! Read-only lookup over the validated entity table.
//!
//! [`EntityIndex`] is built once from the loaded rows and answers
//! `(level, code)` lookups for ancestor resolution. Building it validates
//! the table as a whole: codes are unique within their level, and every
//! ancestor reference resolves, either to a row in the table or to a fixed
//! tag in [`AncestorOverrides`].
//!
//! Overrides exist for hierarchy gaps carried by the source data. The
//! stock table has no rows for the NUTS2 autonomous provinces' parent
//! entities `ITH1` and `ITH2`, so both map to the shared region tag for
//! Trentino-Alto Adige.

use std::collections::BTreeMap;

use crate::entity::{EntityRow, NutsCode};
use crate::error::{CoreError, CoreResult};
use crate::level::NutsLevel;
use crate::slug::slugify;
use crate::tag::{Tag, TAG_NAMESPACE};

/// Fixed tags for ancestor codes that have no row of their own.
///
/// An override is consulted before the table: when a code is listed here,
/// its tag is used verbatim and no row lookup happens.
#[derive(Debug, Clone)]
pub struct AncestorOverrides {
    fixed: BTreeMap<String, Tag>,
}

impl AncestorOverrides {
    /// No overrides; every ancestor code must resolve through the table.
    pub fn empty() -> Self {
        Self {
            fixed: BTreeMap::new(),
        }
    }

    /// Map each code in `codes` to the same fixed tag.
    pub fn with_fixed_tag<I, S>(mut self, codes: I, tag: Tag) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for code in codes {
            self.fixed.insert(code.into(), tag.clone());
        }
        self
    }

    /// The fixed tag for `code`, if one is configured.
    pub fn fixed_tag(&self, code: &NutsCode) -> Option<&Tag> {
        self.fixed.get(code.as_str())
    }
}

impl Default for AncestorOverrides {
    /// The overrides for the stock Italian table: `ITH1` (Bolzano) and
    /// `ITH2` (Trento) share the Trentino-Alto Adige region tag.
    fn default() -> Self {
        Self::empty().with_fixed_tag(
            ["ITH1", "ITH2"],
            Tag::path([TAG_NAMESPACE, "region", "trentino-alto-adige"]),
        )
    }
}

/// Exact-match `(level, code)` index over a slice of entity rows.
#[derive(Debug)]
pub struct EntityIndex<'a> {
    rows: &'a [EntityRow],
    by_code: BTreeMap<NutsLevel, BTreeMap<String, usize>>,
    overrides: AncestorOverrides,
}

impl<'a> EntityIndex<'a> {
    /// Index `rows` and validate table-wide integrity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateCode`] when two rows share a code at
    /// the same level, and [`CoreError::AncestorNotFound`] when a row names
    /// an ancestor that neither the table nor `overrides` can resolve.
    pub fn build(rows: &'a [EntityRow], overrides: AncestorOverrides) -> CoreResult<Self> {
        let mut by_code: BTreeMap<NutsLevel, BTreeMap<String, usize>> = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            let slot = by_code
                .entry(row.level())
                .or_default()
                .insert(row.own_code().as_str().to_string(), i);
            if slot.is_some() {
                return Err(CoreError::DuplicateCode {
                    level: row.level(),
                    code: row.own_code().clone(),
                });
            }
        }

        let index = Self {
            rows,
            by_code,
            overrides,
        };
        for row in rows {
            for level in [NutsLevel::Level1, NutsLevel::Level2] {
                let Some(code) = row.ancestor_code(level) else {
                    continue;
                };
                if index.overrides.fixed_tag(code).is_none()
                    && index.lookup(level, code).is_none()
                {
                    return Err(CoreError::AncestorNotFound {
                        level,
                        code: code.clone(),
                    });
                }
            }
        }
        Ok(index)
    }

    /// All indexed rows, in table order.
    pub fn rows(&self) -> &'a [EntityRow] {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row whose own code at `level` is exactly `code`.
    pub fn lookup(&self, level: NutsLevel, code: &NutsCode) -> Option<&'a EntityRow> {
        self.by_code
            .get(&level)?
            .get(code.as_str())
            .map(|&i| &self.rows[i])
    }

    /// The hierarchy tag contributed by the ancestor `code` at `level`.
    ///
    /// Overrides win; otherwise the ancestor row's label is slugified into
    /// `itgeo:<category>:<slug>`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AncestorNotFound`] for an unresolvable code and
    /// [`CoreError::EmptySlug`] when the ancestor's label slugifies to
    /// nothing.
    pub fn ancestor_tag(&self, level: NutsLevel, code: &NutsCode) -> CoreResult<Tag> {
        if let Some(tag) = self.overrides.fixed_tag(code) {
            return Ok(tag.clone());
        }
        let row = self
            .lookup(level, code)
            .ok_or_else(|| CoreError::AncestorNotFound {
                level,
                code: code.clone(),
            })?;
        let slug = slugify(row.label());
        if slug.is_empty() {
            return Err(CoreError::EmptySlug {
                label: row.label().to_string(),
            });
        }
        Ok(Tag::path([TAG_NAMESPACE, level.category_segment(), &slug]))
    }
}
