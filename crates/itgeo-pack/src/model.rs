//! The note model: field schema, card layouts, identity constants.
//!
//! The model id and field list are fixed. The study application treats the
//! model id as the schema identity, so changing it (or reordering fields)
//! orphans every card rendered under the old schema.

use serde::Serialize;

use crate::error::{PackError, PackResult};
use crate::templates::TemplateSet;

/// Model identity, fixed for the same reason as the deck id.
pub const MODEL_ID: i64 = 1_666_296_128;

/// Display name of the note model.
pub const MODEL_NAME: &str = "Geographical Entity";

/// Field names, in schema order. The first field sorts the card browser.
pub const NOTE_FIELDS: [&str; 5] = ["Label", "Type", "Capital", "Abbreviation", "Map"];

/// Index into [`NOTE_FIELDS`] of the sort field.
pub const SORT_FIELD_INDEX: usize = 0;

/// Layouts the model renders; each needs a template file of the same name.
pub const REQUIRED_LAYOUTS: [&str; 6] = [
    "Label - Map",
    "Map - Label",
    "Abbreviation - Label",
    "Label - Abbreviation",
    "Label - Capital",
    "Capital - Label",
];

/// One card layout: a name and its front/back rendering templates.
#[derive(Debug, Clone, Serialize)]
pub struct CardLayout {
    pub name: String,
    pub front: String,
    pub back: String,
}

/// The complete note model shipped inside the deck payload.
#[derive(Debug, Clone, Serialize)]
pub struct NoteModel {
    id: i64,
    name: String,
    fields: Vec<String>,
    sort_field_index: usize,
    layouts: Vec<CardLayout>,
    stylesheet: String,
}

impl NoteModel {
    /// Assemble the model from loaded templates.
    ///
    /// Layouts keep the order of [`REQUIRED_LAYOUTS`], not the template
    /// directory's file order.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::MissingLayout`] naming the first required
    /// layout without a template.
    pub fn from_templates(templates: &TemplateSet) -> PackResult<Self> {
        let mut layouts = Vec::with_capacity(REQUIRED_LAYOUTS.len());
        for name in REQUIRED_LAYOUTS {
            let body = templates.get(name).ok_or_else(|| PackError::MissingLayout {
                name: name.to_string(),
            })?;
            layouts.push(CardLayout {
                name: name.to_string(),
                front: body.front.clone(),
                back: body.back.clone(),
            });
        }
        Ok(Self {
            id: MODEL_ID,
            name: MODEL_NAME.to_string(),
            fields: NOTE_FIELDS.iter().map(|f| f.to_string()).collect(),
            sort_field_index: SORT_FIELD_INDEX,
            layouts,
            stylesheet: templates.stylesheet().to_string(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn layouts(&self) -> &[CardLayout] {
        &self.layouts
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }
}
