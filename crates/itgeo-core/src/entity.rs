//! The entity table: validated rows and the CSV loader.
//!
//! Source data is one CSV file with a header row and the columns `Label`,
//! `Type`, `NUTS Level`, `NUTS1`, `NUTS2`, `NUTS3`, `Capital`,
//! `Abbreviation`. Every cell is text; an empty code cell means the row has
//! no code at that level. Loading validates each row up front so the rest of
//! the pipeline works with rows whose shape is already known good:
//!
//! - the level cell parses as 1, 2 or 3;
//! - the row carries a code at its own level and at every shallower level;
//! - code columns deeper than the row's level are empty;
//! - every code is ASCII alphanumeric (codes are matched exactly, so stray
//!   whitespace or punctuation is rejected here rather than surfacing later
//!   as a failed ancestor lookup).

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::level::NutsLevel;

/// The `Type` value marking a decommissioned province, excluded from the deck.
pub const SUPPRESSED_PROVINCE_TYPE: &str = "Provincia soppressa";

/// A NUTS hierarchy code, e.g. `ITC`, `ITC1`, `ITC11`.
///
/// Construction validates the shape; comparison is exact, with no trimming
/// or case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NutsCode(String);

impl NutsCode {
    /// Validate and wrap a code.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCode`] for an empty string or one with
    /// characters outside ASCII alphanumerics.
    pub fn new(code: impl Into<String>) -> CoreResult<Self> {
        let code = code.into();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidCode { code });
        }
        Ok(Self(code))
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NutsCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NutsCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One validated row of the entity table.
///
/// The fields are private because the struct guarantees the code layout for
/// its level: `own_code` is always present, and ancestor codes exist exactly
/// for the levels above the row's own.
#[derive(Debug, Clone)]
pub struct EntityRow {
    label: String,
    entity_type: String,
    level: NutsLevel,
    own_code: NutsCode,
    /// NUTS1 ancestor code; present on level 2 and level 3 rows.
    area_code: Option<NutsCode>,
    /// NUTS2 ancestor code; present on level 3 rows.
    region_code: Option<NutsCode>,
    capital: String,
    abbreviation: String,
}

impl EntityRow {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn level(&self) -> NutsLevel {
        self.level
    }

    /// The code at the row's own level, its identity in the table.
    pub fn own_code(&self) -> &NutsCode {
        &self.own_code
    }

    /// The ancestor code this row carries for `level`, if the row sits
    /// below that level. A level 3 row answers for `Level1` and `Level2`;
    /// a level 2 row only for `Level1`.
    pub fn ancestor_code(&self, level: NutsLevel) -> Option<&NutsCode> {
        match level {
            NutsLevel::Level1 => self.area_code.as_ref(),
            NutsLevel::Level2 => self.region_code.as_ref(),
            NutsLevel::Level3 => None,
        }
    }

    pub fn capital(&self) -> &str {
        &self.capital
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// True for decommissioned provinces kept in the table for reference
    /// but excluded from the deck.
    pub fn is_suppressed(&self) -> bool {
        self.entity_type == SUPPRESSED_PROVINCE_TYPE
    }

    fn from_raw(raw: RawRecord) -> CoreResult<Self> {
        let level = raw
            .level
            .parse::<u8>()
            .ok()
            .and_then(NutsLevel::from_number)
            .ok_or(CoreError::InvalidLevel { value: raw.level })?;

        let nuts1 = parse_code_cell(&raw.nuts1)?;
        let nuts2 = parse_code_cell(&raw.nuts2)?;
        let nuts3 = parse_code_cell(&raw.nuts3)?;

        let require = |code: Option<NutsCode>, at: NutsLevel| {
            code.ok_or_else(|| CoreError::MissingCode {
                level: at,
                label: raw.label.clone(),
            })
        };
        let reject = |code: Option<NutsCode>, at: NutsLevel| match code {
            Some(code) => Err(CoreError::UnexpectedCode {
                level: at,
                code,
                label: raw.label.clone(),
            }),
            None => Ok(()),
        };

        let (own_code, region_code, area_code) = match level {
            NutsLevel::Level1 => {
                reject(nuts2, NutsLevel::Level2)?;
                reject(nuts3, NutsLevel::Level3)?;
                (require(nuts1, NutsLevel::Level1)?, None, None)
            }
            NutsLevel::Level2 => {
                reject(nuts3, NutsLevel::Level3)?;
                (
                    require(nuts2, NutsLevel::Level2)?,
                    None,
                    Some(require(nuts1, NutsLevel::Level1)?),
                )
            }
            NutsLevel::Level3 => (
                require(nuts3, NutsLevel::Level3)?,
                Some(require(nuts2, NutsLevel::Level2)?),
                Some(require(nuts1, NutsLevel::Level1)?),
            ),
        };

        Ok(Self {
            label: raw.label,
            entity_type: raw.entity_type,
            level,
            own_code,
            area_code,
            region_code,
            capital: raw.capital,
            abbreviation: raw.abbreviation,
        })
    }
}

fn parse_code_cell(cell: &str) -> CoreResult<Option<NutsCode>> {
    if cell.is_empty() {
        Ok(None)
    } else {
        NutsCode::new(cell).map(Some)
    }
}

/// Wire shape of one CSV record, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Type")]
    entity_type: String,
    #[serde(rename = "NUTS Level")]
    level: String,
    #[serde(rename = "NUTS1")]
    nuts1: String,
    #[serde(rename = "NUTS2")]
    nuts2: String,
    #[serde(rename = "NUTS3")]
    nuts3: String,
    #[serde(rename = "Capital")]
    capital: String,
    #[serde(rename = "Abbreviation")]
    abbreviation: String,
}

/// Read and validate the entity table from any reader.
///
/// Rows are returned in table order. Each validation failure is wrapped in
/// [`CoreError::Row`] with the 1-based data row number.
pub fn read_entities<R: io::Read>(reader: R) -> CoreResult<Vec<EntityRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (i, record) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = record?;
        let row = EntityRow::from_raw(raw).map_err(|source| CoreError::Row {
            row: i + 1,
            source: Box::new(source),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read and validate the entity table from a file.
pub fn load_entities(path: &Path) -> CoreResult<Vec<EntityRow>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CoreError::TableNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::Io(e)
        }
    })?;
    read_entities(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Label,Type,NUTS Level,NUTS1,NUTS2,NUTS3,Capital,Abbreviation\n";

    fn table(rows: &str) -> String {
        format!("{HEADER}{rows}")
    }

    #[test]
    fn test_nuts_code_accepts_alphanumerics() {
        assert_eq!(NutsCode::new("ITC11").unwrap().as_str(), "ITC11");
        assert_eq!(NutsCode::new("ITH10").unwrap().to_string(), "ITH10");
    }

    #[test]
    fn test_nuts_code_rejects_whitespace_and_empty() {
        assert!(NutsCode::new("").is_err());
        assert!(NutsCode::new(" ITC1").is_err());
        assert!(NutsCode::new("ITC1 ").is_err());
        assert!(NutsCode::new("IT-C1").is_err());
    }

    #[test]
    fn test_reads_level3_row() {
        let csv = table("Torino,Città metropolitana,3,ITC,ITC1,ITC11,Torino,TO\n");
        let rows = read_entities(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.label(), "Torino");
        assert_eq!(row.entity_type(), "Città metropolitana");
        assert_eq!(row.level(), NutsLevel::Level3);
        assert_eq!(row.own_code().as_str(), "ITC11");
        assert_eq!(
            row.ancestor_code(NutsLevel::Level2).map(NutsCode::as_str),
            Some("ITC1")
        );
        assert_eq!(
            row.ancestor_code(NutsLevel::Level1).map(NutsCode::as_str),
            Some("ITC")
        );
        assert_eq!(row.ancestor_code(NutsLevel::Level3), None);
        assert_eq!(row.capital(), "Torino");
        assert_eq!(row.abbreviation(), "TO");
    }

    #[test]
    fn test_reads_level1_row_with_empty_cells() {
        let csv = table("Nord-Ovest,Gruppo di regioni,1,ITC,,,,\n");
        let rows = read_entities(csv.as_bytes()).unwrap();
        let row = &rows[0];
        assert_eq!(row.level(), NutsLevel::Level1);
        assert_eq!(row.own_code().as_str(), "ITC");
        assert_eq!(row.ancestor_code(NutsLevel::Level1), None);
        assert_eq!(row.ancestor_code(NutsLevel::Level2), None);
        assert_eq!(row.capital(), "");
        assert_eq!(row.abbreviation(), "");
    }

    #[test]
    fn test_invalid_level_reports_row_number() {
        let csv = table(
            "Nord-Ovest,Gruppo di regioni,1,ITC,,,,\n\
             Atlantide,Regione,9,XX,XX1,,,\n",
        );
        let err = read_entities(csv.as_bytes()).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("row 2"), "unexpected message: {msg}");
        assert!(msg.contains("invalid NUTS level \"9\""));
    }

    #[test]
    fn test_missing_own_code_rejected() {
        let csv = table("Piemonte,Regione a statuto ordinario,2,ITC,,,Torino,\n");
        let err = read_entities(csv.as_bytes()).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("no NUTS2 code"));
        assert!(msg.contains("Piemonte"));
    }

    #[test]
    fn test_missing_ancestor_code_rejected() {
        let csv = table("Piemonte,Regione a statuto ordinario,2,,ITC1,,Torino,\n");
        let err = read_entities(csv.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("no NUTS1 code"));
    }

    #[test]
    fn test_code_below_own_level_rejected() {
        let csv = table("Piemonte,Regione a statuto ordinario,2,ITC,ITC1,ITC11,Torino,\n");
        let err = read_entities(csv.as_bytes()).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("unexpected NUTS3 code ITC11"));
    }

    #[test]
    fn test_whitespace_in_code_rejected_at_load() {
        let csv = table("Torino,Provincia,3,ITC,ITC1 ,ITC11,Torino,TO\n");
        let err = read_entities(csv.as_bytes()).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("invalid NUTS code \"ITC1 \""));
    }

    #[test]
    fn test_is_suppressed() {
        let csv = table(
            "Carbonia-Iglesias,Provincia soppressa,3,ITG,ITG2,ITG2C,Carbonia,CI\n\
             Torino,Città metropolitana,3,ITC,ITC1,ITC11,Torino,TO\n",
        );
        let rows = read_entities(csv.as_bytes()).unwrap();
        assert!(rows[0].is_suppressed());
        assert!(!rows[1].is_suppressed());
    }

    #[test]
    fn test_load_entities_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("entities.csv");
        let err = load_entities(&missing).unwrap_err();
        assert!(matches!(err, CoreError::TableNotFound { .. }));
    }

    #[test]
    fn test_load_entities_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entities.csv");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", table("Nord-Ovest,Gruppo di regioni,1,ITC,,,,\n")).unwrap();
        drop(file);

        let rows = load_entities(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label(), "Nord-Ovest");
    }
}
