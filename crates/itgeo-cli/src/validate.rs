//! # Validate Subcommand
//!
//! Loads the entity table, builds the index and assembles the deck in
//! memory, writing no artifacts. Useful as a pre-commit check on table
//! edits: every integrity defect the build would hit is reported here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use itgeo_core::{load_entities, AncestorOverrides, Deck, EntityIndex, NutsLevel};

use crate::{resolve_path, DEFAULT_DATA_FILE};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the entity table (default: data/entities.csv).
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, project_root: &Path) -> Result<u8> {
    let data_path = match args.data.as_deref() {
        Some(path) => resolve_path(path, project_root),
        None => project_root.join(DEFAULT_DATA_FILE),
    };

    let rows = load_entities(&data_path)
        .with_context(|| format!("failed to load entity table: {}", data_path.display()))?;
    let index = EntityIndex::build(&rows, AncestorOverrides::default())
        .context("entity table failed integrity validation")?;
    let deck = Deck::assemble(&index).context("failed to assemble deck")?;

    println!("  entities:  {}", rows.len());
    println!("  regions:   {}", deck.level_count(NutsLevel::Level2));
    println!("  provinces: {}", deck.level_count(NutsLevel::Level3));
    println!("  notes:     {}", deck.note_count());
    println!("  tags:      {}", deck.distinct_tag_count());
    println!();
    println!("entity table OK: {}", data_path.display());

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TABLE: &str = "\
Label,Type,NUTS Level,NUTS1,NUTS2,NUTS3,Capital,Abbreviation
Nord-Ovest,Gruppo di regioni,1,ITC,,,,
Piemonte,Regione a statuto ordinario,2,ITC,ITC1,,Torino,
Torino,Città metropolitana,3,ITC,ITC1,ITC11,Torino,TO
";

    #[test]
    fn run_validate_accepts_well_formed_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/entities.csv"), TABLE).unwrap();

        let args = ValidateArgs { data: None };
        assert_eq!(run_validate(&args, dir.path()).unwrap(), 0);
    }

    #[test]
    fn run_validate_reports_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs { data: None };
        let err = run_validate(&args, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("entities.csv"));
    }

    #[test]
    fn run_validate_reports_dangling_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let table = "Label,Type,NUTS Level,NUTS1,NUTS2,NUTS3,Capital,Abbreviation\n\
                     Piemonte,Regione a statuto ordinario,2,ITC,ITC1,,Torino,\n";
        let path = dir.path().join("entities.csv");
        fs::write(&path, table).unwrap();

        let args = ValidateArgs { data: Some(path) };
        let err = run_validate(&args, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no NUTS1 entity with code ITC"));
    }

    #[test]
    fn run_validate_honours_explicit_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.csv");
        fs::write(&path, TABLE).unwrap();

        let args = ValidateArgs { data: Some(path) };
        assert_eq!(run_validate(&args, dir.path()).unwrap(), 0);
    }
}
