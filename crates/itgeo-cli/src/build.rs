//! # Build Subcommand
//!
//! Derives the deck from the entity table and packages it: loads and
//! validates the rows, assembles the notes, loads templates and media, and
//! writes `itgeo.deck` plus `buildinfo.json` under the output directory.
//!
//! ## Usage
//!
//! ```bash
//! # Build with the standard project layout:
//! itgeo build
//!
//! # Build from an alternative table into an alternative directory:
//! itgeo build --data fixtures/mini.csv --out-dir dist
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use itgeo_core::{load_entities, AncestorOverrides, BuildInfo, Deck, EntityIndex};
use itgeo_pack::{DeckArchive, MediaSet, NoteModel, TemplateSet, ARCHIVE_FILE};

use crate::{
    resolve_path, BUILDINFO_FILE, DEFAULT_DATA_FILE, DEFAULT_MEDIA_DIR, DEFAULT_OUT_DIR,
    DEFAULT_TEMPLATES_DIR,
};

/// Arguments for the build subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the entity table (default: data/entities.csv).
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Template directory (default: templates/).
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Media directory (default: media/).
    #[arg(long)]
    pub media: Option<PathBuf>,

    /// Output directory (default: build/).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs, project_root: &Path) -> Result<u8> {
    let data_path = input_path(args.data.as_deref(), DEFAULT_DATA_FILE, project_root);
    let templates_dir = input_path(args.templates.as_deref(), DEFAULT_TEMPLATES_DIR, project_root);
    let media_dir = input_path(args.media.as_deref(), DEFAULT_MEDIA_DIR, project_root);
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| project_root.join(DEFAULT_OUT_DIR));

    let rows = load_entities(&data_path)
        .with_context(|| format!("failed to load entity table: {}", data_path.display()))?;
    tracing::info!(rows = rows.len(), "loaded entity table");

    let index = EntityIndex::build(&rows, AncestorOverrides::default())
        .context("entity table failed integrity validation")?;
    let deck = Deck::assemble(&index).context("failed to assemble deck")?;
    tracing::info!(notes = deck.note_count(), "assembled deck");

    let templates = TemplateSet::load(&templates_dir)
        .with_context(|| format!("failed to load templates: {}", templates_dir.display()))?;
    let model = NoteModel::from_templates(&templates).context("failed to assemble note model")?;
    let media = MediaSet::scan(&media_dir)
        .with_context(|| format!("failed to list media: {}", media_dir.display()))?;
    tracing::info!(layouts = templates.len(), media = media.len(), "loaded resources");

    let info = BuildInfo::collect(&rows, &deck, media.len());

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let archive_path = out_dir.join(ARCHIVE_FILE);
    let archive = DeckArchive::new(&deck, &model, &media);
    let digest = archive
        .write_to(&archive_path)
        .with_context(|| format!("failed to write deck archive: {}", archive_path.display()))?;

    let buildinfo_path = out_dir.join(BUILDINFO_FILE);
    let record =
        serde_json::to_string_pretty(&info).context("failed to serialize build statistics")?;
    fs::write(&buildinfo_path, record)
        .with_context(|| format!("failed to write build statistics: {}", buildinfo_path.display()))?;

    println!("  entities: {}", info.entities);
    println!("  notes:    {}", info.notes);
    println!("  tags:     {}", info.tags);
    println!("  media:    {}", info.media);
    println!("  archive:  {}", archive_path.display());
    println!("  digest:   {digest}");
    println!("  stats:    {}", buildinfo_path.display());

    Ok(0)
}

fn input_path(arg: Option<&Path>, default: &str, project_root: &Path) -> PathBuf {
    match arg {
        Some(path) => resolve_path(path, project_root),
        None => project_root.join(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itgeo_pack::{DECK_PAYLOAD_FILE, REQUIRED_LAYOUTS, STYLESHEET_FILE};
    use std::fs::File;
    use std::io::Read;

    const TABLE: &str = "\
Label,Type,NUTS Level,NUTS1,NUTS2,NUTS3,Capital,Abbreviation
Nord-Ovest,Gruppo di regioni,1,ITC,,,,
Piemonte,Regione a statuto ordinario,2,ITC,ITC1,,Torino,
Torino,Città metropolitana,3,ITC,ITC1,ITC11,Torino,TO
Carbonia-Iglesias,Provincia soppressa,3,ITC,ITC1,ITC19,Carbonia,CI
";

    fn project_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("data/entities.csv"), TABLE).unwrap();

        fs::create_dir_all(root.join("templates")).unwrap();
        for name in REQUIRED_LAYOUTS {
            fs::write(
                root.join("templates").join(format!("{name}.html")),
                "{{Label}}\n--\n{{Map}}",
            )
            .unwrap();
        }
        fs::write(root.join("templates").join(STYLESHEET_FILE), ".card { }").unwrap();

        fs::create_dir_all(root.join("media")).unwrap();
        fs::write(root.join("media/ITC1.png"), b"png").unwrap();
        fs::write(root.join("media/ITC11.png"), b"png").unwrap();
        dir
    }

    fn no_args() -> BuildArgs {
        BuildArgs {
            data: None,
            templates: None,
            media: None,
            out_dir: None,
        }
    }

    #[test]
    fn run_build_writes_archive_and_statistics() {
        let dir = project_dir();
        let code = run_build(&no_args(), dir.path()).unwrap();
        assert_eq!(code, 0);

        let archive_path = dir.path().join("build").join(ARCHIVE_FILE);
        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut payload = String::new();
        archive
            .by_name(DECK_PAYLOAD_FILE)
            .unwrap()
            .read_to_string(&mut payload)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["deck"]["notes"].as_array().unwrap().len(), 2);

        let record = fs::read_to_string(dir.path().join("build").join(BUILDINFO_FILE)).unwrap();
        let info: itgeo_core::BuildInfo = serde_json::from_str(&record).unwrap();
        assert_eq!(info.entities, 4);
        assert_eq!(info.notes, 2);
        assert_eq!(info.media, 2);
    }

    #[test]
    fn run_build_honours_out_dir() {
        let dir = project_dir();
        let out = dir.path().join("dist");
        let args = BuildArgs {
            out_dir: Some(out.clone()),
            ..no_args()
        };
        run_build(&args, dir.path()).unwrap();
        assert!(out.join(ARCHIVE_FILE).is_file());
        assert!(out.join(BUILDINFO_FILE).is_file());
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn run_build_fails_without_table() {
        let dir = project_dir();
        fs::remove_file(dir.path().join("data/entities.csv")).unwrap();
        let err = run_build(&no_args(), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("entity table"));
    }

    #[test]
    fn run_build_fails_on_integrity_defect() {
        let dir = project_dir();
        let mut table = TABLE.to_string();
        table.push_str("Piemonte bis,Regione a statuto ordinario,2,ITC,ITC1,,Torino,\n");
        fs::write(dir.path().join("data/entities.csv"), table).unwrap();

        let err = run_build(&no_args(), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate NUTS2 code ITC1"));
    }
}
