//! # Readme Subcommand
//!
//! Renders the project README to stdout by substituting build statistics
//! into a text template. The template uses `{key}` placeholders named
//! after the statistics record's keys; `{{` and `}}` escape literal
//! braces.
//!
//! ## Usage
//!
//! ```bash
//! itgeo build
//! itgeo readme > README.md
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use itgeo_core::BuildInfo;

use crate::{
    resolve_path, BUILDINFO_FILE, DEFAULT_OUT_DIR, DEFAULT_TEMPLATES_DIR, README_TEMPLATE_FILE,
};

/// Arguments for the readme subcommand.
#[derive(Args, Debug)]
pub struct ReadmeArgs {
    /// Path to the statistics record (default: build/buildinfo.json).
    #[arg(long)]
    pub buildinfo: Option<PathBuf>,

    /// Path to the README template (default: templates/README.template.md).
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// Execute the readme subcommand.
pub fn run_readme(args: &ReadmeArgs, project_root: &Path) -> Result<u8> {
    let buildinfo_path = match args.buildinfo.as_deref() {
        Some(path) => resolve_path(path, project_root),
        None => project_root.join(DEFAULT_OUT_DIR).join(BUILDINFO_FILE),
    };
    let template_path = match args.template.as_deref() {
        Some(path) => resolve_path(path, project_root),
        None => project_root
            .join(DEFAULT_TEMPLATES_DIR)
            .join(README_TEMPLATE_FILE),
    };

    let record = fs::read_to_string(&buildinfo_path).with_context(|| {
        format!(
            "failed to read build statistics (run `itgeo build` first): {}",
            buildinfo_path.display()
        )
    })?;
    let info: BuildInfo = serde_json::from_str(&record)
        .with_context(|| format!("malformed build statistics: {}", buildinfo_path.display()))?;
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("failed to read README template: {}", template_path.display()))?;

    let rendered = render_readme(&template, &info)?;
    println!("{rendered}");
    Ok(0)
}

/// Substitute `{key}` placeholders with values from the statistics record.
///
/// # Errors
///
/// Fails on a placeholder with no matching key, an unterminated
/// placeholder, or a stray closing brace.
pub fn render_readme(template: &str, info: &BuildInfo) -> Result<String> {
    let values: BTreeMap<&str, usize> = BTreeMap::from([
        ("entities", info.entities),
        ("nuts2", info.nuts2),
        ("nuts3", info.nuts3),
        ("notes", info.notes),
        ("tags", info.tags),
        ("media", info.media),
    ]);

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => bail!("unterminated placeholder {{{name} in README template"),
                    }
                }
                match values.get(name.as_str()) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => bail!("unknown placeholder {{{name}}} in README template"),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    bail!("stray '}}' in README template");
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> BuildInfo {
        BuildInfo {
            entities: 128,
            nuts2: 21,
            nuts3: 102,
            notes: 118,
            tags: 152,
            media: 118,
        }
    }

    #[test]
    fn renders_every_statistic() {
        let template = "# Deck\n\n\
            {entities} entities ({nuts2} regions, {nuts3} provinces).\n\
            {notes} cards, {tags} tags, {media} images.\n";
        let rendered = render_readme(template, &info()).unwrap();
        assert_eq!(
            rendered,
            "# Deck\n\n128 entities (21 regions, 102 provinces).\n118 cards, 152 tags, 118 images.\n"
        );
    }

    #[test]
    fn renders_escaped_braces() {
        let rendered = render_readme("literal {{braces}} and {notes} cards", &info()).unwrap();
        assert_eq!(rendered, "literal {braces} and 118 cards");
    }

    #[test]
    fn rejects_unknown_placeholder() {
        let err = render_readme("{cards}", &info()).unwrap_err();
        assert!(format!("{err}").contains("unknown placeholder {cards}"));
    }

    #[test]
    fn rejects_unterminated_placeholder() {
        let err = render_readme("count: {notes", &info()).unwrap_err();
        assert!(format!("{err}").contains("unterminated placeholder"));
    }

    #[test]
    fn rejects_stray_closing_brace() {
        let err = render_readme("count: notes}", &info()).unwrap_err();
        assert!(format!("{err}").contains("stray"));
    }

    #[test]
    fn run_readme_renders_from_project_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("build")).unwrap();
        fs::write(
            root.join("build").join(BUILDINFO_FILE),
            serde_json::to_string_pretty(&info()).unwrap(),
        )
        .unwrap();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::write(
            root.join("templates").join(README_TEMPLATE_FILE),
            "{notes} cards over {entities} entities\n",
        )
        .unwrap();

        let args = ReadmeArgs {
            buildinfo: None,
            template: None,
        };
        assert_eq!(run_readme(&args, root).unwrap(), 0);
    }

    #[test]
    fn run_readme_fails_without_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let args = ReadmeArgs {
            buildinfo: None,
            template: None,
        };
        let err = run_readme(&args, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("itgeo build"));
    }

    #[test]
    fn run_readme_fails_without_template() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("build")).unwrap();
        fs::write(
            root.join("build").join(BUILDINFO_FILE),
            serde_json::to_string(&info()).unwrap(),
        )
        .unwrap();

        let args = ReadmeArgs {
            buildinfo: None,
            template: None,
        };
        let err = run_readme(&args, root).unwrap_err();
        assert!(format!("{err:#}").contains("README template"));
    }
}
