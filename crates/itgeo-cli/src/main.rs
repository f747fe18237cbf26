//! # itgeo CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use itgeo_cli::build::{run_build, BuildArgs};
use itgeo_cli::readme::{run_readme, ReadmeArgs};
use itgeo_cli::validate::{run_validate, ValidateArgs};

/// Geografia d'Italia deck toolchain
///
/// Derives the study deck from the Italian NUTS entity table: validated
/// rows in, a packaged archive with stable card identities out.
#[derive(Parser, Debug)]
#[command(name = "itgeo", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the deck and write the archive plus build statistics.
    Build(BuildArgs),

    /// Load and validate the entity table without writing anything.
    Validate(ValidateArgs),

    /// Render the README from the build statistics record.
    Readme(ReadmeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Resolve the project root: walk up from CWD looking for `data/` and `templates/`.
    let project_root = resolve_project_root().unwrap_or_else(|| {
        tracing::warn!("Could not locate project root; using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    tracing::debug!(project_root = %project_root.display(), "resolved project root");

    let result = match cli.command {
        Commands::Build(args) => run_build(&args, &project_root),
        Commands::Validate(args) => run_validate(&args, &project_root),
        Commands::Readme(args) => run_readme(&args, &project_root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Walk up from the current directory to find the project root.
///
/// The root is identified by the presence of both `data/` and `templates/`
/// directories, matching the deck project layout.
fn resolve_project_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join("data").is_dir() && dir.join("templates").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_build_defaults() {
        let cli = Cli::try_parse_from(["itgeo", "build"]).unwrap();
        assert!(matches!(cli.command, Commands::Build(_)));
        if let Commands::Build(args) = cli.command {
            assert!(args.data.is_none());
            assert!(args.templates.is_none());
            assert!(args.media.is_none());
            assert!(args.out_dir.is_none());
        }
    }

    #[test]
    fn cli_parse_build_with_all_options() {
        let cli = Cli::try_parse_from([
            "itgeo",
            "build",
            "--data",
            "other/entities.csv",
            "--templates",
            "other/templates",
            "--media",
            "other/media",
            "--out-dir",
            "dist",
        ])
        .unwrap();
        if let Commands::Build(args) = cli.command {
            assert_eq!(args.data, Some(PathBuf::from("other/entities.csv")));
            assert_eq!(args.templates, Some(PathBuf::from("other/templates")));
            assert_eq!(args.media, Some(PathBuf::from("other/media")));
            assert_eq!(args.out_dir, Some(PathBuf::from("dist")));
        }
    }

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["itgeo", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn cli_parse_validate_with_data() {
        let cli =
            Cli::try_parse_from(["itgeo", "validate", "--data", "fixtures/mini.csv"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.data, Some(PathBuf::from("fixtures/mini.csv")));
        }
    }

    #[test]
    fn cli_parse_readme() {
        let cli = Cli::try_parse_from(["itgeo", "readme"]).unwrap();
        assert!(matches!(cli.command, Commands::Readme(_)));
        if let Commands::Readme(args) = cli.command {
            assert!(args.buildinfo.is_none());
            assert!(args.template.is_none());
        }
    }

    #[test]
    fn cli_parse_readme_with_paths() {
        let cli = Cli::try_parse_from([
            "itgeo",
            "readme",
            "--buildinfo",
            "build/buildinfo.json",
            "--template",
            "templates/README.template.md",
        ])
        .unwrap();
        if let Commands::Readme(args) = cli.command {
            assert_eq!(args.buildinfo, Some(PathBuf::from("build/buildinfo.json")));
            assert_eq!(
                args.template,
                Some(PathBuf::from("templates/README.template.md"))
            );
        }
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["itgeo", "validate"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli1 = Cli::try_parse_from(["itgeo", "-v", "validate"]).unwrap();
        assert_eq!(cli1.verbose, 1);

        let cli2 = Cli::try_parse_from(["itgeo", "-vv", "validate"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["itgeo", "-vvv", "validate"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        let result = Cli::try_parse_from(["itgeo"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        let result = Cli::try_parse_from(["itgeo", "nonexistent"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_debug_impl() {
        let cli = Cli::try_parse_from(["itgeo", "validate"]).unwrap();
        let debug = format!("{cli:?}");
        assert!(debug.contains("Cli"));
    }
}
