//! errlint CLI - error-code declaration linter for Rust projects.
//!
//! Features:
//! - Recursive project scanning with standard directory pruning
//! - Rayon-powered parallel source parsing
//! - Plain or JSON diagnostic output
//! - errlint.toml project defaults
//! - Non-zero exit status when violations exist

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use errlint_core::{
    gather_rs_files, gather_rs_files_with_excludes, init_structured_logging, load_config,
    parse_sources, print_json, print_plain, Engine, ValidationConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Error-code declaration linter for Rust")]
pub struct Cli {
    /// Path to the root of the Rust project
    #[arg(default_value = ".")]
    path: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Directory names to exclude from scanning
    #[arg(long, num_args = 1..)]
    exclude_dir: Vec<String>,

    /// Suppress the summary line when no violations are found
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    init_structured_logging();

    let cli = Cli::parse();
    let root = PathBuf::from(&cli.path);
    if !root.exists() {
        anyhow::bail!("path does not exist: {}", root.display());
    }

    // Project config: marker defaults and preferred output format.
    let config = load_config(&root).context("Failed to load errlint.toml")?;
    let defaults = config
        .as_ref()
        .map(|c| c.marker_defaults())
        .unwrap_or_else(ValidationConfig::default);
    let json_output = cli.json
        || config
            .as_ref()
            .and_then(|c| c.output.as_ref())
            .and_then(|o| o.format.as_deref())
            == Some("json");

    let files = if cli.exclude_dir.is_empty() {
        gather_rs_files(&root)?
    } else {
        let excludes: Vec<&str> = cli.exclude_dir.iter().map(String::as_str).collect();
        gather_rs_files_with_excludes(&root, &excludes)?
    };

    // One round per invocation: frontend diagnostics first, then the
    // engine's validation diagnostics over the whole batch.
    let (types, mut diagnostics) = parse_sources(&files, &defaults);
    let mut engine = Engine::new();
    diagnostics.extend(engine.process_round(&types));

    if json_output {
        print_json(&diagnostics);
    } else if !diagnostics.is_empty() || !cli.quiet {
        print_plain(&diagnostics);
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
