//! guidedoc: inspect the API documentation model of a library checkout.
//!
//! Parses `###*` doc-comment blocks below the source directory plus the
//! changelog, then prints either a plain-text overview or a JSON dump:
//!
//! - `guidedoc path/to/unpoly`
//! - `guidedoc -f json -o model.json --promoted up.link --promoted up.form .`

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use guidedoc::{Config, Repository};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "guidedoc",
    version,
    about = "Extract API guide documentation from doc-comment blocks"
)]
struct Cli {
    /// Repository root
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Config file (default: guidedoc.toml in the repository root)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format: summary (default) or json
    #[arg(short = 'f', long, default_value = "summary")]
    format: String,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Fail on unrecognized blocks and functions documented before any class
    #[arg(long)]
    strict: bool,

    /// Promoted class name. Can be given multiple times; replaces the
    /// configured list.
    #[arg(long)]
    promoted: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    let renderer = render::create_renderer(&cli.format)?;

    let repo = Repository::load(&cli.root, config)
        .with_context(|| format!("failed to parse {}", cli.root.display()))?;
    info!(klasses = repo.klasses().len(), "loaded {:?}", repo);

    let output = renderer.render(&repo)?;
    match cli.output {
        Some(ref path) => fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write stdout")?,
    }
    Ok(())
}

/// Log filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Config file from `--config` or the repository root, with CLI overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::discover(&cli.root)?,
    };
    if cli.strict {
        config.strict = true;
    }
    if !cli.promoted.is_empty() {
        config.promoted_klasses = cli.promoted.clone();
    }
    Ok(config)
}
