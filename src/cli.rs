use crate::request::{load_request, LayoutRequest};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cabinetkit", version, about = "Parametric cabinet layout engine")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output", global = true)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the canonical partition tree and the normalization warnings
    Normalize {
        /// Request file (.json) or '-' for stdin
        request: PathBuf,
    },
    /// Print the full cabinet layout
    Layout {
        /// Request file (.json) or '-' for stdin
        request: PathBuf,
    },
}

impl Command {
    fn request_path(&self) -> &Path {
        match self {
            Self::Normalize { request } | Self::Layout { request } => request.as_path(),
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let request = load_request(args.command.request_path())?;
    let output = render(&args.command, &request, args.pretty)?;
    write_output(&output, args.output.as_deref())
}

/// Run `command` against `request` and serialize the result.
pub fn render(command: &Command, request: &LayoutRequest, pretty: bool) -> Result<String> {
    let engine = request.engine().context("Invalid layout request")?;
    match command {
        Command::Normalize { .. } => {
            let normalized = engine.normalize(&request.partition)?;
            info!(
                "Normalized partition with {} warning(s)",
                normalized.warnings.len()
            );
            to_json(&normalized, pretty)
        }
        Command::Layout { .. } => {
            let layout = engine.apply(&request.partition)?;
            info!(
                "Laid out {} bay(s), {} divider(s), {} warning(s)",
                layout.leaves.len(),
                layout.dividers.len(),
                layout.warnings.len()
            );
            to_json(&layout, pretty)
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{output}\n"))
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{output}")?;
            Ok(())
        }
    }
}
