//! fnscope CLI - print the source of a named TypeScript or JavaScript function

#![deny(warnings)]

// Global invariants enforced:
// - stdout carries only the extraction output; diagnostics go to stderr
// - Exit code 0 on success, 1 on any failure

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use fnscope_core::{config, extract_function_with_config, render_json, render_text};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fnscope")]
#[command(version)]
#[command(about = "Print the source of a named function in a TypeScript or JavaScript file")]
struct Cli {
    /// Path to the TypeScript or JavaScript file
    file: PathBuf,

    /// Name of the function, method, or function-valued property
    name: String,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Path to a config file (default: discovered from the file's directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Wrong argument count and unknown flags exit 1, like every other failure
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Install a stderr logger filtered by `FNSCOPE_LOG` (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("FNSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run one lookup; `Ok(false)` means the JSON result reported a failure
fn run(cli: Cli) -> anyhow::Result<bool> {
    if !cli.file.is_file() {
        anyhow::bail!("File does not exist: {}", cli.file.display());
    }

    let start_dir = cli
        .file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let extract_config = config::load_and_resolve(start_dir, cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(config_path) = &extract_config.config_path {
        tracing::info!("Using config: {}", config_path.display());
    }

    let result = extract_function_with_config(&cli.file, &cli.name, &extract_config);

    match cli.format {
        OutputFormat::Text => {
            if !result.found {
                anyhow::bail!("{}", render_text(&result));
            }
            println!("{}", render_text(&result));
        }
        OutputFormat::Json => {
            println!("{}", render_json(&result));
        }
    }

    Ok(result.found)
}
