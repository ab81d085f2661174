//! chrononote: files notes from the scratch buffer into the daily archive.

use anyhow::Context;
use chrononote_lib::config::{self, CONFIG_FILE_NAME};
use chrononote_lib::{init_tracing, OsFileSystem, Overrides};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "chrononote")]
#[command(version, about = "File scratch-buffer notes into a date-partitioned markdown archive")]
struct Cli {
    /// Path to the configuration file (default: ~/.config/chrononote/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Buffer file to read notes from; saved to the config file
    #[arg(long)]
    buffer: Option<PathBuf>,

    /// Archive directory to file notes into; saved to the config file
    #[arg(long)]
    notes: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let app_dir = config::default_app_dir()?;
    let config_file = cli.config.unwrap_or_else(|| app_dir.join(CONFIG_FILE_NAME));
    let log_dir = config_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(|parent| parent.join("logs"))
        .unwrap_or_else(|| app_dir.join("logs"));
    init_tracing(&log_dir).context("failed to initialize logging")?;

    let fs = OsFileSystem;
    let overrides = Overrides {
        buffer_file: cli.buffer,
        notes_dir: cli.notes,
    };
    let config = config::initialize(&config_file, &app_dir, overrides, &fs).context("failed to load configuration")?;

    let report = chrononote_lib::run(&config, &fs).context("failed to file notes")?;
    if report.is_empty() {
        println!("No notes to file in {}; buffer cleared.", config.buffer_file.display());
        return Ok(());
    }
    for filed in &report.filed {
        println!("{}  {}  ->  {}", filed.date, filed.title, filed.path.display());
    }
    println!("Filed {} note(s); buffer cleared.", report.len());
    Ok(())
}
