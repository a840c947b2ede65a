//! Hall Sim CLI Application
//!
//! Command-line front end for the hall simulation library. It owns
//! everything the library deliberately does not: reading the script file,
//! argument and config handling, the output destination and exit codes.
//!
//! A script that fails grammar validation is a reported outcome, not a
//! process failure: the offending line number is printed and the process
//! exits 0. Only usage errors (missing or unreadable files) exit nonzero.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

mod config;

use config::OutputFormat;
use hall_sim_core::{parse_script, simulate};

/// Hall Sim - simulate a day of table service from an event script
#[derive(Parser, Debug)]
#[command(name = "hall-sim")]
#[command(about = "Simulate a day of table service from an event script", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the day script
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Output file for the transcript (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Transcript format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Hall Sim CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using simulation library v{}", hall_sim_core::VERSION);

    // Optional config file; explicit flags win over config values
    let cfg = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let script_path = args.script.clone().or(cfg.input.script.clone());
    let output_path = args.output.clone().or(cfg.output.file.clone());
    let format = args
        .format
        .or(cfg.output.format)
        .unwrap_or(OutputFormat::Text);

    let Some(script_path) = script_path else {
        // No script given anywhere - show a quick start instead of failing
        println!("Hall Sim - no script specified");
        println!("\nQuick Start:");
        println!("  hall-sim day.txt");
        println!("  hall-sim day.txt --format json -o transcript.json");
        println!("  hall-sim --config config.toml");
        println!("\nUse --help for more options");
        return Ok(());
    };

    let input = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read script file: {:?}", script_path))?;

    let rendered = match parse_script(&input) {
        Ok(script) => {
            log::info!(
                "script accepted: {} tables, {} events",
                script.tables,
                script.events.len()
            );
            let transcript = simulate(&script);
            match format {
                OutputFormat::Text => transcript.render(),
                OutputFormat::Json => {
                    let mut json = serde_json::to_string_pretty(&transcript)
                        .context("Failed to serialize transcript")?;
                    json.push('\n');
                    json
                }
            }
        }
        Err(err) => {
            // Rejection output is the bare line number in either format
            log::warn!("{}", err);
            format!("{}\n", err.line())
        }
    };

    write_output(output_path.as_deref(), &rendered)
}

/// Write the transcript to the chosen destination
fn write_output(path: Option<&std::path::Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            log::info!("Transcript written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write transcript to stdout")?;
        }
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
