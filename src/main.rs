// src/main.rs

// Declare modules
pub mod blur;
pub mod color;
pub mod config;
pub mod display;
pub mod gradient;
pub mod matrix;
pub mod raster;
pub mod renderer;
pub mod selection;

use crate::{
    config::Config,
    display::{DisplayShell, X11DisplayDriver},
    matrix::NamedMatrix,
    renderer::Renderer,
    selection::MatrixSelector,
};

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a language distance matrix as a blurred heatmap in an X11 window"
)]
struct Args {
    /// Input file of '#language' sections
    input: PathBuf,

    /// Matrix to show: index in file order or language name
    #[arg(short, long)]
    matrix: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the loaded matrices and exit
    #[arg(short, long)]
    list: bool,
}

/// Main entry point for `langplot`.
fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    // Usage problems (and --help/--version) are printed to stdout and are
    // not a failing exit.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    info!("Starting langplot...");

    // --- Configuration ---
    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    // --- Input ---
    let text = match fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read {}: {}", args.input.display(), e);
            println!("Error reading input file: {}", args.input.display());
            return Ok(());
        }
    };
    let matrices = matrix::parse_document(&text)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    info!(
        "Loaded {} matrices from {}",
        matrices.len(),
        args.input.display()
    );

    if args.list {
        print_listing(&matrices);
        return Ok(());
    }

    // --- Selection ---
    // --matrix wins over the config file; neither means the first matrix.
    let selector = match args.matrix.as_deref().or(config.selection.matrix.as_deref()) {
        Some(raw) => raw
            .parse::<MatrixSelector>()
            .with_context(|| format!("Invalid matrix selector '{}'", raw))?,
        None => MatrixSelector::default(),
    };
    let matrix = selector.select(&matrices)?;

    // --- Rendering and display ---
    let renderer = Renderer::from_config(&config)?;
    let driver =
        X11DisplayDriver::new(&config.window).context("Failed to initialize X11 display")?;
    let mut shell = DisplayShell::new(driver, renderer, matrix)?;

    info!("Starting paint loop...");
    shell.run()?;

    info!("langplot exited successfully.");
    Ok(())
}

fn print_listing(matrices: &[NamedMatrix]) {
    println!("{:>5}  {:<24} {:>6}  {}", "index", "language", "rows", "max");
    for (i, m) in matrices.iter().enumerate() {
        let square = if m.is_square() { "" } else { "  (not square)" };
        println!(
            "{:>5}  {:<24} {:>6}  {}{}",
            i,
            m.language(),
            m.dimension(),
            m.max_value(),
            square
        );
    }
}
