//! trutex CLI - convert PCD9 textures to DDS and back.
//!
//! This is the main entry point for the trutex command-line application.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use trutex::prelude::*;
use trutex::Container;

/// trutex - PCD9 <-> DDS texture converter
#[derive(Parser)]
#[command(name = "trutex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PCD9 to DDS, or DDS to PCD9
    Convert {
        /// Input files, directories or glob patterns
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long, env = "TRUTEX_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Convert files in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Show the header of a PCD9 or DDS file
    Info {
        /// Input file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            inputs,
            output_dir,
            parallel,
        } => {
            cmd_convert(&inputs, output_dir, parallel)?;
        }
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_convert(inputs: &[PathBuf], output_dir: Option<PathBuf>, parallel: bool) -> Result<()> {
    let files = collect_inputs(inputs)?;
    let options = ConvertOptions { output_dir };

    if let [input] = files.as_slice() {
        println!("Processing {}", input.display());
        let output = convert_file_with(input, &options)
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        println!("Wrote {}", output.display());
        return Ok(());
    }

    println!("Converting {} files...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let errors = AtomicUsize::new(0);

    let convert_one = |input: &PathBuf| {
        if let Err(e) = convert_file_with(input, &options) {
            pb.suspend(|| tracing::error!(input = %input.display(), "{e}"));
            errors.fetch_add(1, Ordering::Relaxed);
        }
        pb.inc(1);
    };

    if parallel {
        files.par_iter().for_each(convert_one);
    } else {
        files.iter().for_each(convert_one);
    }

    pb.finish_with_message("Done");

    let errors = errors.into_inner();
    println!(
        "Converted {} files in {:?} ({} errors)",
        files.len() - errors,
        start.elapsed(),
        errors
    );

    if errors > 0 {
        anyhow::bail!("{} of {} conversions failed", errors, files.len());
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let info =
        inspect_file(input).with_context(|| format!("Failed to read {}", input.display()))?;

    println!("File:        {}", input.display());
    println!("Container:   {:?}", info.container);
    println!("Format:      {}", info.format);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Mip levels:  {}", info.mip_count);
    println!("Flags:       {:#04x}", info.flags);
    println!("Top level:   {} bytes", info.top_level_length);
    println!("Payload:     {} bytes", info.payload_bytes);
    if let Some(identifier) = info.identifier {
        println!("Identifier:  {:08x}", identifier);
    }
    if let Some(texture_type) = info.texture_type {
        println!("Type:        {}", texture_type);
    }

    Ok(())
}

/// Expand directories and glob patterns into a list of files.
///
/// Directories contribute every `.dds` and `.tr8pcd9` file below them. Plain
/// paths are passed through untouched so unknown extensions are reported by
/// the conversion itself.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input) {
                let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
                if entry.file_type().is_file() && Container::from_path(entry.path()).is_ok() {
                    files.push(entry.into_path());
                }
            }
            continue;
        }

        let pattern = input.to_string_lossy();
        if pattern.contains(['*', '?', '[']) {
            let paths =
                glob::glob(&pattern).with_context(|| format!("Invalid pattern {}", pattern))?;
            for entry in paths {
                files.push(entry?);
            }
            continue;
        }

        files.push(input.clone());
    }

    if files.is_empty() {
        anyhow::bail!("No input files found");
    }

    Ok(files)
}
