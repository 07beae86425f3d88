use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{info, warn};
use std::path::PathBuf;

use cactus_profiles::{csv_parser, result_files};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the folder containing result files
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,
    /// Save the consolidated results to this CSV file
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();
    if !args.folder.is_dir() {
        warn!("The folder {:?} does not exist", args.folder);
        std::process::exit(exitcode::NOINPUT);
    }
    let rows = result_files::parse_result_files(&args.folder)?;
    if rows.is_empty() {
        warn!("No valid data found");
        return Ok(());
    }
    info!("--- parsing complete ---");
    println!("{}", csv_parser::rows_to_dataframe(&rows)?);
    if let Some(out) = &args.out {
        csv_parser::write_results_csv(&rows, out)?;
        info!("Saved to {out:?}");
    }
    Ok(())
}
