use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::{fs, path::Path};

use cactus_profiles::csv_parser;
use cactus_profiles::datastructures::*;
use cactus_profiles::error::ProfileError;
use cactus_profiles::plot;
use cactus_profiles::profile::ProfileBuilder;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();
    let config = match Config::from_cli(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    let Some(data_file) = config.data_file.clone() else {
        std::process::exit(exitcode::CONFIG);
    };
    if !data_file.exists() {
        error!("The file {data_file:?} does not exist");
        std::process::exit(exitcode::NOINPUT);
    }
    match run(&config, &data_file) {
        Err(err) if err.downcast_ref::<ProfileError>().is_some() => {
            error!("{err:#}");
            std::process::exit(exitcode::DATAERR);
        }
        result => result,
    }
}

fn run(config: &Config, data_file: &Path) -> Result<()> {
    let df = csv_parser::read_results_csv(data_file)?;
    info!("Algorithms found:\n{}", csv_parser::algorithm_summary(&df)?);
    let attempted = csv_parser::attempted_runs(&df)?;
    let max_attempted = attempted.iter().map(|(_, runs)| *runs).max();
    let rows = csv_parser::extract_rows(&df)?;

    let mut builder = ProfileBuilder::new(&rows)
        .attempted_runs(max_attempted.unwrap_or(0))
        .ceiling_policy(config.ceiling);
    if let Some(denominator) = config.denominator {
        builder = builder.denominator(denominator);
    }
    let profiles = builder.build()?;
    info!("Profiles:\n{profiles}");

    fs::create_dir_all(&config.out_dir)?;
    if let Some(json) = &config.json {
        serde_json::to_writer_pretty(fs::File::create(json)?, &profiles)?;
        info!("Profiles saved to: {json:?}");
    }
    plot::render(
        &profiles,
        &plot::output_path(data_file, &config.out_dir, config.format),
        (config.width, config.height),
    )
}
