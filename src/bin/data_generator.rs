use std::ops::Range;

use clap::Parser;
use std::path::PathBuf;
use std::fs;

use anyhow::Result;
use cactus_profiles::csv_parser;
use cactus_profiles::datastructures::ResultRow;
use log::info;
use rand::distributions::Bernoulli;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Exp, Normal};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
struct InstanceRangeConfig {
    /// Mean run time of proven optimal runs in seconds
    mean_time: f64,
    /// Standard deviation relative to the mean
    std: f64,
    /// Probability that a run proves optimality
    optimal_ratio: f64,
    /// Mean gap of runs that hit the time limit
    mean_gap: f64,
    range: Range<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct AlgorithmConfig {
    name: String,
    instance_range_configs: Vec<InstanceRangeConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct DataGeneratorConfig {
    algorithm_configs: Vec<AlgorithmConfig>,
    num_instances: usize,
    /// Time limit in seconds, also the time of every run without optimality proof
    timeout: f64,
    seed: u64,
    out_path: PathBuf,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the json config
    #[arg(short, long)]
    pub config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = Args::parse();
    let config: DataGeneratorConfig =
        serde_json::from_str(&fs::read_to_string(args.config)?)?;
    let out_path = config.out_path.clone();
    let rows = generate_data(&config)?;
    csv_parser::write_results_csv(&rows, &out_path)?;
    info!("Wrote {} runs to {:?}", rows.len(), out_path);
    Ok(())
}

fn generate_data(config: &DataGeneratorConfig) -> Result<Vec<ResultRow>> {
    let mut rows = vec![];
    for (algo_idx, AlgorithmConfig { name, instance_range_configs }) in
        config.algorithm_configs.iter().enumerate()
    {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed + algo_idx as u64);
        for InstanceRangeConfig {
            mean_time,
            std,
            optimal_ratio,
            mean_gap,
            range,
        } in instance_range_configs
        {
            if range.end > config.num_instances {
                anyhow::bail!(
                    "instance range {range:?} of {name} exceeds {} instances",
                    config.num_instances
                );
            }
            let times = Normal::new(*mean_time, (*mean_time * *std).abs())?;
            let optimal = Bernoulli::new(*optimal_ratio)?;
            let gaps = Exp::new(1.0 / *mean_gap)?;
            for i in range.clone() {
                let row = if optimal.sample(&mut rng) {
                    let time: f64 = times.sample(&mut rng);
                    ResultRow {
                        status: Some("OPTIMAL".to_string()),
                        ..ResultRow::new(
                            format!("instance{i}"),
                            name.as_str(),
                            0.0,
                            time.clamp(0.0, config.timeout),
                        )
                    }
                } else {
                    let gap: f64 = gaps.sample(&mut rng);
                    ResultRow {
                        status: Some("SAT".to_string()),
                        ..ResultRow::new(
                            format!("instance{i}"),
                            name.as_str(),
                            gap.max(f64::EPSILON),
                            config.timeout,
                        )
                    }
                };
                rows.push(row);
            }
        }
    }
    Ok(rows)
}
