use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{plot::ImageFormat, profile::CeilingPolicy};

/// One benchmark run of an algorithm on an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub instance: String,
    pub algorithm: String,
    /// Solver verdict as printed in the result file, e.g. `SAT` or `OPTIMAL`.
    #[serde(default)]
    pub status: Option<String>,
    /// Relative distance to the best known bound in percent, 0 means proven optimal.
    pub gap: f64,
    /// Wall time in seconds.
    pub time: f64,
}

impl ResultRow {
    pub fn new(
        instance: impl Into<String>,
        algorithm: impl Into<String>,
        gap: f64,
        time: f64,
    ) -> Self {
        Self {
            instance: instance.into(),
            algorithm: algorithm.into(),
            status: None,
            gap,
            time,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.gap == 0.0
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {}: gap {} time {}",
            self.algorithm, self.instance, self.gap, self.time
        )?;
        if let Some(status) = &self.status {
            write!(f, " ({status})")?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default)]
    pub ceiling: CeilingPolicy,
    #[serde(default)]
    pub denominator: Option<usize>,
    #[serde(default)]
    pub json: Option<PathBuf>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub format: ImageFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            out_dir: default_out_dir(),
            ceiling: CeilingPolicy::default(),
            denominator: None,
            json: None,
            width: default_width(),
            height: default_height(),
            format: ImageFormat::default(),
        }
    }
}

impl Config {
    /// Merge the optional json config with the command line, command line wins.
    pub fn from_cli(args: &Args) -> Result<Config> {
        let mut config = match &args.config {
            Some(config_path) => {
                let config_str = fs::read_to_string(config_path)
                    .with_context(|| {
                        format!("failed to read config {config_path:?}")
                    })?;
                serde_json::from_str(&config_str).with_context(|| {
                    format!("failed to parse config {config_path:?}")
                })?
            }
            None => Config::default(),
        };
        if let Some(data_file) = &args.data_file {
            config.data_file = Some(data_file.to_path_buf());
        }
        if let Some(out_dir) = &args.out_dir {
            config.out_dir = out_dir.to_path_buf();
        }
        if let Some(ceiling) = args.ceiling {
            config.ceiling = ceiling;
        }
        if let Some(denominator) = args.denominator {
            config.denominator = Some(denominator);
        }
        if let Some(json) = &args.json {
            config.json = Some(json.to_path_buf());
        }
        if let Some(width) = args.width {
            config.width = width;
        }
        if let Some(height) = args.height {
            config.height = height;
        }
        if let Some(format) = args.format {
            config.format = format;
        }
        if config.data_file.is_none() {
            anyhow::bail!("no data file given on the command line or in the config");
        }
        if config.width == 0 || config.height == 0 {
            anyhow::bail!(
                "invalid image size {}x{}",
                config.width,
                config.height
            );
        }
        Ok(config)
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_width() -> u32 {
    1400
}

fn default_height() -> u32 {
    700
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Path to the CSV file containing the consolidated results
    #[arg(value_name = "DATA_FILE")]
    pub data_file: Option<PathBuf>,
    /// Path to a json config
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Path to the output directory
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// How the right end of each x-axis is chosen
    #[arg(long, value_enum)]
    pub ceiling: Option<CeilingPolicy>,
    /// Number of instances that make up 100%
    /// (Defaults to the largest number of runs of a single algorithm)
    #[arg(short, long)]
    pub denominator: Option<usize>,
    /// Also write the profiles as json to this file
    #[arg(short, long, value_name = "FILE")]
    pub json: Option<PathBuf>,
    /// Width of the rendered image in pixels
    #[arg(long)]
    pub width: Option<u32>,
    /// Height of the rendered image in pixels
    #[arg(long)]
    pub height: Option<u32>,
    /// File format of the rendered image
    #[arg(short, long, value_enum)]
    pub format: Option<ImageFormat>,
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}
