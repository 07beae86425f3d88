#![warn(missing_docs)]
//! Performance profiles ("cactus plots") for combinatorial-optimization benchmarks.
//!
//! Builds, per algorithm, the cumulative percentage of instances solved to proven optimality
//! over time and the cumulative percentage of the remaining instances solved within a gap,
//! and renders both profiles side by side.
//!
//! The profile construction in [`profile`] is a pure function of the result rows; CSV parsing,
//! result-file parsing and rendering are separate modules built around its output type.
//!
//! This project also contains 3 executables: `cactus_plot` renders a consolidated results CSV,
//! `result_parser` consolidates a directory of solver result files into such a CSV, and
//! `data_generator` writes synthetic results for trying the pipeline.
//!
//! Example
//! ```rust
//! use cactus_profiles::csv_parser;
//! use cactus_profiles::profile::{CeilingPolicy, ProfileBuilder};
//! # use std::path::Path;
//! # use anyhow::Result;
//!
//! fn example() -> Result<()> {
//!     // consolidated csvs have at least the following header (types in parenthesis):
//!     // Algorithm(str),Gap(float),Time(float)
//!     // and optionally Instance(str) and Status(str)
//!     let rows = csv_parser::parse_results_csv(Path::new("results.csv"))?;
//!
//!     let profiles = ProfileBuilder::new(&rows)
//!         .ceiling_policy(CeilingPolicy::TickAligned)
//!         .build()?;
//!
//!     for profile in &profiles.time {
//!         println!("{}: {}%", profile.algorithm, profile.final_percentage());
//!     }
//!     // profile::PerformanceProfiles implements serde::Serialize
//!     println!("{}", serde_json::to_string(&profiles)?);
//!     Ok(())
//! }
//! ```

/// Reading and writing consolidated result tables.
pub mod csv_parser;

/// Data structures shared by the library and the executables.
#[allow(missing_docs)]
pub mod datastructures;

/// Error kinds of profile construction.
pub mod error;

/// Rendering of performance profiles.
#[allow(missing_docs)]
pub mod plot;

/// Step-function performance profiles.
#[allow(missing_docs)]
pub mod profile;

/// Parsing of per-run solver result files.
pub mod result_files;

#[cfg(test)]
mod test_utils;
