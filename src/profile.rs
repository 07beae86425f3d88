use core::fmt;

use clap::ValueEnum;
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::datastructures::ResultRow;
use crate::error::ProfileError;

pub mod ticks;

/// How the right end of a profile's threshold axis is chosen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CeilingPolicy {
    /// One extra tick step beyond the last tick covering the data maximum.
    #[default]
    TickAligned,
    /// The data maximum itself, 1.0 for an all-zero column.
    RawMax,
}

impl CeilingPolicy {
    pub fn ceiling(self, max_value: f64) -> f64 {
        match self {
            CeilingPolicy::TickAligned => ticks::extended_limit(max_value),
            CeilingPolicy::RawMax if max_value > 0.0 => max_value,
            CeilingPolicy::RawMax => 1.0,
        }
    }
}

/// Which instances a profile counts and what its threshold is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Proven optimal instances (gap == 0) by completion time.
    Time,
    /// Instances with a positive gap by gap value.
    Gap,
}

impl ProfileKind {
    pub fn accepts(self, row: &ResultRow) -> bool {
        match self {
            ProfileKind::Time => row.is_optimal(),
            ProfileKind::Gap => row.gap > 0.0,
        }
    }

    pub fn threshold(self, row: &ResultRow) -> f64 {
        match self {
            ProfileKind::Time => row.time,
            ProfileKind::Gap => row.gap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub threshold: f64,
    pub percentage: f64,
}

impl ProfilePoint {
    pub fn new(threshold: f64, percentage: f64) -> Self {
        Self {
            threshold,
            percentage,
        }
    }
}

/// Step function from threshold to cumulative percentage of resolved instances.
///
/// The value of a point holds until the next threshold. Points are sorted by threshold and
/// their percentages never decrease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmProfile {
    pub algorithm: String,
    pub points: Vec<ProfilePoint>,
}

impl AlgorithmProfile {
    pub fn final_percentage(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.percentage)
    }

    /// Percentage resolved within `threshold`, 0 below the first point.
    pub fn value_at(&self, threshold: f64) -> f64 {
        self.points
            .iter()
            .take_while(|p| p.threshold <= threshold)
            .last()
            .map_or(0.0, |p| p.percentage)
    }

    /// Polyline of the step function: horizontal to the next threshold, then vertical.
    pub fn step_path(&self) -> Vec<(f64, f64)> {
        let mut path = Vec::with_capacity(self.points.len() * 2);
        if let Some(first) = self.points.first() {
            path.push((first.threshold, first.percentage));
        }
        for (prev, next) in self.points.iter().tuple_windows() {
            path.push((next.threshold, prev.percentage));
            path.push((next.threshold, next.percentage));
        }
        path
    }
}

/// Time and gap profiles of every algorithm, in the order algorithms first appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceProfiles {
    pub denominator: usize,
    pub time_ceiling: f64,
    pub gap_ceiling: f64,
    pub time: Vec<AlgorithmProfile>,
    pub gap: Vec<AlgorithmProfile>,
}

impl PerformanceProfiles {
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.time.iter().map(|p| p.algorithm.as_str())
    }

    pub fn time_profile(&self, algorithm: &str) -> Option<&AlgorithmProfile> {
        self.time.iter().find(|p| p.algorithm == algorithm)
    }

    pub fn gap_profile(&self, algorithm: &str) -> Option<&AlgorithmProfile> {
        self.gap.iter().find(|p| p.algorithm == algorithm)
    }
}

impl fmt::Display for PerformanceProfiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} instances, time axis up to {}, gap axis up to {}",
            self.denominator, self.time_ceiling, self.gap_ceiling
        )?;
        for (time, gap) in self.time.iter().zip(&self.gap) {
            writeln!(
                f,
                "{}: {:.2}% optimal, {:.2}% with a solution",
                time.algorithm,
                time.final_percentage(),
                gap.final_percentage()
            )?;
        }
        Ok(())
    }
}

/// Builds [`PerformanceProfiles`] from benchmark rows.
///
/// ```rust
/// use cactus_profiles::datastructures::ResultRow;
/// use cactus_profiles::profile::{CeilingPolicy, ProfileBuilder};
///
/// let rows = [
///     ResultRow::new("i1", "A", 0.0, 1.0),
///     ResultRow::new("i2", "A", 0.0, 2.0),
///     ResultRow::new("i1", "B", 0.0, 5.0),
/// ];
/// let profiles = ProfileBuilder::new(&rows)
///     .denominator(2)
///     .ceiling_policy(CeilingPolicy::RawMax)
///     .build()
///     .unwrap();
/// assert_eq!(profiles.time_profile("A").unwrap().value_at(2.0), 100.0);
/// assert_eq!(profiles.time_profile("B").unwrap().value_at(5.0), 50.0);
/// ```
pub struct ProfileBuilder<'a> {
    rows: &'a [ResultRow],
    denominator: Option<usize>,
    attempted_runs: usize,
    ceiling_policy: CeilingPolicy,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(rows: &'a [ResultRow]) -> Self {
        Self {
            rows,
            denominator: None,
            attempted_runs: 0,
            ceiling_policy: CeilingPolicy::default(),
        }
    }

    /// Number of instances that make up 100%.
    ///
    /// Defaults to the largest number of runs of a single algorithm. A smaller value is raised
    /// to that count.
    pub fn denominator(mut self, denominator: usize) -> Self {
        self.denominator = Some(denominator);
        self
    }

    /// Largest number of runs a single algorithm attempted, counting runs that left no usable
    /// row (no solution, timeout). The denominator never drops below it.
    pub fn attempted_runs(mut self, attempted_runs: usize) -> Self {
        self.attempted_runs = attempted_runs;
        self
    }

    pub fn ceiling_policy(mut self, ceiling_policy: CeilingPolicy) -> Self {
        self.ceiling_policy = ceiling_policy;
        self
    }

    pub fn build(&self) -> Result<PerformanceProfiles, ProfileError> {
        if self.rows.is_empty() {
            return Err(ProfileError::EmptyInput("no result rows".to_string()));
        }
        let attempts = attempts_per_algorithm(self.rows);
        let max_attempts = attempts
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0)
            .max(self.attempted_runs);
        let denominator = match self.denominator {
            Some(0) => {
                return Err(ProfileError::EmptyInput(
                    "denominator is zero".to_string(),
                ))
            }
            Some(n) if n < max_attempts => {
                warn!(
                    "Denominator {n} is below the {max_attempts} runs of a single algorithm, using {max_attempts}"
                );
                max_attempts
            }
            Some(n) => n,
            None => max_attempts,
        };

        let time_ceiling = self
            .ceiling_policy
            .ceiling(self.rows.iter().map(|r| r.time).fold(0.0, f64::max));
        let gap_ceiling = self
            .ceiling_policy
            .ceiling(nonzero_max(self.rows.iter().map(|r| r.gap)));
        debug!("Denominator {denominator}, ceilings {time_ceiling} (time) and {gap_ceiling} (gap)");

        let mut time = Vec::with_capacity(attempts.len());
        let mut gap = Vec::with_capacity(attempts.len());
        for (algorithm, _) in attempts {
            let algorithm_rows = self
                .rows
                .iter()
                .filter(|r| r.algorithm == algorithm)
                .collect_vec();
            let (time_profile, solved) = step_profile(
                algorithm,
                &algorithm_rows,
                ProfileKind::Time,
                denominator,
                0,
                time_ceiling,
            );
            let (gap_profile, _) = step_profile(
                algorithm,
                &algorithm_rows,
                ProfileKind::Gap,
                denominator,
                solved,
                gap_ceiling,
            );
            time.push(time_profile);
            gap.push(gap_profile);
        }
        Ok(PerformanceProfiles {
            denominator,
            time_ceiling,
            gap_ceiling,
            time,
            gap,
        })
    }
}

/// Rows per algorithm, in the order algorithms first appear.
pub fn attempts_per_algorithm(rows: &[ResultRow]) -> Vec<(&str, usize)> {
    let counts = rows.iter().map(|r| r.algorithm.as_str()).counts();
    rows.iter()
        .map(|r| r.algorithm.as_str())
        .unique()
        .map(|algorithm| (algorithm, counts[algorithm]))
        .collect()
}

/// Largest gap, with an all-zero column mapped to 1.0 so the axis keeps a width.
fn nonzero_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0, f64::max);
    if max == 0.0 {
        1.0
    } else {
        max
    }
}

/// Builds one profile starting at `offset` already resolved instances.
///
/// Returns the profile and the number of resolved instances at its end.
fn step_profile(
    algorithm: &str,
    rows: &[&ResultRow],
    kind: ProfileKind,
    denominator: usize,
    offset: usize,
    ceiling: f64,
) -> (AlgorithmProfile, usize) {
    let percentage =
        |count: usize| count as f64 / denominator as f64 * 100.0;
    let mut thresholds = rows
        .iter()
        .filter(|r| kind.accepts(r))
        .map(|r| kind.threshold(r))
        .collect_vec();
    thresholds.sort_by(f64::total_cmp);

    let mut points = Vec::with_capacity(thresholds.len() + 2);
    points.push(ProfilePoint::new(0.0, percentage(offset)));
    points.extend(thresholds.iter().enumerate().map(|(i, &threshold)| {
        ProfilePoint::new(threshold, percentage(offset + i + 1))
    }));
    let last = points[points.len() - 1];
    if last.threshold < ceiling {
        points.push(ProfilePoint::new(ceiling, last.percentage));
    }
    (
        AlgorithmProfile {
            algorithm: algorithm.to_string(),
            points,
        },
        offset + thresholds.len(),
    )
}
