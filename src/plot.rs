use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::profile::{AlgorithmProfile, PerformanceProfiles};

const FS_TITLE: i32 = 24;
const FS_AXIS_LABEL: i32 = 20;
const FS_TICK_LABEL: i32 = 16;
const FS_LEGEND: i32 = 16;
const MAX_PERCENTAGE: f64 = 105.0;
const LINE_WIDTH: u32 = 2;

/// Series colors, cycled per algorithm.
pub const PALETTE: [RGBColor; 5] = [
    RGBColor(255, 165, 0),
    RGBColor(0, 128, 0),
    RGBColor(255, 0, 0),
    RGBColor(128, 0, 128),
    RGBColor(0, 0, 255),
];

const DATA_FILE_SUFFIX: &str = "_consolidated_results.csv";

/// File format of the rendered chart.
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
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Image file for a data file: `runs_consolidated_results.csv` becomes
/// `runs_cactus_plot.png` (or `.svg`) in `out_dir`.
pub fn output_path(
    data_file: &Path,
    out_dir: &Path,
    format: ImageFormat,
) -> PathBuf {
    let file_name = data_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match file_name.strip_suffix(DATA_FILE_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => Path::new(&file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    out_dir.join(format!("{stem}_cactus_plot.{}", format.extension()))
}

/// Draws the time profile and the gap profile side by side.
///
/// Writes an SVG when `path` ends with `.svg` and a bitmap otherwise.
pub fn render(
    profiles: &PerformanceProfiles,
    path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let is_svg = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw(profiles, &root)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw(profiles, &root)?;
        root.present()?;
    }
    info!("Graph saved to: {path:?}");
    Ok(())
}

fn draw<DB: DrawingBackend>(
    profiles: &PerformanceProfiles,
    root: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (width, _) = root.dim_in_pixel();
    let (left, right) = root.split_horizontally((width / 2) as i32);
    draw_panel(
        &left,
        &profiles.time,
        profiles.time_ceiling,
        "Solved Instances Profile (Gap = 0)",
        "Completion time (s)",
        true,
    )?;
    draw_panel(
        &right,
        &profiles.gap,
        profiles.gap_ceiling,
        "Gap Profile (Continuous)",
        "Optimality Gap Threshold (%)",
        false,
    )?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &[AlgorithmProfile],
    ceiling: f64,
    title: &str,
    x_desc: &str,
    with_legend: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", FS_TITLE))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..ceiling, 0f64..MAX_PERCENTAGE)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .x_desc(x_desc)
        .y_desc("Percentage of Instances (%)")
        .axis_desc_style(("sans-serif", FS_AXIS_LABEL))
        .label_style(("sans-serif", FS_TICK_LABEL))
        .draw()?;
    for (idx, profile) in series.iter().enumerate() {
        let color = series_color(idx);
        let style = color.stroke_width(LINE_WIDTH);
        chart
            .draw_series(LineSeries::new(profile.step_path(), style))?
            .label(profile.algorithm.as_str())
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    color.stroke_width(LINE_WIDTH),
                )
            });
    }
    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .label_font(("sans-serif", FS_LEGEND))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{output_path, series_color, ImageFormat, PALETTE};

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(
                Path::new("bench/ks_consolidated_results.csv"),
                Path::new("out"),
                ImageFormat::Png
            ),
            PathBuf::from("out/ks_cactus_plot.png")
        );
        assert_eq!(
            output_path(Path::new("runs.csv"), Path::new("."), ImageFormat::Png),
            PathBuf::from("./runs_cactus_plot.png")
        );
    }

    #[test]
    fn test_output_path_svg() {
        assert_eq!(
            output_path(
                Path::new("bench/ks_consolidated_results.csv"),
                Path::new("out"),
                ImageFormat::Svg
            ),
            PathBuf::from("out/ks_cactus_plot.svg")
        );
    }

    #[test]
    fn test_colors_cycle() {
        assert_eq!(series_color(0), PALETTE[0]);
        assert_eq!(series_color(5), PALETTE[0]);
        assert_eq!(series_color(7), PALETTE[2]);
    }
}
