//! Chart rendering
//!
//! Draws one line per utilization category against sample index. The
//! interval labels are annotations only, so the x-axis is the sample
//! number, and the y-axis is pinned to 0-100 percent with a gridline every
//! ten points. The backend is chosen from the output file extension.

use crate::models::{CpuSeries, METRICS};
use anyhow::{anyhow, bail, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1000, 600);

/// One fixed color per metric, in `METRICS` order
const METRIC_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),  // %usr - blue
    RGBColor(255, 127, 14),  // %sys - orange
    RGBColor(44, 160, 44),   // %iowait - green
    RGBColor(214, 39, 40),   // %irq - red
    RGBColor(148, 103, 189), // %soft - purple
    RGBColor(127, 127, 127), // %idle - gray
];

/// Render the series as a line chart at `output`.
///
/// `.png` and `.bmp` go through the bitmap backend, `.svg` through the SVG
/// backend; any other extension is rejected before anything is written. An
/// empty series produces an empty grid rather than an error.
pub fn render_chart(series: &CpuSeries, cpu_id: &str, output: &Path) -> Result<()> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" | "bmp" => {
            let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
            draw(&root, series, cpu_id)
                .map_err(|e| anyhow!("failed to render chart to {}: {e}", output.display()))
        }
        "svg" => {
            let root = SVGBackend::new(output, CHART_SIZE).into_drawing_area();
            draw(&root, series, cpu_id)
                .map_err(|e| anyhow!("failed to render chart to {}: {e}", output.display()))
        }
        "" => bail!(
            "output path {} has no extension; use .png, .bmp or .svg",
            output.display()
        ),
        other => bail!("unsupported chart format `.{other}`; use .png, .bmp or .svg"),
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &CpuSeries,
    cpu_id: &str,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    // At least one sample slot, so an empty series still yields a grid
    let x_max = series.len().max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("CPU {cpu_id} usage over time"),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(0..x_max, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("sample")
        .y_desc("percentage")
        .y_labels(11)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    for (slot, metric) in METRICS.iter().enumerate() {
        let color = METRIC_COLORS[slot];
        chart
            .draw_series(LineSeries::new(
                series.column(*metric).iter().copied().enumerate(),
                color.stroke_width(2),
            ))?
            .label(metric.column())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
}
