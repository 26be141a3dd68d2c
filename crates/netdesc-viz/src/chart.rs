//! SVG bar charts through `plotters`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use netdesc_ops::{ChartRenderer, ChartSpec};

const CHART_SIZE: (u32, u32) = (800, 600);

/// Writes each chart to `<dir>/<chart id>.svg`.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in render order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn draw(&self, plot: &ChartSpec, path: &Path) -> Result<()> {
        // Log axes are drawn linearly over log10 of the heights.
        let to_axis = |height: f64| if plot.log_y { height.log10() } else { height };
        let values: Vec<f64> = plot.drawable_bars().map(|b| to_axis(b.height)).collect();
        let (y_lo, y_hi) = y_bounds(&values, plot.log_y);
        let (x_lo, x_hi) = plot.x_range();
        let log_y = plot.log_y;

        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&plot.title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .y_label_formatter(&|v| {
                if log_y {
                    format!("{:.1e}", 10f64.powf(*v))
                } else {
                    format!("{v:.2}")
                }
            })
            .x_desc(&plot.x_label)
            .y_desc(&plot.y_label)
            .draw()?;

        let half = plot.bar_width / 2.0;
        chart.draw_series(plot.drawable_bars().map(|bar| {
            Rectangle::new(
                [(bar.x - half, y_lo), (bar.x + half, to_axis(bar.height))],
                BLUE.mix(0.8).filled(),
            )
        }))?;

        // One tick label under every bar, empty bins included.
        let label_style = TextStyle::from(("sans-serif", 12).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));
        for bar in &plot.bars {
            let (px, py) = chart.backend_coord(&(bar.x, y_lo));
            root.draw(&Text::new(
                bar.label.clone(),
                (px, py + 6),
                label_style.clone(),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for SvgRenderer {
    fn render(&mut self, plot: &ChartSpec) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(format!("{}.svg", plot.id));

        self.draw(plot, &path)
            .with_context(|| format!("Failed to draw {}", path.display()))?;

        debug!(chart = %plot.id, path = %path.display(), "Wrote chart");
        self.written.push(path);
        Ok(())
    }
}

/// Vertical extent in axis units.
///
/// Log axes snap outward to whole decades.
fn y_bounds(values: &[f64], log_y: bool) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return if log_y { (-1.0, 0.0) } else { (0.0, 1.0) };
    }
    if log_y {
        let lo = min.floor();
        let hi = max.ceil();
        if hi > lo {
            (lo, hi)
        } else {
            (lo, lo + 1.0)
        }
    } else if max > 0.0 {
        (0.0, max * 1.1)
    } else {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netdesc_ops::DegreeHistogram;
    use tempfile::TempDir;

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(&[-1.5, -0.2], true), (-2.0, 0.0));
        assert_eq!(y_bounds(&[0.0], true), (0.0, 1.0));
        assert_eq!(y_bounds(&[], true), (-1.0, 0.0));
        assert_eq!(y_bounds(&[2.0], false), (0.0, 2.2));
        assert_eq!(y_bounds(&[], false), (0.0, 1.0));
    }

    #[test]
    fn test_writes_svg_per_chart() {
        let dir = TempDir::new().unwrap();
        let mut renderer = SvgRenderer::new(dir.path().join("charts"));
        let histogram = DegreeHistogram::from_frequencies(vec![0, 1, 2, 3, 0, 0, 0, 0, 1]).unwrap();

        for chart in histogram.charts("toy") {
            renderer.render(&chart).unwrap();
        }

        let written = renderer.written();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("toy_pdf.svg"));
        assert!(written[1].ends_with("toy_ccdf.svg"));

        let svg = std::fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Network: toy"));
        assert!(svg.contains("p(K)"));
    }
}
