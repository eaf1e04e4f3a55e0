//! Two-panel SVG report rendered with Plotters.
//!
//! Left panel: age model tiepoints and the polynomial fit (age vs depth).
//! Right panel: raw and smoothed LSR step curves (age vs cm/kyr).
//!
//! All series and bounds are computed before any drawing so that the render
//! code stays focused on layout and styling.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::domain::{PipelineOutput, StepCurve};
use crate::error::AppError;
use crate::models::evaluate_fit;
use crate::report::Presenter;

const CANVAS: (u32, u32) = (1200, 800);
const FIT_SAMPLES: usize = 200;

/// Writes the SVG report to `path`.
#[derive(Debug, Clone)]
pub struct SvgPresenter {
    pub path: PathBuf,
}

impl Presenter for SvgPresenter {
    fn present(&self, output: &PipelineOutput) -> Result<(), AppError> {
        render_svg(&self.path, output)?;
        info!(path = %self.path.display(), "wrote SVG report");
        Ok(())
    }
}

/// Data for both panels, with non-finite values removed.
#[derive(Debug, Clone)]
pub struct ReportSeries {
    pub tiepoints: Vec<(f64, f64)>,
    pub fit: Vec<(f64, f64)>,
    pub lsr_raw: Vec<(f64, f64)>,
    pub lsr_smoothed: Vec<(f64, f64)>,
}

impl ReportSeries {
    pub fn from_output(output: &PipelineOutput) -> Self {
        let tiepoints: Vec<(f64, f64)> = output.tiepoints.iter().map(|(d, a)| (a, d)).collect();

        let (a0, a1) = bounds(tiepoints.iter().map(|p| p.0));
        let fit = (0..FIT_SAMPLES)
            .map(|i| {
                let a = a0 + (a1 - a0) * i as f64 / (FIT_SAMPLES as f64 - 1.0);
                (a, evaluate_fit(&output.fit, a))
            })
            .filter(|(_, d)| d.is_finite())
            .collect();

        Self {
            tiepoints,
            fit,
            lsr_raw: finite(&output.raw_steps),
            lsr_smoothed: finite(&output.smoothed_steps),
        }
    }
}

pub fn render_svg(path: &Path, output: &PipelineOutput) -> Result<(), AppError> {
    let series = ReportSeries::from_output(output);
    let err = |e: String| AppError::new(2, format!("Failed to render SVG '{}': {e}", path.display()));

    let root = SVGBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(|e| err(e.to_string()))?;
    let (left, right) = root.split_horizontally(CANVAS.0 / 2);

    draw_age_depth(&left, &series, output.fit.degree).map_err(|e| err(e.to_string()))?;
    draw_lsr(&right, &series).map_err(|e| err(e.to_string()))?;

    root.present().map_err(|e| err(e.to_string()))?;
    Ok(())
}

type Panel<'a> = DrawingArea<SVGBackend<'a>, plotters::coord::Shift>;
type DrawResult = Result<(), Box<dyn std::error::Error + 'static>>;

fn draw_age_depth(area: &Panel<'_>, series: &ReportSeries, degree: usize) -> DrawResult {
    let (x0, x1) = padded(bounds(series.tiepoints.iter().map(|p| p.0)));
    let (y0, y1) = padded(bounds(
        series.tiepoints.iter().chain(series.fit.iter()).map(|p| p.1),
    ));

    let mut chart = ChartBuilder::on(area)
        .caption("Age vs depth plot with polynomial smoothing", ("sans-serif", 20))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Age (Ma)")
        .y_desc("Depth")
        .draw()?;

    let fit_color = RGBColor(200, 30, 30);
    let point_color = RGBColor(30, 60, 200);

    chart
        .draw_series(series.tiepoints.iter().map(|&p| Circle::new(p, 4, point_color.filled())))?
        .label("Age model tiepoints")
        .legend(move |(x, y)| Circle::new((x + 10, y), 4, point_color.filled()));

    chart
        .draw_series(LineSeries::new(series.fit.iter().copied(), fit_color.stroke_width(2)))?
        .label(format!("Polynomial fit (degree {degree})"))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], fit_color.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_lsr(area: &Panel<'_>, series: &ReportSeries) -> DrawResult {
    let (x0, x1) = padded(bounds(
        series.lsr_raw.iter().chain(series.lsr_smoothed.iter()).map(|p| p.0),
    ));
    let (y0, y1) = padded(bounds(
        series.lsr_raw.iter().chain(series.lsr_smoothed.iter()).map(|p| p.1),
    ));

    let mut chart = ChartBuilder::on(area)
        .caption("Raw vs smoothed LSR plot", ("sans-serif", 20))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Age (Ma)")
        .y_desc("Linear sedimentation rate (cm/kyr)")
        .draw()?;

    let raw_color = RGBColor(30, 60, 200);
    let smoothed_color = RGBColor(200, 30, 30);

    chart
        .draw_series(LineSeries::new(series.lsr_raw.iter().copied(), raw_color.stroke_width(2)))?
        .label("LSR, age model")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], raw_color.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            series.lsr_smoothed.iter().copied(),
            smoothed_color.stroke_width(2),
        ))?
        .label("LSR, smoothed")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], smoothed_color.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn finite(curve: &StepCurve) -> Vec<(f64, f64)> {
    curve
        .points()
        .filter(|(a, v)| a.is_finite() && v.is_finite())
        .collect()
}

/// Min/max of the finite values, `(0, 1)` when there are none.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}

/// Widen by 5% on each side; zero-width ranges get unit padding.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - 0.05 * span, hi + 0.05 * span)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze;
    use crate::domain::{IntervalPolicy, Tiepoints};

    fn output() -> PipelineOutput {
        let t = Tiepoints::new(
            vec![0.0, 1.5, 2.5, 2.5, 4.0, 6.0],
            vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5],
        );
        analyze(t, 2, IntervalPolicy::Reject).unwrap()
    }

    #[test]
    fn series_cover_the_age_range() {
        let s = ReportSeries::from_output(&output());
        assert_eq!(s.tiepoints.len(), 6);
        assert_eq!(s.fit.len(), FIT_SAMPLES);
        assert_eq!(s.fit.first().unwrap().0, 0.0);
        assert!((s.fit.last().unwrap().0 - 2.5).abs() < 1e-12);
        assert_eq!(s.lsr_raw.len(), 10);
        assert_eq!(s.lsr_smoothed.len(), 10);
    }

    #[test]
    fn padding_handles_flat_ranges() {
        assert_eq!(padded((2.0, 2.0)), (1.5, 2.5));
        let (lo, hi) = padded((0.0, 10.0));
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
        assert_eq!(bounds([f64::NAN, f64::INFINITY].into_iter()), (0.0, 1.0));
    }

    #[test]
    fn writes_an_svg_file() {
        let path = std::env::temp_dir().join(format!("lsr_report_{}.svg", std::process::id()));
        render_svg(&path, &output()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.contains("<svg"));
        assert!(text.contains("LSR, smoothed"));
    }
}
