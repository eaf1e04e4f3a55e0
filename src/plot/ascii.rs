//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Two plots are rendered, mirroring the SVG report:
//! - age vs depth: tiepoints `o`, polynomial fit `-`
//! - LSR vs age: raw step curve `=`, smoothed step curve `~`

use crate::domain::{PipelineOutput, StepCurve};
use crate::error::AppError;
use crate::models::evaluate_fit;
use crate::report::Presenter;

/// Prints both ASCII plots to stdout.
#[derive(Debug, Clone, Copy)]
pub struct AsciiPresenter {
    pub width: usize,
    pub height: usize,
}

impl Presenter for AsciiPresenter {
    fn present(&self, output: &PipelineOutput) -> Result<(), AppError> {
        println!("{}", render_age_depth_plot(output, self.width, self.height));
        println!("{}", render_lsr_plot(output, self.width, self.height));
        Ok(())
    }
}

/// Tiepoints and the fitted polynomial, age on x, depth on y.
pub fn render_age_depth_plot(output: &PipelineOutput, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = output.tiepoints.iter().map(|(d, a)| (a, d)).collect();
    let (a_min, a_max) = x_range(&points).unwrap_or((0.0, 1.0));

    let n = width.max(2);
    let curve: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let a = a_min + u * (a_max - a_min);
            (a, evaluate_fit(&output.fit, a))
        })
        .collect();

    let layers = [Layer::Line(&curve, '-'), Layer::Points(&points, 'o')];
    let mut out = String::new();
    let (y_min, y_max, body) = render_layers(&layers, a_min, a_max, width, height);
    out.push_str(&format!(
        "Age vs depth: age=[{a_min:.3}, {a_max:.3}] Ma | depth=[{y_min:.2}, {y_max:.2}]\n"
    ));
    out.push_str(&body);
    out
}

/// Raw and smoothed LSR step curves, age on x, rate on y.
pub fn render_lsr_plot(output: &PipelineOutput, width: usize, height: usize) -> String {
    let raw = finite_points(&output.raw_steps);
    let smoothed = finite_points(&output.smoothed_steps);
    let (a_min, a_max) = x_range(&raw).or_else(|| x_range(&smoothed)).unwrap_or((0.0, 1.0));

    let layers = [Layer::Line(&raw, '='), Layer::Line(&smoothed, '~')];
    let mut out = String::new();
    let (y_min, y_max, body) = render_layers(&layers, a_min, a_max, width, height);
    out.push_str(&format!(
        "LSR raw (=) vs smoothed (~): age=[{a_min:.3}, {a_max:.3}] Ma | lsr=[{y_min:.3}, {y_max:.3}] cm/kyr\n"
    ));
    out.push_str(&body);
    out
}

enum Layer<'a> {
    Line(&'a [(f64, f64)], char),
    Points(&'a [(f64, f64)], char),
}

impl Layer<'_> {
    fn data(&self) -> &[(f64, f64)] {
        match self {
            Layer::Line(d, _) | Layer::Points(d, _) => d,
        }
    }
}

/// Draw layers in order; lines only fill empty cells, points always overwrite.
fn render_layers(
    layers: &[Layer<'_>],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> (f64, f64, String) {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(layers.iter().flat_map(|l| l.data().iter())).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for layer in layers {
        match layer {
            Layer::Line(data, ch) => draw_curve(&mut grid, data, x_min, x_max, y_min, y_max, *ch),
            Layer::Points(data, ch) => {
                for &(x, y) in data.iter() {
                    if x.is_finite() && y.is_finite() {
                        let col = map_x(x, x_min, x_max, width);
                        let row = map_y(y, y_min, y_max, height);
                        grid[row][col] = *ch;
                    }
                }
            }
        }
    }

    let mut body = String::new();
    for row in grid {
        body.push_str(&row.into_iter().collect::<String>());
        body.push('\n');
    }
    (y_min, y_max, body)
}

fn finite_points(curve: &StepCurve) -> Vec<(f64, f64)> {
    curve
        .points()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() {
        // Flat series: give it some vertical room.
        Some((min_y - 0.5, max_y + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    if curve.is_empty() {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None if grid[row][col] == ' ' => grid[row][col] = ch,
            None => {}
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
