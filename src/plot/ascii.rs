//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - the series: `-` line
//! - the regime switch `u_cut`: `|` column

use std::borrow::Cow;

use crate::domain::{PhysicalParameters, Series, WaveformFile, WaveformResult};

/// Render one series of an in-memory result.
pub fn render_waveform_plot(result: &WaveformResult, series: Series, width: usize, height: usize) -> String {
    let values: Cow<'_, [f64]> = match series {
        Series::Waveform => Cow::Owned(result.real()),
        Series::Phase => Cow::Borrowed(&result.phase),
        Series::Amplitude => Cow::Borrowed(&result.amplitude),
    };
    render_plot(
        &result.times,
        &values,
        Some(result.u_cut),
        &series.label(&result.parameters),
        width,
        height,
    )
}

/// Render one series of a saved waveform JSON file.
pub fn render_file_plot(file: &WaveformFile, series: Series, width: usize, height: usize) -> String {
    let values: &[f64] = match series {
        Series::Waveform => &file.re,
        Series::Phase => &file.phase,
        Series::Amplitude => &file.amplitude,
    };
    render_plot(
        &file.u,
        values,
        Some(file.u_cut),
        &series.label(&file.parameters),
        width,
        height,
    )
}

/// Plot title for a mode, e.g. `nu=1.00e-6 l=2 m=2 parity=e`.
pub fn plot_title(params: &PhysicalParameters) -> String {
    format!(
        "nu={:.2e} l={} m={} parity={}",
        params.nu,
        params.l,
        params.m,
        params.parity.tag()
    )
}

fn render_plot(
    u: &[f64],
    y: &[f64],
    u_cut: Option<f64>,
    label: &str,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (u_min, u_max) = range(u).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = range(y).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    let points: Vec<(f64, f64)> = u.iter().copied().zip(y.iter().copied()).collect();
    draw_curve(&mut grid, &points, u_min, u_max, y_min, y_max);

    // The cutoff marker only fills empty cells so the curve stays readable.
    let cut = u_cut.filter(|&c| c >= u_min && c <= u_max);
    if let Some(c) = cut {
        let x = map_x(c, u_min, u_max, width);
        for row in grid.iter_mut() {
            if row[x] == ' ' {
                row[x] = '|';
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {label} | u=[{u_min:.2}, {u_max:.2}] | y=[{y_min:.3e}, {y_max:.3e}]"
    ));
    if let Some(c) = cut {
        out.push_str(&format!(" | u_cut={c:.2} (|)"));
    }
    out.push('\n');

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else if min.is_finite() {
        // Flat series: widen around the single value.
        Some((min - 0.5, min + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for &(t, y) in curve.iter().filter(|(t, y)| t.is_finite() && y.is_finite()) {
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            // Dense series land in the same cell many times in a row.
            Some(p) if p == (x, yy) => continue,
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, '-'),
            None => grid[yy][x] = '-',
        }
        prev = Some((x, yy));
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
