//! Plotters-powered waveform chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call so `render()`
/// only draws.
pub struct WaveformPlottersChart<'a> {
    /// Samples with `u <= u_cut`.
    pub adiabatic: &'a [(f64, f64)],
    /// Samples with `u > u_cut`.
    pub gui: &'a [(f64, f64)],
    /// Regime switch time, drawn as a vertical line when inside `x_bounds`.
    pub cutoff: Option<f64>,
    /// X bounds (retarded time `u`).
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: String,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for WaveformPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let adiabatic_color = RGBColor(0, 255, 255); // cyan
            let gui_color = RGBColor(255, 0, 255); // magenta
            let cutoff_color = RGBColor(128, 128, 128);

            // Cutoff first so both regimes draw over it.
            if let Some(c) = self.cutoff.filter(|c| (x0..=x1).contains(c)) {
                chart.draw_series(LineSeries::new([(c, y0), (c, y1)], &cutoff_color))?;
            }

            chart.draw_series(LineSeries::new(self.adiabatic.iter().copied(), &adiabatic_color))?;
            chart.draw_series(LineSeries::new(self.gui.iter().copied(), &gui_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
