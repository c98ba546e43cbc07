//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the mass ratio, parity, and time
//! grid, then renders the synthesized mode with both regimes and the `u_cut`
//! marker.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{run_synthesis_with_provider, RunOutput};
use crate::cli::prompt::{check_nu, parse_nu, parse_time_range};
use crate::cli::SynthArgs;
use crate::domain::{Parity, PhysicalParameters, Series, SynthesisConfig, WaveformResult, DEFAULT_TIME_RANGE};
use crate::error::AppError;
use crate::models::DirectoryProvider;
use crate::report::junction_diagnostics;

mod plotters_chart;

use plotters_chart::WaveformPlottersChart;

/// Multiplicative step applied to `nu` by the left/right keys.
const NU_STEP: f64 = 1.5;

/// Upper bound on points handed to Plotters per regime.
const MAX_CHART_POINTS: usize = 2_000;

/// File written by the export key when no `--export-json` path was given.
const DEFAULT_EXPORT_PATH: &str = "uwave_waveform.json";

/// Start the TUI.
pub fn run(args: SynthArgs) -> Result<(), AppError> {
    let mut app = App::new(&args);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Editing {
    Nu,
    Time,
}

struct App {
    config: SynthesisConfig,
    provider: DirectoryProvider,
    series: Series,
    selected_field: usize,
    editing: Option<Editing>,
    input: String,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: &SynthArgs) -> Self {
        let mut notes = Vec::new();

        let nu = match args.nu {
            Some(nu) => nu,
            None => PhysicalParameters::default().nu,
        };
        let time_range = match args.mode.time.as_deref().map(parse_time_range) {
            Some(Ok(range)) => range,
            Some(Err(msg)) => {
                notes.push(format!("Ignoring --time: {msg}"));
                DEFAULT_TIME_RANGE
            }
            None => DEFAULT_TIME_RANGE,
        };

        let config = crate::app::synthesis_config(args, nu, time_range);
        let provider = DirectoryProvider::new(&config.polynomial_dir);

        let mut app = Self {
            config,
            provider,
            series: Series::Waveform,
            selected_field: 0,
            editing: None,
            input: String::new(),
            status: String::new(),
            run: None,
        };
        app.resynthesize();
        if !notes.is_empty() {
            app.status = format!("{} | {}", notes.join(" | "), app.status);
        }
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Some(field) = self.editing {
            self.handle_edit(field, code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < 2 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                let field = match self.selected_field {
                    0 => Some(Editing::Nu),
                    2 => Some(Editing::Time),
                    _ => None,
                };
                if let Some(field) = field {
                    self.editing = Some(field);
                    self.input.clear();
                    self.status = match field {
                        Editing::Nu => "Editing nu. Enter to apply, Esc to cancel.".to_string(),
                        Editing::Time => {
                            "Editing time range (start,end,step). Enter to apply, Esc to cancel.".to_string()
                        }
                    };
                }
            }
            KeyCode::Char('s') | KeyCode::Tab => {
                self.series = self.series.next();
                self.status = format!("series: {}", self.series.label(&self.config.parameters));
            }
            KeyCode::Char('x') => self.export(),
            _ => {}
        }

        false
    }

    fn handle_edit(&mut self, field: Editing, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = None;
                self.apply_input(field);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | ',') {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_input(&mut self, field: Editing) {
        match field {
            Editing::Nu => match parse_nu(&self.input) {
                Ok(nu) => {
                    self.config.parameters.nu = nu;
                    self.resynthesize();
                }
                Err(msg) => self.status = msg,
            },
            Editing::Time => match parse_time_range(&self.input) {
                Ok(range) => {
                    self.config.time_range = range;
                    self.resynthesize();
                }
                Err(msg) => self.status = format!("Invalid time range: {msg}"),
            },
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                let nu = self.config.parameters.nu;
                let next = if delta >= 0 { nu * NU_STEP } else { nu / NU_STEP };
                match check_nu(next) {
                    Ok(next) => {
                        self.config.parameters.nu = next;
                        self.resynthesize();
                    }
                    Err(msg) => self.status = msg,
                }
            }
            1 => {
                self.config.parameters.parity = match self.config.parameters.parity {
                    Parity::Even => Parity::Odd,
                    Parity::Odd => Parity::Even,
                };
                self.resynthesize();
            }
            _ => {}
        }
    }

    /// Re-run synthesis; failures land in the status line and keep the last result.
    fn resynthesize(&mut self) {
        match run_synthesis_with_provider(&self.config, &self.provider) {
            Ok(run) => {
                self.status = status_for(&run.result, run.elapsed);
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn export(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        let path = self
            .config
            .export_json
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));
        self.status = match crate::io::write_waveform_json(&path, &run.result) {
            Ok(()) => format!("Wrote waveform: {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let p = &self.config.parameters;
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("uwave", Style::default().fg(Color::Cyan)),
            Span::raw(" - universal waveform modes"),
        ]));

        let (cut, n) = self
            .run
            .as_ref()
            .map(|r| (format!("{:.2}", r.result.u_cut), r.result.len()))
            .unwrap_or_else(|| ("-".to_string(), 0));

        lines.push(Line::from(Span::styled(
            format!(
                "{} | u_cut: {cut} | n={n} | series: {}",
                crate::plot::plot_title(p),
                self.series.label(p),
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(d) = self.run.as_ref().and_then(|r| junction_diagnostics(&r.result)) {
            lines.push(Line::from(Span::styled(
                format!(
                    "junction: u=[{:.2}, {:.2}] | phase jump={:.2e} | amplitude ratio={:.4}",
                    d.u_left, d.u_right, d.phase_jump, d.amplitude_ratio,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Waveform").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No waveform (see status line).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let data = chart_series(&run.result, self.series, MAX_CHART_POINTS);
        let y_label = self.series.label(&run.result.parameters);

        let (chart_rect, insets) = chart_layout(inner);
        let widget = WaveformPlottersChart {
            adiabatic: &data.adiabatic,
            gui: &data.gui,
            cutoff: Some(run.result.u_cut),
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: "u",
            y_label: y_label.clone(),
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, data.x_bounds, data.y_bounds, &y_label);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let p = &self.config.parameters;
        let editing = |field: Editing| {
            if self.editing == Some(field) {
                format!("{}_", self.input)
            } else {
                String::new()
            }
        };

        let mut items = Vec::new();
        items.push(ListItem::new(format!("nu: {:.3e} {}", p.nu, editing(Editing::Nu))));
        items.push(ListItem::new(format!("Parity: {}", p.parity.tag())));
        items.push(ListItem::new(format!("Time: {} {}", self.config.time_range, editing(Editing::Time))));

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing.is_some() {
            let hint = Paragraph::new("Editing…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + area.width.saturating_sub(12),
                y: area.y,
                width: 10.min(area.width),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  s series  x export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Status line after a successful synthesis (warnings take precedence).
fn status_for(result: &WaveformResult, elapsed: Duration) -> String {
    if result.warnings.is_empty() {
        format!(
            "synthesized {} samples in {:.2e} s",
            result.len(),
            elapsed.as_secs_f64()
        )
    } else {
        result
            .warnings
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Series prepared for the chart widget.
#[derive(Debug, Clone, PartialEq)]
struct ChartData {
    adiabatic: Vec<(f64, f64)>,
    gui: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Split the selected series at the junction and thin it to at most
/// `max_points` per regime.
fn chart_series(result: &WaveformResult, series: Series, max_points: usize) -> ChartData {
    let values: Vec<f64> = match series {
        Series::Waveform => result.real(),
        Series::Phase => result.phase.clone(),
        Series::Amplitude => result.amplitude.clone(),
    };

    let split = result.adiabatic_len();
    let thin = |range: std::ops::Range<usize>| -> Vec<(f64, f64)> {
        let len = range.len();
        if len == 0 {
            return Vec::new();
        }
        let stride = len.div_ceil(max_points.max(2)).max(1);
        let mut out: Vec<(f64, f64)> = range
            .clone()
            .step_by(stride)
            .map(|i| (result.times[i], values[i]))
            .collect();
        // Keep the segment end so both regimes meet at the junction.
        let last = range.end - 1;
        if (last - range.start) % stride != 0 {
            out.push((result.times[last], values[last]));
        }
        out
    };
    let adiabatic = thin(0..split);
    let gui = thin(split..result.len());

    let mut x_bounds = match (result.times.first(), result.times.last()) {
        (Some(&a), Some(&b)) if b > a => [a, b],
        _ => [0.0, 1.0],
    };
    if !x_bounds.iter().all(|x| x.is_finite()) {
        x_bounds = [0.0, 1.0];
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &y in &values {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    ChartData {
        adiabatic,
        gui,
        x_bounds,
        y_bounds,
    }
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.2e}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 10,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    y_label: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_x(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_y(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("u")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(y_label.to_string())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: chart.width.min(inner.width),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeRange;
    use crate::synth::synthesize;
    use crate::synth::testing::synthetic_provider;

    fn result(nu: f64) -> WaveformResult {
        let times = TimeRange { start: -3000.0, end: 100.0, step: 0.1 }.to_domain().unwrap();
        synthesize(&PhysicalParameters::dominant(nu), &times, &synthetic_provider()).unwrap()
    }

    #[test]
    fn chart_series_is_split_at_the_cutoff_and_thinned() {
        let r = result(1e-3);
        let data = chart_series(&r, Series::Phase, 500);

        assert!(data.adiabatic.len() <= 501);
        assert!(data.gui.len() <= 501);
        assert!(data.adiabatic.iter().all(|&(u, _)| u <= r.u_cut));
        assert!(data.gui.iter().all(|&(u, _)| u > r.u_cut));

        let j = r.adiabatic_len();
        assert_eq!(data.adiabatic.last().copied(), Some((r.times[j - 1], r.phase[j - 1])));
        assert_eq!(data.gui.first().copied(), Some((r.times[j], r.phase[j])));
        assert_eq!(data.x_bounds, [r.times[0], r.times[r.len() - 1]]);
        assert!(data.y_bounds[0] < data.y_bounds[1]);
    }

    #[test]
    fn status_prefers_warnings() {
        let r = result(1e-3);
        assert!(status_for(&r, Duration::from_millis(1)).starts_with("synthesized"));

        let times = TimeRange { start: -500.0, end: 500.0, step: 1.0 }.to_domain().unwrap();
        let truncated = synthesize(&PhysicalParameters::dominant(1e-3), &times, &synthetic_provider()).unwrap();
        assert!(status_for(&truncated, Duration::ZERO).contains("truncated"));
    }
}
