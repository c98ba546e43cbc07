//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the synthesis code stays clean and testable
//! - output changes are localized

use std::time::Duration;

use crate::domain::{PhysicalParameters, Regime, WaveformResult};
use crate::error::WaveformError;
use crate::report::junction_diagnostics;

/// Format the run summary (parameters, domain, regimes, junction).
pub fn format_summary(result: &WaveformResult, elapsed: Option<Duration>) -> String {
    let mut out = String::new();
    let p = &result.parameters;

    out.push_str("=== uwave - Universal Waveform Mode ===\n");
    out.push_str(&format!("Mode: {}\n", fmt_mode(p)));
    out.push_str(&format!("nu: {:.2e} | u_cut: {:.2}\n", p.nu, result.u_cut));

    if let (Some(first), Some(last)) = (result.times.first(), result.times.last()) {
        out.push_str(&format!(
            "Samples: n={} | u=[{first:.2}, {last:.2}]\n",
            result.len()
        ));
    }

    let adiabatic = result.adiabatic_len();
    out.push_str(&format!(
        "Regimes: {}={} | {}={}\n",
        Regime::Adiabatic.display_name(),
        adiabatic,
        Regime::Gui.display_name(),
        result.len() - adiabatic
    ));

    for warning in &result.warnings {
        out.push_str(&format!("Warning: {warning}\n"));
    }

    match junction_diagnostics(result) {
        Some(d) => {
            out.push_str(&format!(
                "Junction: index={} | u=[{:.2}, {:.2}] | phase jump={:.3e}\n",
                d.index, d.u_left, d.u_right, d.phase_jump
            ));
            out.push_str(&format!(
                "Amplitude at junction: {:.6e} -> {:.6e} (ratio {:.4}, not matched)\n",
                d.amplitude_left, d.amplitude_right, d.amplitude_ratio
            ));
        }
        None => out.push_str("Junction: none (single regime)\n"),
    }

    if let Some(elapsed) = elapsed {
        out.push_str(&format!(
            "It took {:.2e} seconds to calculate the waveform\n",
            elapsed.as_secs_f64()
        ));
    }

    out
}

/// Format one row per swept `nu`.
pub fn format_sweep_table(rows: &[(PhysicalParameters, Result<WaveformResult, WaveformError>)]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>10} {:>10} {:>8} {:>10} {:>8} {:>10}  {}\n",
            "nu", "u_cut", "n", "adiabatic", "gui", "amp_ratio", "status"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<10} {:-<10} {:-<8} {:-<10} {:-<8} {:-<10}  {:-<6}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (params, row) in rows {
        let line = match row {
            Ok(result) => {
                let adiabatic = result.adiabatic_len();
                let ratio = junction_diagnostics(result)
                    .map(|d| format!("{:.4}", d.amplitude_ratio))
                    .unwrap_or_else(|| "-".to_string());
                let status = if result.warnings.is_empty() { "ok" } else { "ok (truncated)" };
                format!(
                    "{:>10.2e} {:>10.2} {:>8} {:>10} {:>8} {:>10}  {status}",
                    params.nu,
                    result.u_cut,
                    result.len(),
                    adiabatic,
                    result.len() - adiabatic,
                    ratio,
                )
            }
            Err(err) => format!(
                "{:>10.2e} {:>10} {:>8} {:>10} {:>8} {:>10}  error: {err}",
                params.nu, "-", "-", "-", "-", "-"
            ),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn fmt_mode(p: &PhysicalParameters) -> String {
    format!("l={} m={} parity={}", p.l, p.m, p.parity.tag())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeRange;
    use crate::synth::synthesize;
    use crate::synth::testing::synthetic_provider;

    #[test]
    fn summary_mentions_cutoff_and_junction() {
        let params = PhysicalParameters::dominant(1e-3);
        let times = TimeRange { start: -1e5, end: 1e3, step: 10.0 }.to_domain().unwrap();
        let result = synthesize(&params, &times, &synthetic_provider()).unwrap();

        let txt = format_summary(&result, Some(Duration::from_millis(3)));
        assert!(txt.contains("Mode: l=2 m=2 parity=e"));
        assert!(txt.contains(&format!("u_cut: {:.2}", result.u_cut)));
        assert!(txt.contains("Warning: time domain truncated"));
        assert!(txt.contains("Junction: index="));
        assert!(txt.contains("not matched"));
        assert!(txt.contains("It took 3.00e-3 seconds"));
    }

    #[test]
    fn sweep_table_reports_errors_inline() {
        let times = TimeRange { start: -500.0, end: 100.0, step: 1.0 }.to_domain().unwrap();
        let ok = PhysicalParameters::dominant(0.01);
        let bad = PhysicalParameters::dominant(0.3);
        let rows = vec![
            (ok, synthesize(&ok, &times, &synthetic_provider())),
            (bad, synthesize(&bad, &times, &synthetic_provider())),
        ];

        let txt = format_sweep_table(&rows);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with("ok"));
        assert!(lines[3].contains("error: Invalid parameter"));
    }
}
