//! Interactive prompts for values missing from the command line.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompts provide the "run `uwave synth` and type a mass ratio" UX
//!
//! The readers are generic so the loops can be driven from tests.

use std::io::{BufRead, Write};

use crate::domain::{DEFAULT_TIME_RANGE, NU_MAX, TimeRange};
use crate::error::AppError;

/// Smallest mass ratio accepted at the prompt (exclusive).
pub const NU_PROMPT_MIN: f64 = 1e-7;

/// Check a mass ratio typed at the prompt.
pub fn check_nu(nu: f64) -> Result<f64, String> {
    if nu.is_nan() {
        Err("nu must be a number.".to_string())
    } else if nu >= NU_MAX {
        Err(format!("nu={nu} is too large: it must be below {NU_MAX}."))
    } else if nu <= NU_PROMPT_MIN {
        Err(format!("nu={nu} is too small: it must be above {NU_PROMPT_MIN:e}."))
    } else {
        Ok(nu)
    }
}

/// Parse and check a mass ratio typed at the prompt.
pub fn parse_nu(input: &str) -> Result<f64, String> {
    let nu: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number.", input.trim()))?;
    check_nu(nu)
}

/// Parse `start,end,step` into a time range.
///
/// Requires exactly three finite numbers with `end > start` and `step > 0`.
pub fn parse_time_range(input: &str) -> Result<TimeRange, String> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let [start, end, step] = parts.as_slice() else {
        return Err(format!(
            "expected three comma-separated numbers `start,end,step` (got '{}').",
            input.trim()
        ));
    };

    let number = |name: &str, s: &str| -> Result<f64, String> {
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(format!("{name} must be a finite number (got '{s}').")),
        }
    };
    let range = TimeRange {
        start: number("start", *start)?,
        end: number("end", *end)?,
        step: number("step", *step)?,
    };

    if range.end <= range.start {
        return Err(format!("end ({}) must be greater than start ({}).", range.end, range.start));
    }
    if range.step <= 0.0 {
        return Err(format!("step must be positive (got {}).", range.step));
    }

    Ok(range)
}

/// Prompt until a valid mass ratio is entered.
pub fn prompt_for_nu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<f64, AppError> {
    loop {
        write_prompt(output, "Enter the symmetric mass ratio nu (1e-7 < nu < 0.25): ")?;
        let line = read_line(input, "Provide one with `uwave synth --nu <value>`.")?;

        match parse_nu(&line) {
            Ok(nu) => return Ok(nu),
            Err(msg) => write_line(output, &msg)?,
        }
    }
}

/// Prompt until a valid time range is entered; empty input selects the default.
pub fn prompt_for_time_range<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<TimeRange, AppError> {
    loop {
        write_prompt(
            output,
            &format!("Enter the time range start,end,step (empty for {DEFAULT_TIME_RANGE}): "),
        )?;
        let line = read_line(input, "Provide one with `uwave synth --time start,end,step`.")?;

        if line.trim().is_empty() {
            return Ok(DEFAULT_TIME_RANGE);
        }
        match parse_time_range(&line) {
            Ok(range) => return Ok(range),
            Err(msg) => write_line(output, &format!("Invalid time range: {msg}"))?,
        }
    }
}

/// Use the `--time` flag when it parses, otherwise fall back to the prompt.
pub fn resolve_time_range<R: BufRead, W: Write>(
    flag: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<TimeRange, AppError> {
    if let Some(raw) = flag {
        match parse_time_range(raw) {
            Ok(range) => return Ok(range),
            Err(msg) => write_line(output, &format!("Ignoring --time: {msg}"))?,
        }
    }
    prompt_for_time_range(input, output)
}

fn write_prompt<W: Write>(output: &mut W, text: &str) -> Result<(), AppError> {
    write!(output, "{text}")
        .and_then(|_| output.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))
}

fn write_line<W: Write>(output: &mut W, text: &str) -> Result<(), AppError> {
    writeln!(output, "{text}").map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))
}

fn read_line<R: BufRead>(input: &mut R, hint: &str) -> Result<String, AppError> {
    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
    if bytes == 0 {
        return Err(AppError::new(2, format!("No input received. {hint}")));
    }
    Ok(line)
}
