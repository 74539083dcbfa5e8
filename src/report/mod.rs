//! Result output for the CLI frontend.
//!
//! Writes curve series and solved voltages to any writer (stdout in the CLI),
//! either as JSON for an external chart renderer or as a plain text table.
//! Currents are shown in milliamps in the table, in amps in JSON. Saturated
//! currents appear as `inf` in both.

use std::io::Write;

use serde::Serialize;

use crate::catalog::DeviceCatalog;
use crate::curve::{CurveSeries, InverseSolution};
use crate::error::{LedError, Result};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned columns per series
    #[default]
    Table,
    /// JSON document
    Json,
}

impl OutputFormat {
    /// Parse format from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn output_error(e: impl std::fmt::Display) -> LedError {
    LedError::OutputError {
        message: e.to_string(),
    }
}

#[derive(Serialize)]
struct SeriesDocument<'a> {
    series: &'a [CurveSeries],
}

#[derive(Serialize)]
struct InverseDocument<'a> {
    device: &'a str,
    target_current: f64,
    voltage: Option<f64>,
    series: &'a [CurveSeries],
}

fn format_current(ma: f64) -> String {
    if ma.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.6e}", ma)
    }
}

fn write_table<W: Write>(out: &mut W, series: &[CurveSeries]) -> std::io::Result<()> {
    for s in series {
        writeln!(out, "# {} ({:?})", s.label, s.style)?;
        writeln!(out, "{:>12}  {:>16}", "voltage_V", "current_mA")?;
        for (v, ma) in s.voltages.iter().zip(s.currents_milliamps()) {
            writeln!(out, "{:>12.6}  {:>16}", v, format_current(ma))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write a list of series.
pub fn write_series<W: Write>(out: &mut W, series: &[CurveSeries], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, series).map_err(output_error)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &SeriesDocument { series }).map_err(output_error)?;
            writeln!(out).map_err(output_error)?;
        }
    }
    out.flush().map_err(output_error)
}

/// Write the outcome of a current-to-voltage solve.
///
/// A `None` solution is reported as "could not calculate", not as a failure.
pub fn write_inverse<W: Write>(
    out: &mut W,
    device: &str,
    target_current: f64,
    solution: Option<&InverseSolution>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            match solution {
                Some(s) => {
                    writeln!(out, "Required voltage ≈ {:.2} V", s.voltage).map_err(output_error)?;
                    writeln!(out).map_err(output_error)?;
                    write_table(out, &s.series).map_err(output_error)?;
                }
                None => writeln!(
                    out,
                    "Could not calculate a voltage for {} A through {}",
                    target_current, device
                )
                .map_err(output_error)?,
            }
        }
        OutputFormat::Json => {
            let doc = InverseDocument {
                device,
                target_current,
                voltage: solution.map(|s| s.voltage),
                series: solution.map(|s| s.series.as_slice()).unwrap_or(&[]),
            };
            serde_json::to_writer_pretty(&mut *out, &doc).map_err(output_error)?;
            writeln!(out).map_err(output_error)?;
        }
    }
    out.flush().map_err(output_error)
}

/// Write one line per catalog device.
pub fn write_devices<W: Write>(out: &mut W, catalog: &DeviceCatalog) -> Result<()> {
    for spec in catalog.iter() {
        writeln!(
            out,
            "{:<10} V_f = {:.2} V  I_f = {:.1} mA",
            spec.id,
            spec.forward_voltage,
            spec.forward_current * 1e3
        )
        .map_err(output_error)?;
    }
    out.flush().map_err(output_error)
}
