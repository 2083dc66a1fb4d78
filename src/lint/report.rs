//! Rendering a [`LintReport`] for output.

use std::io::{self, Write};

use clap::ValueEnum;

use super::LintReport;

/// Output format for diagnostics on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One `x,y,z:<TAB>Severity: message` line per diagnostic.
    #[default]
    Text,
    /// A JSON array of diagnostic objects.
    Json,
}

/// Write `report` in `format`. Text output has no header or summary, and an
/// empty report writes nothing.
pub fn write_report<W: Write>(report: &LintReport, format: ReportFormat, out: &mut W) -> io::Result<()> {
    match format {
        ReportFormat::Text => write!(out, "{}", report),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
    }
}
