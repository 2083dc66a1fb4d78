//! Lint command implementation.
//!
//! Reads each map, lints it, and writes diagnostics to stdout. Text output is
//! streamed per map; JSON output is one array covering every map, written
//! once all maps are linted. Progress and the summary go to stderr through
//! the [`Printer`].

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::discovery::collect_map_files;
use crate::error::{MapError, Result};
use crate::lint::{write_report, LintOptions, LintReport, ReportFormat, RuleRegistry, Severity};
use crate::output::{display_path, plural, Printer};

/// Lint map files and print one line per diagnostic
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Map file, or directory to scan for .dmm files
    #[arg(
        long = "dmm-file",
        alias = "dmm_file",
        value_name = "PATH",
        required = true,
        num_args = 1..
    )]
    pub dmm_files: Vec<PathBuf>,

    /// Config file (default: ./tgmlint.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lint tiles on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output format for diagnostics
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

pub fn run(args: LintArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = Config::discover(args.config.as_deref(), &cwd)?;
    if let Some(path) = &config_path {
        printer.info("Config", &printer.cyan(&display_path(path)));
    }

    let registry = config.build_registry()?;
    let mut options = config.lint_options();
    options.parallel |= args.parallel;

    let files = collect_map_files(&args.dmm_files)?;
    if files.is_empty() {
        printer.warning("Skipping", "no .dmm files found");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut warnings = 0;
    let mut combined = LintReport::new();

    for file in &files {
        printer.status("Linting", &display_path(file));
        let report = lint_file(file, &registry, options).inspect_err(|_| {
            printer.error("Failed", &display_path(file));
        })?;

        warnings += report.warning_count();
        if report.has_fatal() {
            let failures = report.count(Severity::Fatal);
            printer.warning(
                "Broken",
                &format!(
                    "{} in {}",
                    plural(failures, "rule failure", "rule failures"),
                    display_path(file)
                ),
            );
        }

        match args.format {
            ReportFormat::Text => write_report(&report, args.format, &mut out)?,
            ReportFormat::Json => combined.append(report),
        }
    }
    if args.format == ReportFormat::Json {
        write_report(&combined, args.format, &mut out)?;
    }
    out.flush()?;

    printer.status(
        "Finished",
        &format!(
            "{} in {}",
            plural(warnings, "warning", "warnings"),
            plural(files.len(), "map", "maps")
        ),
    );

    Ok(())
}

fn lint_file(path: &Path, registry: &RuleRegistry, options: LintOptions) -> Result<LintReport> {
    let source = fs::read_to_string(path).map_err(|e| MapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read map: {}", e),
    })?;
    crate::lint_source(&source, registry, options)
}
