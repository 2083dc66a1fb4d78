//! Diagnostic types for lint results.

use std::fmt;

use serde::Serialize;

use crate::types::Coord;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Info,
    Warning,
    /// A rule could not finish on this tile.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Fatal => write!(f, "Fatal"),
        }
    }
}

/// What a rule reports about one tile, before it is tagged with a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: String,
    /// Defaults to [`Severity::Warning`] when unset.
    pub severity: Option<Severity>,
}

impl Finding {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

/// A single coordinate-tagged lint diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub coord: Coord,
    pub severity: Severity,
    /// Identifier of the rule that produced it (e.g. "pipe-vent-collision").
    pub rule: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        coord: Coord,
        severity: Severity,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            coord,
            severity,
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(coord: Coord, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(coord, Severity::Warning, rule, message)
    }

    /// Tag a rule's finding with the tile it was found on.
    pub fn from_finding(coord: Coord, rule: &str, finding: Finding) -> Self {
        Self::new(
            coord,
            finding.severity.unwrap_or(Severity::Warning),
            rule,
            finding.message,
        )
    }
}

/// The report line: `x,y,z:<TAB>Severity: message`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\t{}: {}", self.coord, self.severity, self.message)
    }
}

/// Diagnostics from one lint pass, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LintReport {
    diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Move every diagnostic of `other` onto the end of this report.
    pub fn append(&mut self, other: LintReport) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Count diagnostics of one severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Count warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Whether any rule failed while linting.
    pub fn has_fatal(&self) -> bool {
        self.count(Severity::Fatal) > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate over diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Report lines, one per diagnostic, without trailing newlines.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics.iter().map(|d| d.to_string())
    }
}

impl From<Vec<Diagnostic>> for LintReport {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.diagnostics {
            writeln!(f, "{}", d)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = LintReport::new();
        assert!(report.is_empty());
        assert!(!report.has_fatal());
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_diagnostic_line_format() {
        let d = Diagnostic::warning(
            Coord::new(12, 34, 2),
            "pipe-vent-collision",
            "pipe on same tile as vent or scrubber",
        );
        assert_eq!(d.to_string(), "12,34,2:\tWarning: pipe on same tile as vent or scrubber");
    }

    #[test]
    fn test_finding_default_severity() {
        let d = Diagnostic::from_finding(Coord::new(1, 1, 1), "r", Finding::new("m"));
        assert_eq!(d.severity, Severity::Warning);

        let info = Finding::new("m").with_severity(Severity::Info);
        let d = Diagnostic::from_finding(Coord::new(1, 1, 1), "r", info);
        assert_eq!(d.to_string(), "1,1,1:\tInfo: m");
    }

    #[test]
    fn test_report_counts_and_lines() {
        let mut report = LintReport::new();
        report.push(Diagnostic::warning(Coord::new(1, 1, 1), "a", "first"));
        report.push(Diagnostic::new(Coord::new(2, 1, 1), Severity::Fatal, "b", "second"));

        assert_eq!(report.len(), 2);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_fatal());
        assert_eq!(
            report.lines().collect::<Vec<_>>(),
            vec!["1,1,1:\tWarning: first", "2,1,1:\tFatal: second"]
        );
        assert_eq!(report.to_string(), "1,1,1:\tWarning: first\n2,1,1:\tFatal: second\n");
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first = LintReport::new();
        first.push(Diagnostic::warning(Coord::new(2, 1, 1), "a", "first"));
        let mut second = LintReport::new();
        second.push(Diagnostic::warning(Coord::new(1, 1, 1), "a", "second"));

        first.append(second);
        assert_eq!(
            first.lines().collect::<Vec<_>>(),
            vec!["2,1,1:\tWarning: first", "1,1,1:\tWarning: second"]
        );
    }
}
