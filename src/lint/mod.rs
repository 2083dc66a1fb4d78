//! Per-tile lint engine.
//!
//! Every tile is resolved and handed to every registered rule, in
//! registration order. Tiles never see each other, so the pass can fan out
//! across threads; the report is always in traversal order (z, y, x).

mod category;
mod diagnostic;
mod report;
mod rule;
pub mod rules;

pub use category::{Categories, PrefixSet, CABLE, CABLE_EXEMPT, PIPE, VENT_OR_SCRUBBER};
pub use diagnostic::{Diagnostic, Finding, LintReport, Severity};
pub use report::{write_report, ReportFormat};
pub use rule::{Rule, RuleRegistry};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::error::Result;
use crate::types::{Coord, MapFile, ResolvedTile};

/// How a lint pass is run. Never changes its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Evaluate tiles on the rayon thread pool.
    pub parallel: bool,
}

impl LintOptions {
    pub fn parallel() -> Self {
        Self { parallel: true }
    }
}

impl RuleRegistry {
    /// The built-in rules over the default categories.
    pub fn with_builtin() -> Self {
        // The default categories define every set the built-ins ask for.
        Self::with_categories(&Categories::default()).unwrap_or_default()
    }

    /// The built-in rules over custom categories.
    pub fn with_categories(categories: &Categories) -> Result<Self> {
        let mut registry = Self::new();
        rules::register_builtin(&mut registry, categories)?;
        Ok(registry)
    }
}

/// Lint every tile of `map`.
pub fn lint(map: &MapFile, registry: &RuleRegistry, options: LintOptions) -> LintReport {
    if options.parallel {
        let coords: Vec<Coord> = map.grid.coords().collect();
        let per_tile: Vec<Vec<Diagnostic>> = coords
            .par_iter()
            .map(|&coord| match map.resolve(coord) {
                Some(tile) => lint_tile(&tile, registry),
                None => Vec::new(),
            })
            .collect();
        per_tile.into_iter().flatten().collect::<Vec<_>>().into()
    } else {
        map.tiles()
            .flat_map(|tile| lint_tile(&tile, registry))
            .collect::<Vec<_>>()
            .into()
    }
}

/// Run every rule against one tile.
///
/// A rule that panics does not stop the pass; it becomes a single
/// [`Severity::Fatal`] diagnostic naming the rule.
pub fn lint_tile(tile: &ResolvedTile<'_>, registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for rule in registry.all() {
        match panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(tile))) {
            Ok(findings) => out.extend(
                findings
                    .into_iter()
                    .map(|f| Diagnostic::from_finding(tile.coord, rule.id(), f)),
            ),
            Err(payload) => out.push(Diagnostic::new(
                tile.coord,
                Severity::Fatal,
                rule.id(),
                format!("rule '{}' failed: {}", rule.id(), panic_message(&*payload)),
            )),
        }
    }
    out
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "panic"
    }
}
