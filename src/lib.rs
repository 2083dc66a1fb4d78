//! tgmlint - Per-tile linter for TGM/DMM tile maps
//!
//! Parses a map into its tile dictionary and key grid, then runs an ordered
//! set of independent rules against every tile, producing coordinate-tagged
//! diagnostics such as
//!
//! ```text
//! 12,40,1:	Warning: pipe on same tile as vent or scrubber
//! ```
//!
//! The library does no file I/O of its own beyond reading a stream handed to
//! [`lint_reader`].

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod lint;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;

use std::io::Read;

pub use config::{Config, CONFIG_FILENAME};
pub use error::{MapError, Result};
pub use lint::{
    lint, lint_tile, Categories, Diagnostic, Finding, LintOptions, LintReport, PrefixSet,
    ReportFormat, Rule, RuleRegistry, Severity,
};
pub use parser::{parse_map, LexError, LexErrorReason};
pub use render::write_map;
pub use types::{
    resolve, Coord, Grid, MapFile, ObjectPath, ObjectPathEntry, ResolvedTile, TileDefinition,
    TileDictionary, TileKey, Value,
};

/// Parse `source` and lint every tile.
pub fn lint_source(source: &str, registry: &RuleRegistry, options: LintOptions) -> Result<LintReport> {
    let map = parse_map(source)?;
    Ok(lint(&map, registry, options))
}

/// Read a whole map from `reader`, then parse and lint it.
pub fn lint_reader<R: Read>(
    mut reader: R,
    registry: &RuleRegistry,
    options: LintOptions,
) -> Result<LintReport> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    lint_source(&source, registry, options)
}
