//! The per-tile rule interface and the ordered rule registry.

use crate::error::{MapError, Result};
use crate::types::ResolvedTile;

use super::diagnostic::Finding;

/// A check run independently against every tile.
///
/// Rules see one tile at a time and keep no state between tiles, so a pass
/// can evaluate tiles in any order or in parallel.
pub trait Rule: Send + Sync {
    /// Stable identifier, e.g. `pipe-vent-collision`.
    fn id(&self) -> &str;

    /// One-line summary for `tgmlint rules`.
    fn description(&self) -> &str;

    /// Findings for this tile; empty when the tile is clean.
    fn evaluate(&self, tile: &ResolvedTile<'_>) -> Vec<Finding>;
}

/// Rules in registration order.
///
/// Registration order is the order rules run on each tile, and therefore the
/// order of same-tile diagnostics.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Identifiers must be unique.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> Result<()> {
        self.register_boxed(Box::new(rule))
    }

    pub fn register_boxed(&mut self, rule: Box<dyn Rule>) -> Result<()> {
        if self.get(rule.id()).is_some() {
            return Err(MapError::Config {
                message: format!("rule '{}' is already registered", rule.id()),
                help: None,
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Remove a rule by identifier. Returns whether it was present.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id() != id);
        self.rules.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    /// All rules, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.id())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
