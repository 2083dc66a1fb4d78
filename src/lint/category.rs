//! Path categories: named sets of type-path prefixes.
//!
//! Rules ask "is this entry a pipe?" through a [`PrefixSet`] instead of
//! hardcoding path checks, so the prefix lists live in one place and can be
//! replaced from configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::types::{ObjectPath, ObjectPathEntry, ResolvedTile};

/// Category of pipe segments that must not share a tile with vents.
pub const PIPE: &str = "pipe";
/// Category of unary atmospherics devices (vents and scrubbers).
pub const VENT_OR_SCRUBBER: &str = "vent_or_scrubber";
/// Category of power cables.
pub const CABLE: &str = "cable";
/// Tiles holding one of these may stack center cable nodes.
pub const CABLE_EXEMPT: &str = "cable_exempt";

/// A set of path prefixes. A path is in the set when it is one of the
/// prefixes or a subtype of one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixSet {
    prefixes: Vec<String>,
}

impl PrefixSet {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn matches(&self, path: &ObjectPath) -> bool {
        self.prefixes.iter().any(|p| path.is_under(p))
    }

    /// Entries of `tile` in this set, bottom of the stack first.
    pub fn entries_in<'a>(
        &'a self,
        tile: &ResolvedTile<'a>,
    ) -> impl Iterator<Item = &'a ObjectPathEntry> + 'a {
        let entries = tile.entries;
        entries.iter().filter(move |e| self.matches(&e.path))
    }

    pub fn any_in(&self, tile: &ResolvedTile<'_>) -> bool {
        tile.entries.iter().any(|e| self.matches(&e.path))
    }
}

/// Named prefix sets used by the built-in rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
    sets: BTreeMap<String, PrefixSet>,
}

impl Default for Categories {
    fn default() -> Self {
        let mut sets = BTreeMap::new();
        sets.insert(
            PIPE.to_string(),
            PrefixSet::new([
                "/obj/machinery/atmospherics/pipe/manifold/hidden/supply",
                "/obj/machinery/atmospherics/pipe/simple/hidden/scrubbers",
            ]),
        );
        sets.insert(
            VENT_OR_SCRUBBER.to_string(),
            PrefixSet::new(["/obj/machinery/atmospherics/unary"]),
        );
        sets.insert(CABLE.to_string(), PrefixSet::new(["/obj/structure/cable"]));
        sets.insert(
            CABLE_EXEMPT.to_string(),
            PrefixSet::new(["/obj/effect/spawner/window/reinforced"]),
        );
        Self { sets }
    }
}

impl Categories {
    /// No categories at all.
    pub fn empty() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PrefixSet> {
        self.sets.get(name)
    }

    /// Like [`get`](Self::get), but a missing category is a config error.
    pub fn require(&self, name: &str) -> Result<&PrefixSet> {
        self.get(name).ok_or_else(|| MapError::Config {
            message: format!("category '{}' is not defined", name),
            help: Some(format!("Add a `{}` list under `categories`", name)),
        })
    }

    /// Define or replace a category.
    pub fn set(&mut self, name: impl Into<String>, set: PrefixSet) {
        self.sets.insert(name.into(), set);
    }

    /// Category names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, TileKey};

    #[test]
    fn test_prefix_set_matches_subtypes() {
        let set = PrefixSet::new(["/obj/machinery/atmospherics/unary"]);
        assert!(set.matches(&ObjectPath::new("/obj/machinery/atmospherics/unary/vent_pump")));
        assert!(set.matches(&ObjectPath::new("/obj/machinery/atmospherics/unary")));
        assert!(!set.matches(&ObjectPath::new("/obj/machinery/atmospherics/unaryx")));
        assert!(!PrefixSet::default().matches(&ObjectPath::new("/obj")));
    }

    #[test]
    fn test_prefix_set_tile_queries() {
        let set = PrefixSet::new(["/obj/structure/cable"]);
        let key = TileKey::new("aa");
        let entries = vec![
            ObjectPathEntry::new("/obj/structure/cable"),
            ObjectPathEntry::new("/turf/floor"),
            ObjectPathEntry::new("/obj/structure/cable/yellow"),
        ];
        let tile = ResolvedTile {
            coord: Coord::new(1, 1, 1),
            key: &key,
            entries: &entries,
        };

        assert!(set.any_in(&tile));
        let paths: Vec<&str> = set.entries_in(&tile).map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/obj/structure/cable", "/obj/structure/cable/yellow"]);
    }

    #[test]
    fn test_default_categories() {
        let categories = Categories::default();
        for name in [PIPE, VENT_OR_SCRUBBER, CABLE, CABLE_EXEMPT] {
            assert!(categories.require(name).is_ok(), "missing {}", name);
        }
        assert!(Categories::empty().require(PIPE).is_err());
    }
}
