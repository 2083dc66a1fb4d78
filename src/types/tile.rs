//! Tile contents: object path entries, keys, and the tile dictionary.

use std::collections::HashMap;
use std::fmt;

use super::{Coord, ObjectPath, Value};

/// One stacked object on a tile, with its variable overrides in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPathEntry {
    pub path: ObjectPath,
    pub vars: Vec<(String, Value)>,
}

impl ObjectPathEntry {
    /// An entry with no overrides.
    pub fn new(path: impl Into<ObjectPath>) -> Self {
        Self {
            path: path.into(),
            vars: Vec::new(),
        }
    }

    /// Add an override (builder style).
    pub fn with_var(mut self, name: impl Into<String>, value: Value) -> Self {
        self.vars.push((name.into(), value));
        self
    }

    /// Look up an override by name.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn has_vars(&self) -> bool {
        !self.vars.is_empty()
    }
}

/// Handle into the tile dictionary, local to one map file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey(String);

impl TileKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A key together with the entries it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct TileDefinition {
    pub key: TileKey,
    /// Bottom-to-top stack of entries.
    pub entries: Vec<ObjectPathEntry>,
    /// Line the definition starts on.
    pub line: u32,
}

/// Key -> tile contents, in declaration order.
///
/// Keys are stored once; the grid refers to definitions by index.
#[derive(Debug, Clone, Default)]
pub struct TileDictionary {
    definitions: Vec<TileDefinition>,
    index: HashMap<String, usize>,
}

impl TileDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, returning its index.
    ///
    /// If the key is already present the existing definition is returned as
    /// the error and nothing changes.
    pub fn insert(&mut self, definition: TileDefinition) -> Result<usize, &TileDefinition> {
        if let Some(&existing) = self.index.get(definition.key.as_str()) {
            return Err(&self.definitions[existing]);
        }
        let idx = self.definitions.len();
        self.index.insert(definition.key.as_str().to_string(), idx);
        self.definitions.push(definition);
        Ok(idx)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn definition(&self, idx: usize) -> Option<&TileDefinition> {
        self.definitions.get(idx)
    }

    /// Definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TileDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Width of the keys, taken from the longest declared key.
    pub fn key_width(&self) -> usize {
        self.definitions.iter().map(|d| d.key.len()).max().unwrap_or(0)
    }
}

/// A tile's coordinate and its dereferenced contents, ready for linting.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTile<'a> {
    pub coord: Coord,
    pub key: &'a TileKey,
    pub entries: &'a [ObjectPathEntry],
}
