//! Core domain types for tgmlint.
//!
//! This module contains the in-memory model of a parsed map:
//! - `ObjectPath` / `Value` - type paths and override literals
//! - `ObjectPathEntry` - one stacked object on a tile
//! - `TileDictionary` - key -> tile contents
//! - `Grid` - placement of keys across x, y, z
//! - `MapFile` - the two together, with tile resolution

mod grid;
mod map;
mod path;
mod tile;
mod value;

pub use grid::{Coord, Grid};
pub use map::{resolve, MapFile};
pub use path::ObjectPath;
pub use tile::{ObjectPathEntry, ResolvedTile, TileDefinition, TileDictionary, TileKey};
pub use value::{ListItem, Number, Value};
