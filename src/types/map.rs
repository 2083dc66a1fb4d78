//! A parsed map file.
//!
//! Pairs the tile dictionary with the grid that places its keys. Both are
//! fixed once parsing succeeds; linting only reads them.
//!
//! # Example
//!
//! ```text
//! "aa" = (/turf/space,/area/space)
//! "ab" = (/obj/structure/cable{d2 = 4},/turf/simulated/floor,/area/station)
//!
//! (1,1,1) = {"
//! aa
//! ab
//! "}
//! ```

use super::{Coord, Grid, ResolvedTile, TileDictionary};

/// The tile dictionary and key grid of one map file.
#[derive(Debug, Clone)]
pub struct MapFile {
    pub dictionary: TileDictionary,
    pub grid: Grid,
}

impl MapFile {
    pub fn new(dictionary: TileDictionary, grid: Grid) -> Self {
        Self { dictionary, grid }
    }

    /// Resolve the tile at `coord`, or `None` if it is outside the grid.
    pub fn resolve(&self, coord: Coord) -> Option<ResolvedTile<'_>> {
        resolve(&self.grid, &self.dictionary, coord)
    }

    /// Every tile in traversal order (z, then y, then x).
    pub fn tiles(&self) -> impl Iterator<Item = ResolvedTile<'_>> + '_ {
        self.grid.coords().filter_map(move |c| self.resolve(c))
    }
}

/// Dereference the grid key at `coord` through the dictionary.
///
/// The parser guarantees every grid cell names a defined key, so the only
/// way to get `None` is a coordinate outside the grid.
pub fn resolve<'a>(
    grid: &Grid,
    dictionary: &'a TileDictionary,
    coord: Coord,
) -> Option<ResolvedTile<'a>> {
    let definition = dictionary.definition(grid.cell(coord)?)?;
    Some(ResolvedTile {
        coord,
        key: &definition.key,
        entries: &definition.entries,
    })
}
