//! Tile coordinates and the rectangular key grid.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A 1-based tile coordinate. `z` is the level.
///
/// Coordinates order by level, then row, then column, which is the order
/// tiles are linted and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.z, self.y, self.x).cmp(&(other.z, other.y, other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Placement of tile definitions across levels.
///
/// Every level has the same width and height. Cells hold indices into the
/// map's [`TileDictionary`](super::TileDictionary), row-major from `y = 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    levels: Vec<Vec<usize>>,
}

impl Grid {
    /// Build a grid from complete levels.
    ///
    /// Returns `None` unless every level holds exactly `width * height`
    /// cells.
    pub fn new(width: u32, height: u32, levels: Vec<Vec<usize>>) -> Option<Self> {
        let cells = width as usize * height as usize;
        if levels.iter().any(|level| level.len() != cells) {
            return None;
        }
        Some(Self {
            width,
            height,
            levels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of levels.
    pub fn depth(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Total number of tiles across all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (1..=self.width).contains(&coord.x)
            && (1..=self.height).contains(&coord.y)
            && (1..=self.depth()).contains(&coord.z)
    }

    /// Dictionary index of the tile at `coord`.
    pub fn cell(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let idx = (coord.y - 1) as usize * self.width as usize + (coord.x - 1) as usize;
        self.levels[(coord.z - 1) as usize].get(idx).copied()
    }

    /// All coordinates, z then y then x ascending.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (1..=self.depth()).flat_map(move |z| {
            (1..=self.height)
                .flat_map(move |y| (1..=self.width).map(move |x| Coord::new(x, y, z)))
        })
    }
}
