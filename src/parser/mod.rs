//! Parser modules for grid map files.
//!
//! Map text goes through two stages:
//! - `lexer` turns text into tokens (strings, paths, numbers, punctuation)
//! - `map` consumes tokens into a `MapFile`, using `definitions` for the
//!   key section and `grid` for the coordinate blocks
//!
//! # Usage
//!
//! ```ignore
//! use tgmlint::parser::parse_map;
//!
//! let source = std::fs::read_to_string("maps/station.dmm")?;
//! let map = parse_map(&source)?;
//!
//! for tile in map.tiles() {
//!     println!("{}: {} objects", tile.coord, tile.entries.len());
//! }
//! ```

mod cursor;
mod definitions;
mod grid;
mod lexer;
mod map;
pub mod span;

// Re-export main entry points
pub use lexer::{tokenize, LexError, LexErrorReason, Lexer, Token, TokenKind};
pub use map::parse_map;
pub use span::{Location, Span};
