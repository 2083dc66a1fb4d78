//! Rendering module for tgmlint.
//!
//! Turns parsed maps back into text.

mod tgm;

pub use tgm::{write_map, TGM_HEADER};
