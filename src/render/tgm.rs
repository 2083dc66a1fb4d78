//! Canonical TGM text output.
//!
//! Writes a `MapFile` back out in the TGM layout: one key definition per
//! entry line, then one single-column grid block per `x`. Parsing the
//! output gives back an equal map.

use crate::types::{Coord, MapFile, ObjectPathEntry, TileDefinition};

/// Header line that marks a file as already converted to TGM.
pub const TGM_HEADER: &str =
    "//MAP CONVERTED BY dmm2tgm.py THIS HEADER COMMENT PREVENTS RECONVERSION, DO NOT REMOVE";

/// Render a map as TGM text.
pub fn write_map(map: &MapFile) -> String {
    let mut out = String::new();
    out.push_str(TGM_HEADER);
    out.push('\n');

    let definitions: Vec<String> = map.dictionary.iter().map(write_definition).collect();
    out.push_str(&definitions.join("\n"));
    out.push_str("\n\n");

    let blocks: Vec<String> = (1..=map.grid.depth())
        .flat_map(|z| (1..=map.grid.width()).map(move |x| (x, z)))
        .map(|(x, z)| write_column(map, x, z))
        .collect();
    out.push_str(&blocks.join("\n"));
    out.push('\n');

    out
}

fn write_definition(definition: &TileDefinition) -> String {
    let entries: Vec<String> = definition.entries.iter().map(write_entry).collect();
    format!("\"{}\" = (\n{})", definition.key, entries.join(",\n"))
}

fn write_entry(entry: &ObjectPathEntry) -> String {
    if !entry.has_vars() {
        return entry.path.to_string();
    }

    let vars: Vec<String> = entry
        .vars
        .iter()
        .map(|(name, value)| format!("{} = {}", name, value))
        .collect();
    format!("{}{{\n\t{}\n\t}}", entry.path, vars.join(";\n\t"))
}

/// One column, north to south.
fn write_column(map: &MapFile, x: u32, z: u32) -> String {
    let mut out = format!("({},1,{}) = {{\"\n", x, z);
    for y in (1..=map.grid.height()).rev() {
        if let Some(tile) = map.resolve(Coord::new(x, y, z)) {
            out.push_str(tile.key.as_str());
            out.push('\n');
        }
    }
    out.push_str("\"}");
    out
}
