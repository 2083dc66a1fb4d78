//! Grid section: `(x,y,z) = {" rows "}` blocks, assembled into levels.
//!
//! A block's first row is its northernmost, so row `i` of a block with `h`
//! rows at `(x0, y0, z)` lands on `y = y0 + h - 1 - i`. TGM files use one
//! single-column block per `x`; classic DMM files use one block per level.
//! Both are just rectangles under this rule.

use std::collections::BTreeMap;

use crate::error::{MapError, Result};
use crate::types::{Coord, Grid, TileDictionary};

use super::cursor::{unexpected, Cursor};
use super::lexer::TokenKind;

/// A grid block as written, before key lookup.
#[derive(Debug)]
pub(super) struct RawBlock<'a> {
    pub origin: Coord,
    /// Rows with their source lines, top row first.
    pub rows: Vec<(u32, &'a str)>,
    pub line: u32,
}

/// A block with its keys resolved to dictionary indices.
struct Block {
    origin: Coord,
    width: u32,
    height: u32,
    /// Row-major, top row first.
    cells: Vec<usize>,
    row_lines: Vec<u32>,
    line: u32,
}

/// Parse one `(x,y,z) = {"..."}` block. The cursor must be on the `(`.
pub(super) fn parse_block<'a>(cursor: &mut Cursor<'a>) -> Result<RawBlock<'a>> {
    let open = cursor.expect(&TokenKind::LParen)?;
    let line = open.span.line();

    let x = parse_coordinate(cursor)?;
    cursor.expect(&TokenKind::Comma)?;
    let y = parse_coordinate(cursor)?;
    cursor.expect(&TokenKind::Comma)?;
    let z = parse_coordinate(cursor)?;
    cursor.expect(&TokenKind::RParen)?;
    cursor.expect(&TokenKind::Equals)?;

    let body = cursor.next()?;
    let TokenKind::BlockString(content) = body.kind else {
        return Err(unexpected(&body, "a `{\"` grid block"));
    };

    let first_line = body.span.line();
    let pieces: Vec<(u32, &str)> = content
        .split('\n')
        .enumerate()
        .map(|(i, row)| (first_line + i as u32, row.trim_end_matches('\r')))
        .collect();

    // The text right after `{"` and right before `"}` is usually empty.
    let mut rows = pieces.as_slice();
    if let Some(((_, ""), rest)) = rows.split_first() {
        rows = rest;
    }
    if let Some(((_, ""), rest)) = rows.split_last() {
        rows = rest;
    }

    Ok(RawBlock {
        origin: Coord::new(x, y, z),
        rows: rows.to_vec(),
        line,
    })
}

fn parse_coordinate(cursor: &mut Cursor<'_>) -> Result<u32> {
    let token = cursor.next()?;
    match token.kind {
        TokenKind::Number(raw) => match raw.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(MapError::malformed(
                token.span.line(),
                format!("grid coordinate `{}` must be a positive integer", raw),
            )),
        },
        _ => Err(unexpected(&token, "a grid coordinate")),
    }
}

/// Resolve keys and stitch blocks into a rectangular grid.
///
/// `end_line` is used for errors about the section as a whole.
pub(super) fn assemble(
    blocks: &[RawBlock<'_>],
    dictionary: &TileDictionary,
    end_line: u32,
) -> Result<Grid> {
    if blocks.is_empty() {
        return Err(MapError::ragged(end_line, "map has no grid blocks"));
    }

    let key_width = dictionary.key_width();
    let mut levels: BTreeMap<u32, Vec<Block>> = BTreeMap::new();
    for raw in blocks {
        let block = decode_block(raw, dictionary, key_width)?;
        levels.entry(block.origin.z).or_default().push(block);
    }

    let mut dims: Option<(u32, u32, u32)> = None;
    let mut cells = Vec::with_capacity(levels.len());

    for (expected_z, (&z, level_blocks)) in (1u32..).zip(&levels) {
        let level_line = level_blocks[0].line;
        if z != expected_z {
            return Err(MapError::ragged(
                level_line,
                format!("level {} is missing (found level {} instead)", expected_z, z),
            ));
        }

        let (width, height, level) = assemble_level(z, level_blocks)?;
        match dims {
            None => dims = Some((width, height, z)),
            Some((w, h, first_z)) if (w, h) != (width, height) => {
                return Err(MapError::ragged(
                    level_line,
                    format!(
                        "level {} is {}x{} tiles, but level {} is {}x{}",
                        z, width, height, first_z, w, h
                    ),
                ));
            }
            Some(_) => {}
        }
        cells.push(level);
    }

    let (width, height, _) = dims.unwrap_or_default();
    Grid::new(width, height, cells)
        .ok_or_else(|| MapError::ragged(end_line, "levels do not share one size"))
}

fn decode_block(raw: &RawBlock<'_>, dictionary: &TileDictionary, key_width: usize) -> Result<Block> {
    if raw.rows.is_empty() {
        return Err(MapError::ragged(raw.line, "grid block has no rows"));
    }

    let mut width: Option<usize> = None;
    let mut cells = Vec::new();
    let mut row_lines = Vec::with_capacity(raw.rows.len());

    for &(line, row) in &raw.rows {
        if row.is_empty() {
            return Err(MapError::ragged(line, "empty row in grid block"));
        }
        if !row.is_ascii() {
            return Err(MapError::malformed(line, "grid row contains non-ASCII characters"));
        }
        if key_width == 0 {
            // Nothing is defined, so whatever the row says is undefined.
            return Err(MapError::DanglingKey {
                key: row.to_string(),
                line,
            });
        }
        if row.len() % key_width != 0 {
            return Err(MapError::ragged(
                line,
                format!(
                    "row is {} characters, not a multiple of the key width {}",
                    row.len(),
                    key_width
                ),
            ));
        }

        let keys = row.len() / key_width;
        match width {
            None => width = Some(keys),
            Some(w) if w != keys => {
                return Err(MapError::ragged(
                    line,
                    format!("row has {} keys, but the block's first row has {}", keys, w),
                ));
            }
            Some(_) => {}
        }

        for start in (0..row.len()).step_by(key_width) {
            let key = &row[start..start + key_width];
            let idx = dictionary.index_of(key).ok_or_else(|| MapError::DanglingKey {
                key: key.to_string(),
                line,
            })?;
            cells.push(idx);
        }
        row_lines.push(line);
    }

    Ok(Block {
        origin: raw.origin,
        width: width.unwrap_or(0) as u32,
        height: raw.rows.len() as u32,
        cells,
        row_lines,
        line: raw.line,
    })
}

/// Place a level's blocks, requiring every tile to be covered exactly once.
fn assemble_level(z: u32, blocks: &[Block]) -> Result<(u32, u32, Vec<usize>)> {
    let level_line = blocks[0].line;
    let mut width = 0u64;
    let mut height = 0u64;
    let mut placed = 0u64;
    for block in blocks {
        width = width.max(block.origin.x as u64 + block.width as u64 - 1);
        height = height.max(block.origin.y as u64 + block.height as u64 - 1);
        placed += block.width as u64 * block.height as u64;
    }

    // Checked before allocating so a stray far-off block cannot ask for a
    // huge level.
    let area = width.checked_mul(height).filter(|&area| area <= placed);
    let Some(area) = area else {
        return Err(MapError::ragged(
            level_line,
            format!(
                "level {} spans {}x{} tiles but its blocks only cover {}",
                z, width, height, placed
            ),
        ));
    };

    let mut level: Vec<Option<usize>> = vec![None; area as usize];
    for block in blocks {
        for (i, row) in block.cells.chunks(block.width as usize).enumerate() {
            let y = block.origin.y as u64 + block.height as u64 - 1 - i as u64;
            for (j, &cell) in row.iter().enumerate() {
                let x = block.origin.x as u64 + j as u64;
                let slot = &mut level[((y - 1) * width + (x - 1)) as usize];
                if slot.is_some() {
                    return Err(MapError::ragged(
                        block.row_lines[i],
                        format!("tile ({},{},{}) is placed by more than one block", x, y, z),
                    ));
                }
                *slot = Some(cell);
            }
        }
    }

    // Equal area and no overlaps means full coverage.
    let cells = level.into_iter().flatten().collect();
    Ok((width as u32, height as u32, cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectPathEntry, TileDefinition, TileKey};

    fn dictionary(keys: &[&str]) -> TileDictionary {
        let mut dict = TileDictionary::new();
        for key in keys {
            dict.insert(TileDefinition {
                key: TileKey::new(*key),
                entries: vec![ObjectPathEntry::new("/turf")],
                line: 1,
            })
            .unwrap();
        }
        dict
    }

    fn blocks(source: &str) -> Vec<RawBlock<'_>> {
        let mut cursor = Cursor::new(source);
        let mut out = Vec::new();
        while cursor.peek().unwrap().kind == TokenKind::LParen {
            out.push(parse_block(&mut cursor).unwrap());
        }
        out
    }

    #[test]
    fn test_parse_block_rows_and_lines() {
        let parsed = blocks("(2,1,1) = {\"\naa\nab\n\"}");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].origin, Coord::new(2, 1, 1));
        assert_eq!(parsed[0].rows, vec![(2, "aa"), (3, "ab")]);
    }

    #[test]
    fn test_tgm_columns_flip_y() {
        let dict = dictionary(&["aa", "ab", "ac", "ad"]);
        let source = "(1,1,1) = {\"\naa\nab\n\"}\n(2,1,1) = {\"\nac\nad\n\"}";
        let grid = assemble(&blocks(source), &dict, 1).unwrap();

        assert_eq!((grid.width(), grid.height(), grid.depth()), (2, 2, 1));
        // First row of a column is the top (highest y).
        assert_eq!(grid.cell(Coord::new(1, 2, 1)), Some(0));
        assert_eq!(grid.cell(Coord::new(1, 1, 1)), Some(1));
        assert_eq!(grid.cell(Coord::new(2, 2, 1)), Some(2));
        assert_eq!(grid.cell(Coord::new(2, 1, 1)), Some(3));
    }

    #[test]
    fn test_dmm_rows() {
        let dict = dictionary(&["aa", "ab"]);
        let grid = assemble(&blocks("(1,1,1) = {\"\naaab\nabab\n\"}"), &dict, 1).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.cell(Coord::new(1, 2, 1)), Some(0));
        assert_eq!(grid.cell(Coord::new(1, 1, 1)), Some(1));
    }

    #[test]
    fn test_dangling_key_reports_row_line() {
        let dict = dictionary(&["aa"]);
        let err = assemble(&blocks("(1,1,1) = {\"\naa\nzz\n\"}"), &dict, 1).unwrap_err();
        match err {
            MapError::DanglingKey { key, line } => {
                assert_eq!(key, "zz");
                assert_eq!(line, 3);
            }
            other => panic!("expected DanglingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_ragged_row_in_block() {
        let dict = dictionary(&["aa"]);
        let err = assemble(&blocks("(1,1,1) = {\"\naaaa\naa\n\"}"), &dict, 1).unwrap_err();
        assert!(matches!(err, MapError::RaggedGrid { line: 3, .. }));
    }

    #[test]
    fn test_short_column_leaves_gap() {
        let dict = dictionary(&["aa"]);
        let source = "(1,1,1) = {\"\naa\naa\n\"}\n(2,1,1) = {\"\naa\n\"}";
        let err = assemble(&blocks(source), &dict, 1).unwrap_err();
        assert!(matches!(err, MapError::RaggedGrid { .. }));
    }

    #[test]
    fn test_overlapping_blocks() {
        let dict = dictionary(&["aa"]);
        let source = "(1,1,1) = {\"\naa\n\"}\n(1,1,1) = {\"\naa\n\"}";
        let err = assemble(&blocks(source), &dict, 1).unwrap_err();
        assert!(err.to_string().contains("more than one block"));
    }

    #[test]
    fn test_levels_must_match() {
        let dict = dictionary(&["aa"]);
        let source = "(1,1,1) = {\"\naaaa\n\"}\n(1,1,2) = {\"\naaaaaa\n\"}";
        let err = assemble(&blocks(source), &dict, 1).unwrap_err();
        assert!(matches!(err, MapError::RaggedGrid { line: 4, .. }));
    }

    #[test]
    fn test_missing_level() {
        let dict = dictionary(&["aa"]);
        let source = "(1,1,1) = {\"\naa\n\"}\n(1,1,3) = {\"\naa\n\"}";
        let err = assemble(&blocks(source), &dict, 1).unwrap_err();
        assert!(err.to_string().contains("level 2 is missing"));
    }

    #[test]
    fn test_no_blocks() {
        let dict = dictionary(&["aa"]);
        let err = assemble(&[], &dict, 7).unwrap_err();
        assert!(matches!(err, MapError::RaggedGrid { line: 7, .. }));
    }

    #[test]
    fn test_far_off_block_is_ragged() {
        let dict = dictionary(&["a"]);
        let source = "(4294967295,4294967295,1) = {\"\naa\naa\n\"}";
        let err = assemble(&blocks(source), &dict, 1).unwrap_err();
        assert!(matches!(err, MapError::RaggedGrid { line: 1, .. }), "got {err:?}");

        let source = "(1,4294967295,1) = {\"\na\na\n\"}";
        let err = assemble(&blocks(source), &dict, 1).unwrap_err();
        assert!(matches!(err, MapError::RaggedGrid { line: 1, .. }), "got {err:?}");
    }

    #[test]
    fn test_bad_coordinate() {
        let mut cursor = Cursor::new("(0,1,1) = {\"\naa\n\"}");
        let err = parse_block(&mut cursor).unwrap_err();
        assert!(matches!(err, MapError::MalformedEntry { line: 1, .. }));
    }
}
