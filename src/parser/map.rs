//! Map file parser.
//!
//! Parses grid map text into a `MapFile`: the definitions section first,
//! then the grid section. Any error is fatal; there is no partial map.

use crate::error::{MapError, Result};
use crate::types::{MapFile, TileDictionary};

use super::cursor::{unexpected, Cursor};
use super::definitions::{check_key_widths, parse_definition};
use super::grid::{assemble, parse_block};
use super::lexer::TokenKind;

/// Parse the full text of a map file.
pub fn parse_map(source: &str) -> Result<MapFile> {
    let mut cursor = Cursor::new(source);

    let mut dictionary = TileDictionary::new();
    while matches!(cursor.peek()?.kind, TokenKind::QuotedString(_)) {
        let definition = parse_definition(&mut cursor)?;
        let key = definition.key.to_string();
        let line = definition.line;
        if let Err(existing) = dictionary.insert(definition) {
            return Err(MapError::DuplicateKey {
                key,
                line,
                first_line: existing.line,
            });
        }
    }
    check_key_widths(&dictionary)?;

    let mut blocks = Vec::new();
    while cursor.peek()?.kind == TokenKind::LParen {
        blocks.push(parse_block(&mut cursor)?);
    }

    let end = cursor.next()?;
    match end.kind {
        TokenKind::Eof => {}
        TokenKind::QuotedString(_) => {
            return Err(MapError::malformed(
                end.span.line(),
                "key definitions must come before the grid section",
            ))
        }
        _ => return Err(unexpected(&end, "`(` or end of file")),
    }

    let grid = assemble(&blocks, &dictionary, end.span.line())?;
    Ok(MapFile::new(dictionary, grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    const TGM: &str = r#"//MAP CONVERTED BY dmm2tgm.py THIS HEADER COMMENT PREVENTS RECONVERSION, DO NOT REMOVE
"aa" = (
/turf/space,
/area/space)
"ab" = (
/obj/structure/cable{
	d2 = 4;
	icon_state = "0-4"
	},
/turf/simulated/floor,
/area/station)

(1,1,1) = {"
aa
ab
"}
(2,1,1) = {"
ab
aa
"}
"#;

    #[test]
    fn test_parse_tgm() {
        let map = parse_map(TGM).unwrap();
        assert_eq!(map.dictionary.len(), 2);
        assert_eq!(map.grid.width(), 2);
        assert_eq!(map.grid.height(), 2);
        assert_eq!(map.grid.depth(), 1);

        let tile = map.resolve(Coord::new(1, 1, 1)).unwrap();
        assert_eq!(tile.key.as_str(), "ab");
        assert_eq!(tile.entries.len(), 3);
        assert_eq!(tile.entries[0].path.as_str(), "/obj/structure/cable");

        let top_left = map.resolve(Coord::new(1, 2, 1)).unwrap();
        assert_eq!(top_left.key.as_str(), "aa");
    }

    #[test]
    fn test_duplicate_key() {
        let source = "\"aa\" = (/turf)\n\"aa\" = (/area)\n(1,1,1) = {\"\naa\n\"}";
        match parse_map(source).unwrap_err() {
            MapError::DuplicateKey {
                key,
                line,
                first_line,
            } => {
                assert_eq!(key, "aa");
                assert_eq!(line, 2);
                assert_eq!(first_line, 1);
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_key_widths() {
        let source = "\"aa\" = (/turf)\n\"b\" = (/area)\n(1,1,1) = {\"\naa\n\"}";
        let err = parse_map(source).unwrap_err();
        assert!(matches!(err, MapError::MalformedEntry { line: 2, .. }));
    }

    #[test]
    fn test_definition_after_grid() {
        let source = "\"aa\" = (/turf)\n(1,1,1) = {\"\naa\n\"}\n\"ab\" = (/area)";
        let err = parse_map(source).unwrap_err();
        assert!(matches!(err, MapError::MalformedEntry { line: 5, .. }));
    }

    #[test]
    fn test_lex_error_surfaces() {
        let source = "\"aa\" = (/turf{name = \"oops})\n";
        let err = parse_map(source).unwrap_err();
        assert!(matches!(err, MapError::Lex(_)));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_empty_file_has_no_grid() {
        let err = parse_map("").unwrap_err();
        assert!(matches!(err, MapError::RaggedGrid { .. }));
    }

    #[test]
    fn test_grid_without_definitions() {
        let err = parse_map("(1,1,1) = {\"\naa\n\"}").unwrap_err();
        assert!(matches!(err, MapError::DanglingKey { line: 2, .. }));
    }
}
