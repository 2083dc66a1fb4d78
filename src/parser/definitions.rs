//! Definitions section: `"key" = (/path{var = value; ...},...)`.

use crate::error::{MapError, Result};
use crate::types::{
    ListItem, Number, ObjectPath, ObjectPathEntry, TileDefinition, TileDictionary, TileKey, Value,
};

use super::cursor::{unexpected, Cursor};
use super::lexer::TokenKind;

/// Parse one key definition. The cursor must be on the key string.
pub(super) fn parse_definition(cursor: &mut Cursor<'_>) -> Result<TileDefinition> {
    let key_token = cursor.next()?;
    let line = key_token.span.line();
    let TokenKind::QuotedString(raw_key) = key_token.kind else {
        return Err(unexpected(&key_token, "a quoted key"));
    };

    if raw_key.is_empty() || !raw_key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(MapError::malformed(
            line,
            format!("invalid key \"{}\": keys must be ASCII letters and digits", raw_key),
        ));
    }

    cursor.expect(&TokenKind::Equals)?;
    cursor.expect(&TokenKind::LParen)?;

    let mut entries = vec![parse_entry(cursor)?];
    loop {
        let token = cursor.next()?;
        match token.kind {
            TokenKind::Comma => entries.push(parse_entry(cursor)?),
            TokenKind::RParen => break,
            _ => return Err(unexpected(&token, "`,` or `)`")),
        }
    }

    Ok(TileDefinition {
        key: TileKey::new(raw_key),
        entries,
        line,
    })
}

/// All keys must share one width so grid rows can be split into keys.
pub(super) fn check_key_widths(dictionary: &TileDictionary) -> Result<()> {
    let width = dictionary.key_width();
    match dictionary.iter().find(|d| d.key.len() != width) {
        Some(short) => Err(MapError::malformed(
            short.line,
            format!(
                "key \"{}\" is {} characters wide, but the longest key is {}",
                short.key,
                short.key.len(),
                width
            ),
        )),
        None => Ok(()),
    }
}

fn parse_entry(cursor: &mut Cursor<'_>) -> Result<ObjectPathEntry> {
    let token = cursor.next()?;
    let TokenKind::Path(path) = token.kind else {
        return Err(unexpected(&token, "an object path"));
    };
    let mut entry = ObjectPathEntry::new(ObjectPath::new(path));

    if !cursor.eat(&TokenKind::LBrace)? {
        return Ok(entry);
    }
    if cursor.eat(&TokenKind::RBrace)? {
        return Ok(entry);
    }

    loop {
        let name_token = cursor.next()?;
        let TokenKind::Identifier(name) = name_token.kind else {
            return Err(unexpected(&name_token, "a variable name"));
        };
        if entry.var(name).is_some() {
            return Err(MapError::malformed(
                name_token.span.line(),
                format!("variable `{}` is set twice on {}", name, entry.path),
            ));
        }
        cursor.expect(&TokenKind::Equals)?;
        let value = parse_value(cursor)?;
        entry.vars.push((name.to_string(), value));

        let token = cursor.next()?;
        match token.kind {
            // A trailing separator before `}` is allowed.
            TokenKind::Semicolon | TokenKind::Comma => {
                if cursor.eat(&TokenKind::RBrace)? {
                    break;
                }
            }
            TokenKind::RBrace => break,
            _ => return Err(unexpected(&token, "`;` or `}`")),
        }
    }

    Ok(entry)
}

fn parse_value(cursor: &mut Cursor<'_>) -> Result<Value> {
    let token = cursor.next()?;
    let line = token.span.line();

    match token.kind {
        TokenKind::Number(raw) => Number::parse(raw)
            .map(Value::Number)
            .ok_or_else(|| MapError::malformed(line, format!("invalid number `{}`", raw))),
        TokenKind::QuotedString(raw) => Ok(Value::Text(raw.to_string())),
        TokenKind::Resource(raw) => Ok(Value::Resource(raw.to_string())),
        TokenKind::Path(path) => Ok(Value::Path(ObjectPath::new(path))),
        TokenKind::Identifier("null") => Ok(Value::Null),
        TokenKind::Identifier("list") => parse_list(cursor),
        _ => Err(unexpected(&token, "a value")),
    }
}

fn parse_list(cursor: &mut Cursor<'_>) -> Result<Value> {
    cursor.expect(&TokenKind::LParen)?;
    let mut items = Vec::new();

    if cursor.eat(&TokenKind::RParen)? {
        return Ok(Value::List(items));
    }

    loop {
        let value = parse_value(cursor)?;
        if cursor.eat(&TokenKind::Equals)? {
            items.push(ListItem::associated(value, parse_value(cursor)?));
        } else {
            items.push(ListItem::plain(value));
        }

        let token = cursor.next()?;
        match token.kind {
            TokenKind::Comma => continue,
            TokenKind::RParen => break,
            _ => return Err(unexpected(&token, "`,` or `)`")),
        }
    }

    Ok(Value::List(items))
}
