//! Literal values used in variable overrides.

use std::fmt;

use super::ObjectPath;

/// A numeric literal, kept in its source spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    raw: String,
    value: f64,
}

impl Number {
    /// Parse a numeric literal. Returns `None` if `raw` is not a number.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.parse::<f64>().ok()?;
        Some(Self {
            raw: raw.to_string(),
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The literal as written in the map file.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self {
            raw: n.to_string(),
            value: n as f64,
        }
    }
}

/// An override value on an object path entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    /// Double-quoted text as written between the quotes, escapes intact.
    Text(String),
    /// Single-quoted resource file reference: `'icons/obj/pipes.dmi'`
    Resource(String),
    /// Type path reference: `/obj/item/wrench`
    Path(ObjectPath),
    Null,
    List(Vec<ListItem>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.value()),
            _ => None,
        }
    }
}

/// One element of a `list(...)` literal, optionally associated: `"a" = 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub value: Value,
    pub assoc: Option<Value>,
}

impl ListItem {
    pub fn plain(value: Value) -> Self {
        Self { value, assoc: None }
    }

    pub fn associated(value: Value, assoc: Value) -> Self {
        Self {
            value,
            assoc: Some(assoc),
        }
    }
}

/// Renders the value the way map files spell it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(n.raw()),
            Value::Text(raw) => write!(f, "\"{}\"", raw),
            Value::Resource(r) => write!(f, "'{}'", r),
            Value::Path(p) => write!(f, "{}", p),
            Value::Null => f.write_str("null"),
            Value::List(items) => {
                // Associative lists are spaced out, plain ones are not.
                let separator = if items.iter().any(|i| i.assoc.is_some()) {
                    ", "
                } else {
                    ","
                };
                f.write_str("list(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    write!(f, "{}", item.value)?;
                    if let Some(assoc) = &item.assoc {
                        write!(f, " = {}", assoc)?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keeps_spelling() {
        let n = Number::parse("1e+006").unwrap();
        assert_eq!(n.value(), 1_000_000.0);
        assert_eq!(Value::Number(n).to_string(), "1e+006");
        assert!(Number::parse("abc").is_none());
    }

    #[test]
    fn test_text_escaping() {
        let v = Value::Text(r#"a \"b\" \\c"#.to_string());
        assert_eq!(v.to_string(), r#""a \"b\" \\c""#);

        let macro_text = Value::Text(r"\improper Vault".to_string());
        assert_eq!(macro_text.to_string(), r#""\improper Vault""#);
    }

    #[test]
    fn test_list_display() {
        let plain = Value::List(vec![
            ListItem::plain(Value::Number(1.into())),
            ListItem::plain(Value::Number(2.into())),
        ]);
        assert_eq!(plain.to_string(), "list(1,2)");

        let assoc = Value::List(vec![
            ListItem::associated(Value::Text("a".to_string()), Value::Number(1.into())),
            ListItem::plain(Value::Null),
        ]);
        assert_eq!(assoc.to_string(), "list(\"a\" = 1, null)");
    }
}
