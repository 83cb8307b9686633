//! JSON description parsing and serialization
//!
//! A description file holds either one sprite object or an array of them:
//!
//! ```text
//! { "grid": ["..R.."], "palette": { ".": "transparent", "R": "#FF0000" } }
//! [ { "sprite_name": "a", "grid": [...], "palette": {...} }, ... ]
//! ```

use std::io::{self, Read, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::models::{Sprite, SpriteDocument};

/// Error type for description parsing failures.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

/// Parse a description string into its ordered sprites.
///
/// # Examples
///
/// ```
/// use spritegrid::parser::parse_document;
///
/// let sprites = parse_document(r##"{"grid": ["R"], "palette": {"R": "#FF0000"}}"##).unwrap();
/// assert_eq!(sprites.len(), 1);
/// ```
pub fn parse_document(input: &str) -> Result<Vec<Sprite>, ParseError> {
    from_value(serde_json::from_str(input)?)
}

/// Parse a description from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Sprite>, ParseError> {
    from_value(serde_json::from_reader(io::BufReader::new(reader))?)
}

/// Pick the root shape by hand so shape errors name the missing field
/// instead of failing every untagged variant at once.
fn from_value(value: Value) -> Result<Vec<Sprite>, ParseError> {
    let document = match value {
        Value::Array(_) => SpriteDocument::Sheet(serde_json::from_value(value)?),
        Value::Object(_) => SpriteDocument::Single(serde_json::from_value(value)?),
        other => {
            return Err(ParseError {
                message: format!(
                    "root must be a sprite object or an array of sprite objects, found {}",
                    json_kind(&other)
                ),
                line: 1,
                column: 1,
            })
        }
    };
    Ok(document.into_sprites())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialize sprites as a sheet array.
///
/// Pretty output uses two-space indentation. Non-ASCII symbols are written
/// verbatim, never escaped.
pub fn to_json(sprites: &[Sprite], pretty: bool) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, sprites, pretty)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize sprites as a sheet array into a writer.
pub fn write_json<W: Write>(writer: W, sprites: &[Sprite], pretty: bool) -> serde_json::Result<()> {
    if pretty {
        let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"  "));
        sprites.serialize(&mut ser)
    } else {
        serde_json::to_writer(writer, sprites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_object() {
        let sprites =
            parse_document(r##"{"grid": [".R"], "palette": {".": "transparent", "R": "#FF0000"}}"##)
                .unwrap();
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].grid, vec![".R"]);
    }

    #[test]
    fn test_parse_sheet_keeps_order() {
        let input = r##"[
            {"sprite_name": "first", "grid": ["A"], "palette": {"A": "#000000"}},
            {"sprite_name": "second", "grid": ["B"], "palette": {"B": "#FFFFFF"}}
        ]"##;
        let sprites = parse_document(input).unwrap();
        let names: Vec<_> = sprites.iter().map(|s| s.name.as_deref()).collect();
        assert_eq!(names, vec![Some("first"), Some("second")]);
    }

    #[test]
    fn test_parse_reader() {
        let input = br##"[{"grid": ["A"], "palette": {"A": "#000000"}}]"##;
        let sprites = parse_reader(&input[..]).unwrap();
        assert_eq!(sprites.len(), 1);
    }

    #[test]
    fn test_parse_error_has_location() {
        let err = parse_document("{\n  \"grid\": [\"A\"\n}").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_parse_missing_palette() {
        let err = parse_document(r#"{"grid": ["A"]}"#).unwrap_err();
        assert!(err.message.contains("palette"), "{}", err.message);
    }

    #[test]
    fn test_parse_rejects_scalar_root() {
        let err = parse_document("42").unwrap_err();
        assert!(err.message.contains("found a number"));
    }

    #[test]
    fn test_compact_json() {
        let sprite = Sprite::new(["A"], [('A', "#FF0000")]).with_name("dot");
        assert_eq!(
            to_json(&[sprite], false).unwrap(),
            r##"[{"sprite_name":"dot","grid":["A"],"palette":{"A":"#FF0000"}}]"##
        );
    }

    #[test]
    fn test_to_json_empty_sheet() {
        assert_eq!(to_json(&[], false).unwrap(), "[]");
        assert_eq!(to_json(&[], true).unwrap(), "[]");
    }

    #[test]
    fn test_pretty_json_indent() {
        let sprite = Sprite::new(["A"], [('A', "#FF0000")]);
        let json = to_json(&[sprite], true).unwrap();
        assert!(json.starts_with("[\n  {\n    \"grid\": [\n      \"A\"\n    ],"));
    }

    #[test]
    fn test_non_ascii_not_escaped() {
        let sprite = Sprite::new(["é"], [('é', "#FF0000")]);
        let json = to_json(&[sprite], false).unwrap();
        assert!(json.contains("\"é\""));
    }

    #[test]
    fn test_json_round_trip() {
        let sprites = vec![
            Sprite::new(["AB", "BA"], [('A', "transparent"), ('B', "#0000FF")]).with_name("x"),
            Sprite::new(["C"], [('C', "#123456")]),
        ];
        let parsed = parse_document(&to_json(&sprites, true).unwrap()).unwrap();
        assert_eq!(parsed, sprites);
    }
}
