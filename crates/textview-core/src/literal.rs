//! Permissive structured-literal parser.
//!
//! Backs the pretty-print transform's fallback path: text that is not strict
//! JSON but reads as an object/array literal (unquoted identifier keys,
//! single-quoted strings, trailing commas) is still accepted. The parser is a
//! plain recursive-descent scanner over the input; it never evaluates the
//! text.
//!
//! Output is a [`serde_json::Value`], so the caller serializes it exactly
//! like the strict-parse result.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Errors from the permissive literal parser, with byte offsets into the
/// input.
#[derive(Debug, Error)]
pub enum LiteralError {
    /// Input ended while a value, string, or container was still open.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A character that cannot start or continue the expected construct.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar {
        /// Byte offset of the offending character.
        offset: usize,
        /// The character found.
        found: char,
    },
    /// A numeric token that did not parse as a JSON number.
    #[error("invalid number at offset {offset}")]
    InvalidNumber {
        /// Byte offset where the number started.
        offset: usize,
    },
    /// Input continued after the top-level value was complete.
    #[error("trailing characters at offset {offset}")]
    TrailingCharacters {
        /// Byte offset of the first trailing character.
        offset: usize,
    },
}

/// Parse a permissive object/array/scalar literal into a JSON value.
pub fn parse(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if let Some((offset, _)) = parser.peek_indexed() {
        return Err(LiteralError::TrailingCharacters { offset });
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn peek_indexed(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn peek(&mut self) -> Option<char> {
        self.peek_indexed().map(|(_, c)| c)
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.bump() {
            Some((_, c)) if c == expected => Ok(()),
            Some((offset, found)) => Err(LiteralError::UnexpectedChar { offset, found }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_whitespace();
        match self.peek_indexed() {
            None => Err(LiteralError::UnexpectedEnd),
            Some((_, '{')) => self.parse_object(),
            Some((_, '[')) => self.parse_array(),
            Some((_, '"')) | Some((_, '\'')) => self.parse_string().map(Value::String),
            Some((_, c)) if c == '-' || c == '+' || c.is_ascii_digit() => self.parse_number(),
            Some((_, c)) if is_ident_start(c) => self.parse_word(),
            Some((offset, found)) => Err(LiteralError::UnexpectedChar { offset, found }),
        }
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            match self.peek_indexed() {
                Some((_, '}')) => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                Some(_) => {
                    let key = self.parse_key()?;
                    self.skip_whitespace();
                    self.expect(':')?;
                    let value = self.parse_value()?;
                    map.insert(key, value);
                    self.skip_whitespace();
                    match self.peek_indexed() {
                        Some((_, ',')) => {
                            self.bump();
                        }
                        Some((_, '}')) => {}
                        Some((offset, found)) => {
                            return Err(LiteralError::UnexpectedChar { offset, found });
                        }
                        None => return Err(LiteralError::UnexpectedEnd),
                    }
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_indexed() {
                Some((_, ']')) => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    self.skip_whitespace();
                    match self.peek_indexed() {
                        Some((_, ',')) => {
                            self.bump();
                        }
                        Some((_, ']')) => {}
                        Some((offset, found)) => {
                            return Err(LiteralError::UnexpectedChar { offset, found });
                        }
                        None => return Err(LiteralError::UnexpectedEnd),
                    }
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// Object keys: quoted (either quote style) or bare identifiers.
    fn parse_key(&mut self) -> Result<String, LiteralError> {
        match self.peek_indexed() {
            Some((_, '"')) | Some((_, '\'')) => self.parse_string(),
            Some((start, c)) if is_ident_start(c) => {
                let mut end = start;
                while let Some((offset, c)) = self.peek_indexed() {
                    if is_ident_continue(c) {
                        end = offset + c.len_utf8();
                        self.bump();
                    } else {
                        break;
                    }
                }
                Ok(self.input[start..end].to_string())
            }
            Some((offset, found)) => Err(LiteralError::UnexpectedChar { offset, found }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn parse_string(&mut self) -> Result<String, LiteralError> {
        let Some((_, quote)) = self.bump() else {
            return Err(LiteralError::UnexpectedEnd);
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some((_, c)) if c == quote => return Ok(out),
                Some((offset, '\\')) => match self.bump() {
                    None => return Err(LiteralError::UnexpectedEnd),
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, 'b')) => out.push('\u{0008}'),
                    Some((_, 'f')) => out.push('\u{000C}'),
                    Some((_, '0')) => out.push('\0'),
                    Some((_, 'u')) => out.push(self.parse_unicode_escape(offset)?),
                    // Everything else escapes to itself: \' \" \\ \/ ...
                    Some((_, c)) => out.push(c),
                },
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn parse_unicode_escape(&mut self, escape_offset: usize) -> Result<char, LiteralError> {
        let mut code = 0u32;
        for _ in 0..4 {
            match self.bump() {
                Some((_, c)) if c.is_ascii_hexdigit() => {
                    code = code * 16 + c.to_digit(16).unwrap_or(0);
                }
                Some((offset, found)) => {
                    return Err(LiteralError::UnexpectedChar { offset, found });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
        char::from_u32(code).ok_or(LiteralError::UnexpectedChar {
            offset: escape_offset,
            found: '\\',
        })
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let Some((start, _)) = self.peek_indexed() else {
            return Err(LiteralError::UnexpectedEnd);
        };
        let mut end = start;
        while let Some((offset, c)) = self.peek_indexed() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                end = offset + c.len_utf8();
                self.bump();
            } else {
                break;
            }
        }
        let token = &self.input[start..end];
        if let Ok(i) = token.parse::<i64>() {
            return Ok(Value::Number(Number::from(i)));
        }
        if let Ok(f) = token.parse::<f64>() {
            if let Some(n) = Number::from_f64(f) {
                return Ok(Value::Number(n));
            }
        }
        Err(LiteralError::InvalidNumber { offset: start })
    }

    /// Bare words: `true` / `false` / `null` (and `undefined`, mapped to
    /// null to keep object-literal inputs round-trippable).
    fn parse_word(&mut self) -> Result<Value, LiteralError> {
        let Some((start, _)) = self.peek_indexed() else {
            return Err(LiteralError::UnexpectedEnd);
        };
        let mut end = start;
        while let Some((offset, c)) = self.peek_indexed() {
            if is_ident_continue(c) {
                end = offset + c.len_utf8();
                self.bump();
            } else {
                break;
            }
        }
        match &self.input[start..end] {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            word => Err(LiteralError::UnexpectedChar {
                offset: start,
                found: word.chars().next().unwrap_or('\0'),
            }),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unquoted_keys() {
        assert_eq!(parse("{a: 1, b: 2}").unwrap(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_single_quoted_strings() {
        assert_eq!(
            parse("{'name': 'value', kind: 'x'}").unwrap(),
            json!({"name": "value", "kind": "x"})
        );
    }

    #[test]
    fn test_trailing_commas() {
        assert_eq!(parse("[1, 2, 3,]").unwrap(), json!([1, 2, 3]));
        assert_eq!(parse("{a: 1,}").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_nested_containers() {
        assert_eq!(
            parse("{a: [1, {b: 'c'}], d: null}").unwrap(),
            json!({"a": [1, {"b": "c"}], "d": null})
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse("[-1, 2.5, 1e3]").unwrap(), json!([-1, 2.5, 1000.0]));
    }

    #[test]
    fn test_bare_words() {
        assert_eq!(
            parse("{a: true, b: false, c: null, d: undefined}").unwrap(),
            json!({"a": true, "b": false, "c": null, "d": null})
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            parse(r#"{a: 'it\'s', b: "x\ny", c: "A"}"#).unwrap(),
            json!({"a": "it's", "b": "x\ny", "c": "A"})
        );
    }

    #[test]
    fn test_rejects_arbitrary_code() {
        // The whole point of this parser: expressions never evaluate.
        assert!(parse("alert(1)").is_err());
        assert!(parse("1 + 2").is_err());
        assert!(parse("{a: foo()}").is_err());
    }

    #[test]
    fn test_rejects_truncated_input() {
        assert!(matches!(parse("{a: 1"), Err(LiteralError::UnexpectedEnd)));
        assert!(matches!(parse("'open"), Err(LiteralError::UnexpectedEnd)));
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        assert!(matches!(
            parse("{} extra"),
            Err(LiteralError::TrailingCharacters { .. })
        ));
    }
}
