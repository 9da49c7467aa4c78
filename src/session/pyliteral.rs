//! Python-literal structure parsing.
//!
//! Session structures pasted from a Python shell or a devtools dump often use
//! single quotes and the `True`/`False`/`None` spellings that strict JSON
//! rejects. This module evaluates that literal subset (dicts, lists, tuples,
//! strings, numbers, booleans, `None`) into JSON values without executing
//! anything.

use serde_json::{Map, Number, Value};

use crate::config::{ForgeError, Result};

/// Parses a Python literal expression into a JSON value.
///
/// Accepts quoted strings (single or double), integers, floats,
/// `True`/`False`/`None`, lists, tuples, and dicts with string keys.
/// Tuples come back as arrays; duplicate dict keys keep the last value.
///
/// # Errors
///
/// Returns [`ForgeError::InvalidStructure`] when the input is not a literal
/// in this subset or nests containers deeper than the parser accepts.
pub fn parse_literal(input: &str) -> Result<Value> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
        depth: 0,
    };
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos != parser.chars.len() {
        return Err(parser.error("trailing characters after literal"));
    }
    Ok(value)
}

/// Deepest container nesting accepted, in line with the strict-JSON
/// attempt's recursion limit.
const MAX_DEPTH: usize = 128;

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn error(&self, detail: &str) -> ForgeError {
        ForgeError::InvalidStructure(format!("{detail} at position {}", self.pos))
    }

    /// Counts one level of container nesting, erroring out before
    /// pathological input can exhaust the stack.
    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> Result<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{expected}'")))
        }
    }

    /// Consumes `word` if it appears at the cursor.
    fn eat_keyword(&mut self, word: &str) -> bool {
        let end = self.pos + word.chars().count();
        if end <= self.chars.len() && self.chars[self.pos..end].iter().copied().eq(word.chars()) {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.parse_dict(),
            Some('[') => self.parse_sequence(']'),
            Some('(') => self.parse_sequence(')'),
            Some('\'' | '"') => self.parse_string().map(Value::String),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.parse_number(),
            Some(_) => self.parse_keyword(),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_dict(&mut self) -> Result<Value> {
        self.descend()?;
        self.pos += 1;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                self.depth -= 1;
                return Ok(Value::Object(map));
            }
            let key = match self.peek() {
                Some('\'' | '"') => self.parse_string()?,
                _ => return Err(self.error("dict keys must be quoted strings")),
            };
            self.skip_whitespace();
            self.eat(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {}
                _ => return Err(self.error("expected ',' or '}' in dict")),
            }
        }
    }

    fn parse_sequence(&mut self, close: char) -> Result<Value> {
        self.descend()?;
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.pos += 1;
                self.depth -= 1;
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(c) if c == close => {}
                _ => return Err(self.error(&format!("expected ',' or '{close}' in sequence"))),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let Some(quote) = self.bump() else {
            return Err(self.error("expected a string"));
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self
                        .bump()
                        .ok_or_else(|| self.error("unterminated escape"))?;
                    match escaped {
                        '\\' => out.push('\\'),
                        '\'' => out.push('\''),
                        '"' => out.push('"'),
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        'x' => out.push(self.hex_escape(2)?),
                        'u' => out.push(self.hex_escape(4)?),
                        other => {
                            return Err(self.error(&format!("unsupported escape '\\{other}'")));
                        }
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn hex_escape(&mut self, digits: u32) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid hex escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error("hex escape is not a valid character"))
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => self.pos += 1,
                '.' | 'e' | 'E' => {
                    is_float = true;
                    self.pos += 1;
                }
                // Exponent sign, as in 1e-5.
                '-' | '+' if is_float => self.pos += 1,
                _ => break,
            }
        }
        let lexeme: String = self.chars[start..self.pos].iter().collect();
        if !is_float {
            if let Ok(n) = lexeme.parse::<i64>() {
                return Ok(Value::Number(Number::from(n)));
            }
            // Unsigned values past i64::MAX still fit a JSON number.
            if let Ok(n) = lexeme.parse::<u64>() {
                return Ok(Value::Number(Number::from(n)));
            }
        }
        lexeme
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.error("not a valid number"))
    }

    fn parse_keyword(&mut self) -> Result<Value> {
        for (word, value) in [
            ("True", Value::Bool(true)),
            ("False", Value::Bool(false)),
            ("None", Value::Null),
        ] {
            if self.eat_keyword(word) {
                if matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                    return Err(self.error("unknown identifier"));
                }
                return Ok(value);
            }
        }
        Err(self.error("expected a Python literal"))
    }
}
