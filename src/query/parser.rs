//! Filter expression parser.

use super::ast::{Builtin, Query, Segment, Stage};
use super::error::QueryError;

/// Parser for filter expressions.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given expression.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Parses an expression into a [`Query`]. An empty expression is the identity.
    pub fn parse(input: &str) -> Result<Query, QueryError> {
        let mut parser = Parser::new(input);
        parser.parse_query()
    }

    fn parse_query(&mut self) -> Result<Query, QueryError> {
        let mut stages = Vec::new();

        self.skip_whitespace();
        if self.is_eof() {
            return Ok(Query::new(vec![Stage::Path(Vec::new())]));
        }

        loop {
            stages.push(self.parse_stage()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('|') => {
                    self.next();
                }
                Some(ch) => {
                    return Err(QueryError::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "'|' or end of input".to_string(),
                    })
                }
            }
        }

        Ok(Query::new(stages))
    }

    fn parse_stage(&mut self) -> Result<Stage, QueryError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch.is_alphabetic() => {
                let name = self.parse_identifier()?;
                Builtin::from_name(&name)
                    .map(Stage::Builtin)
                    .ok_or(QueryError::UnknownFunction(name))
            }
            Some('$') | Some('.') | Some('[') => self.parse_path().map(Stage::Path),
            Some(ch) => Err(QueryError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: "'.', '[' or a function name".to_string(),
            }),
            None => Err(QueryError::UnexpectedEnd {
                expected: "a filter stage".to_string(),
            }),
        }
    }

    fn parse_path(&mut self) -> Result<Vec<Segment>, QueryError> {
        let mut segments = Vec::new();

        if self.peek() == Some('$') {
            self.next();
        }

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.next();
                    if self.peek() == Some('.') {
                        segments.push(self.parse_recursive_descent()?);
                        continue;
                    }
                    self.skip_whitespace();
                    match self.peek() {
                        Some('*') => {
                            self.next();
                            segments.push(Segment::Wildcard);
                        }
                        Some('"') | Some('\'') => {
                            let name = self.parse_quoted()?;
                            segments.push(Segment::Child(name));
                        }
                        Some(ch) if is_identifier_char(ch) => {
                            let name = self.parse_identifier()?;
                            segments.push(Segment::Child(name));
                        }
                        // A lone `.` is the identity.
                        _ => {}
                    }
                }
                Some('[') => segments.push(self.parse_bracket_expression()?),
                _ => break,
            }
        }

        Ok(segments)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), QueryError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(QueryError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(QueryError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    fn parse_identifier(&mut self) -> Result<String, QueryError> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if is_identifier_char(ch) {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(QueryError::InvalidSyntax {
                message: "Expected identifier".to_string(),
            })
        } else {
            Ok(name)
        }
    }

    /// Parses the part of `..` after the first dot.
    fn parse_recursive_descent(&mut self) -> Result<Segment, QueryError> {
        self.expect('.')?;
        match self.peek() {
            Some('*') => {
                self.next();
                Ok(Segment::RecursiveDescent(None))
            }
            Some('"') | Some('\'') => Ok(Segment::RecursiveDescent(Some(self.parse_quoted()?))),
            Some(ch) if is_identifier_char(ch) => {
                Ok(Segment::RecursiveDescent(Some(self.parse_identifier()?)))
            }
            _ => Ok(Segment::RecursiveDescent(None)),
        }
    }

    /// Parses `[index]`, `[start:end]`, `['key', ...]`, `[*]` or `[]`.
    fn parse_bracket_expression(&mut self) -> Result<Segment, QueryError> {
        self.expect('[')?;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some(']') => {
                self.next();
                Segment::Wildcard
            }
            Some('*') => {
                self.next();
                self.expect(']')?;
                Segment::Wildcard
            }
            Some('\'') | Some('"') => {
                let mut properties = self.parse_bracket_strings()?;
                self.expect(']')?;
                if properties.len() == 1 {
                    Segment::Child(properties.remove(0))
                } else {
                    Segment::MultiProperty(properties)
                }
            }
            Some('-') | Some('0'..='9') | Some(':') => {
                let start = if self.peek() == Some(':') {
                    None
                } else {
                    Some(self.parse_number()?)
                };
                self.skip_whitespace();
                if self.peek() == Some(':') {
                    self.next();
                    self.parse_slice_end(start)?
                } else {
                    self.expect(']')?;
                    match start {
                        Some(idx) => Segment::Index(idx),
                        None => {
                            return Err(QueryError::InvalidSyntax {
                                message: "Expected index".to_string(),
                            })
                        }
                    }
                }
            }
            Some(ch) => {
                return Err(QueryError::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "index, slice, quoted key or '*'".to_string(),
                })
            }
            None => {
                return Err(QueryError::UnexpectedEnd {
                    expected: "']'".to_string(),
                })
            }
        };

        Ok(segment)
    }

    fn parse_slice_end(&mut self, start: Option<isize>) -> Result<Segment, QueryError> {
        self.skip_whitespace();
        let end = if self.peek() == Some(']') {
            None
        } else {
            Some(self.parse_number()?)
        };
        self.expect(']')?;

        if let (Some(s), Some(e)) = (start, end) {
            if s >= 0 && e >= 0 && s > e {
                return Err(QueryError::InvalidSyntax {
                    message: format!("Invalid slice: start ({}) > end ({})", s, e),
                });
            }
        }

        Ok(Segment::Slice(start, end))
    }

    /// Parses a comma separated list of quoted strings.
    fn parse_bracket_strings(&mut self) -> Result<Vec<String>, QueryError> {
        let mut properties = Vec::new();
        loop {
            self.skip_whitespace();
            properties.push(self.parse_quoted()?);
            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.next();
            } else {
                break;
            }
        }
        Ok(properties)
    }

    fn parse_quoted(&mut self) -> Result<String, QueryError> {
        let position = self.position;
        let quote = match self.next() {
            Some(q @ ('\'' | '"')) => q,
            Some(ch) => {
                return Err(QueryError::UnexpectedToken {
                    position,
                    found: ch.to_string(),
                    expected: "quoted string".to_string(),
                })
            }
            None => {
                return Err(QueryError::UnexpectedEnd {
                    expected: "quoted string".to_string(),
                })
            }
        };

        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => break,
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('/') => value.push('/'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some('u') => value.push(self.parse_unicode_escape()?),
                    Some(_) | None => {
                        return Err(QueryError::InvalidSyntax {
                            message: "Invalid escape sequence".to_string(),
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(QueryError::UnexpectedEnd {
                        expected: format!("closing quote {}", quote),
                    })
                }
            }
        }
        Ok(value)
    }

    fn parse_unicode_escape(&mut self) -> Result<char, QueryError> {
        let end = self.position + 4;
        let hex = self
            .input
            .get(self.position..end)
            .ok_or_else(|| QueryError::UnexpectedEnd {
                expected: "four hex digits".to_string(),
            })?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| QueryError::InvalidSyntax {
            message: format!("Invalid unicode escape: {}", hex),
        })?;
        self.position = end;
        char::from_u32(code).ok_or_else(|| QueryError::InvalidSyntax {
            message: format!("Invalid unicode escape: {}", hex),
        })
    }

    fn parse_number(&mut self) -> Result<isize, QueryError> {
        let mut num = String::new();
        if self.peek() == Some('-') {
            num.push('-');
            self.next();
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num.push(ch);
                self.next();
            } else {
                break;
            }
        }
        num.parse::<isize>()
            .map_err(|_| QueryError::InvalidSyntax {
                message: format!("Invalid number: '{}'", num),
            })
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '-'
}
