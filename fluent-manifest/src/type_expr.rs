//! Type expressions used in property declarations.
//!
//! ```text
//! type     := wildcard | named
//! wildcard := '?' [ ('extends' | 'super') type ]
//! named    := ident ('.' ident)* [ '<' type (',' type)* '>' ] ('[' ']')*
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Failure to parse a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct TypeExprError {
    /// Byte offset into the expression.
    pub offset: usize,
    pub message: String,
}

/// Direction of a wildcard bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardBound {
    Extends,
    Super,
}

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A named type with optional type arguments and array dimensions.
    Named {
        name: String,
        arguments: Vec<TypeExpr>,
        dimensions: u32,
    },
    /// `?`, optionally bounded.
    Wildcard {
        bound: Option<(WildcardBound, Box<TypeExpr>)>,
    },
}

impl TypeExpr {
    /// Parse a complete type expression.
    pub fn parse(input: &str) -> Result<Self, TypeExprError> {
        let mut parser = Parser { input, pos: 0 };
        let expr = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos < input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }

    /// Every name mentioned in the expression, outermost first.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Named {
                name, arguments, ..
            } => {
                names.push(name);
                for argument in arguments {
                    argument.collect_names(names);
                }
            }
            TypeExpr::Wildcard {
                bound: Some((_, bound)),
            } => bound.collect_names(names),
            TypeExpr::Wildcard { bound: None } => {}
        }
    }
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named {
                name,
                arguments,
                dimensions,
            } => {
                write!(f, "{}", name)?;
                if !arguments.is_empty() {
                    write!(f, "<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", argument)?;
                    }
                    write!(f, ">")?;
                }
                for _ in 0..*dimensions {
                    write!(f, "[]")?;
                }
                Ok(())
            }
            TypeExpr::Wildcard { bound: None } => write!(f, "?"),
            TypeExpr::Wildcard {
                bound: Some((WildcardBound::Extends, bound)),
            } => write!(f, "? extends {}", bound),
            TypeExpr::Wildcard {
                bound: Some((WildcardBound::Super, bound)),
            } => write!(f, "? super {}", bound),
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, message: &str) -> TypeExprError {
        TypeExprError {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), TypeExprError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn ident(&mut self) -> Result<&str, TypeExprError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut chars = self.rest().char_indices();
        match chars.next() {
            Some((_, c)) if c.is_alphabetic() || c == '_' || c == '$' => {}
            _ => return Err(self.error("expected a type name")),
        }
        let len = chars
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '$'))
            .map(|(i, _)| i)
            .unwrap_or(self.rest().len());
        self.pos += len;
        Ok(&self.input[start..self.pos])
    }

    fn parse_type(&mut self) -> Result<TypeExpr, TypeExprError> {
        if self.eat('?') {
            return self.parse_wildcard();
        }

        let mut name = self.ident()?.to_string();
        while self.eat('.') {
            name.push('.');
            name.push_str(self.ident()?);
        }

        let mut arguments = Vec::new();
        if self.eat('<') {
            loop {
                arguments.push(self.parse_type()?);
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('>')?;
        }

        let mut dimensions = 0;
        while self.eat('[') {
            self.expect(']')?;
            dimensions += 1;
        }

        Ok(TypeExpr::Named {
            name,
            arguments,
            dimensions,
        })
    }

    fn parse_wildcard(&mut self) -> Result<TypeExpr, TypeExprError> {
        self.skip_whitespace();
        let bound = if self.rest().starts_with("extends") {
            self.pos += "extends".len();
            Some(WildcardBound::Extends)
        } else if self.rest().starts_with("super") {
            self.pos += "super".len();
            Some(WildcardBound::Super)
        } else {
            None
        };

        let bound = match bound {
            Some(kind) => Some((kind, Box::new(self.parse_type()?))),
            None => None,
        };
        Ok(TypeExpr::Wildcard { bound })
    }
}
