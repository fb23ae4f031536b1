//! Validation context and utilities for manifest parsing.

use std::{ops::Range, sync::Arc};

use miette::SourceSpan;
use toml::Spanned;

use crate::{Result, TypeExpr, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source and the current path through the manifest so errors
/// raised deep inside a type declaration can say where they came from.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "fluent.toml");
/// ctx.validate_type_name("com.example.Shape", None)?;
///
/// let nested = ctx.push("com.example.Drawing");
/// nested.validate_name("shapes", "property", None)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["com.example.Drawing"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "property in 'com.example.Drawing'" or just "type".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a quoted string value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_quoted_span(self.source.src(), value)
    }

    /// Validate a single identifier (property or type parameter name).
    pub fn validate_name(&self, name: &str, kind: &str, span: Option<SourceSpan>) -> Result<()> {
        let span = span.or_else(|| self.find_span(name));

        if is_java_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind), span));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            ));
        }

        Ok(())
    }

    /// Validate a dotted, fully-qualified type name.
    pub fn validate_type_name(&self, name: &str, span: Option<SourceSpan>) -> Result<()> {
        let span = span.or_else(|| self.find_span(name));

        for segment in name.split('.') {
            if is_java_keyword(segment) {
                return Err(self.source.reserved_keyword_error(
                    segment,
                    self.context_for("type"),
                    span,
                ));
            }
            if let Some(reason) = validate_identifier(segment) {
                return Err(self.source.invalid_identifier_error(
                    name,
                    self.context_for("type"),
                    reason,
                    span,
                ));
            }
        }

        Ok(())
    }

    /// Parse a property type expression and validate every name in it.
    pub fn validate_type_expr(&self, expr: &Spanned<String>) -> Result<TypeExpr> {
        let inner = string_span(expr.span());

        let parsed = TypeExpr::parse(expr.get_ref()).map_err(|e| {
            let at = SourceSpan::from((inner.offset() + e.offset, 1));
            self.source
                .invalid_type_error(expr.get_ref(), e.message, Some(at))
        })?;

        for name in parsed.names() {
            self.validate_type_name(name, Some(inner))?;
        }
        Ok(parsed)
    }

    /// Check that a descendant filter compiles as a regular expression.
    pub fn validate_pattern(&self, pattern: &Spanned<String>) -> Result<()> {
        regex::Regex::new(pattern.get_ref()).map_err(|e| {
            self.source.invalid_pattern_error(
                pattern.get_ref(),
                e,
                Some(string_span(pattern.span())),
            )
        })?;
        Ok(())
    }
}

/// Span of a string value without its surrounding quotes.
pub(crate) fn string_span(range: Range<usize>) -> SourceSpan {
    let len = range.len().saturating_sub(2);
    SourceSpan::from((range.start + 1, len))
}

/// Java reserved words that cannot be used as identifiers
pub(crate) const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
    // Literals
    "true", "false", "null",
];

/// Primitive type names, accepted inside type expressions.
pub(crate) const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

pub(crate) fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name) && !PRIMITIVES.contains(&name)
}

/// Find a quoted string value in the TOML source (`"value"` or `'value'`).
pub(crate) fn find_quoted_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

/// Validate that a name is a valid identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, '_' or '$'"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_alphanumeric() || c == '_' || c == '$')) {
        return Some("name must contain only letters, digits, '_' and '$'");
    }

    None
}
