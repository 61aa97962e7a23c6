//! Path template compilation.
//!
//! [`PathCompiler::compile`] turns a template into an anchored [`Pattern`]
//! plus the ordered parameter names its capture groups bind to. Compilation
//! and matching are separate stages: the output is an immutable value that a
//! route, or a cache artifact, can hold on to.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CompileError;
use crate::params::Params;
use crate::template::{normalize_path, segment_count, tokenize, Placeholder, Token};

/// Expression used for placeholders without a constraint.
const DEFAULT_SEGMENT: &str = "[^/]+";

/// An anchored matching pattern.
///
/// Equality and serialization use the pattern source; the regex is rebuilt
/// from the source on deserialization.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Builds a pattern from an already-compiled source string.
    pub fn from_source(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&source)?;
        Ok(Self { source, regex })
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of capture groups, excluding the implicit whole-match group.
    pub fn capture_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Returns true if the whole path matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches `path` and binds captures to `names` in order.
    ///
    /// Captures that did not participate, or matched the empty string, are
    /// left out of the result; this is how omitted optional parameters
    /// disappear.
    pub fn extract(&self, path: &str, names: &[String]) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                if !value.as_str().is_empty() {
                    params.push(name.as_str(), value.as_str());
                }
            }
        }
        Some(params)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::from_source(source).map_err(serde::de::Error::custom)
    }
}

/// The output of compiling one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPath {
    /// Normalized template.
    pub template: String,
    /// Anchored pattern.
    pub pattern: Pattern,
    /// Parameter names, one per capture group.
    pub param_names: Vec<String>,
    /// Segment count with every placeholder present.
    pub segment_count: usize,
}

impl CompiledPath {
    /// Returns true if the template has no placeholders.
    pub fn is_static(&self) -> bool {
        self.param_names.is_empty()
    }
}

/// Compiles path templates.
///
/// # Grammar
///
/// | Placeholder | Meaning |
/// |---|---|
/// | `{name}` | required, one segment (`[^/]+`) |
/// | `{name?}` | optional; the preceding `/` is optional with it |
/// | `{name:regex}` | required, constrained to `regex` |
/// | `{name?:regex}` | optional and constrained |
///
/// # Example
///
/// ```rust
/// use waymark_router::PathCompiler;
///
/// let compiled = PathCompiler::compile(r"/users/{id:\d+}/posts/{slug?}").unwrap();
/// assert_eq!(compiled.param_names, vec!["id", "slug"]);
/// assert_eq!(compiled.pattern.as_str(), r"^/users/(\d+)/posts(?:/([^/]+))?$");
/// assert!(compiled.pattern.is_match("/users/7/posts"));
/// assert!(!compiled.pattern.is_match("/users/abc/posts"));
/// ```
pub struct PathCompiler;

impl PathCompiler {
    /// Compiles a template.
    pub fn compile(template: &str) -> Result<CompiledPath, CompileError> {
        let normalized = normalize_path(template).into_owned();
        let tokens = tokenize(&normalized)?;

        let mut body = String::with_capacity(normalized.len() * 2);
        let mut skeleton = String::with_capacity(normalized.len());
        let mut param_names: Vec<String> = Vec::new();
        let mut leading_optional = false;

        let mut iter = tokens.iter().enumerate().peekable();
        while let Some((index, token)) = iter.next() {
            match token {
                Token::Literal(text) => {
                    skeleton.push_str(text);
                    let next_is_optional = matches!(
                        iter.peek(),
                        Some((_, Token::Placeholder(p))) if p.optional
                    );
                    // The separator before an optional placeholder moves
                    // into the optional group.
                    let emitted = match text.strip_suffix('/') {
                        Some(stripped) if next_is_optional => {
                            // `/{x?}` alone also matches the root.
                            if index == 0 && stripped.is_empty() && tokens.len() == 2 {
                                leading_optional = true;
                            }
                            stripped
                        }
                        _ => text,
                    };
                    body.push_str(&regex::escape(emitted));
                }
                Token::Placeholder(placeholder) => {
                    if param_names.iter().any(|n| n == placeholder.name) {
                        return Err(CompileError::DuplicateParam {
                            template: normalized.clone(),
                            name: placeholder.name.to_string(),
                        });
                    }
                    let expr = Self::constraint_expr(&normalized, placeholder)?;
                    let owns_separator = placeholder.optional && follows_separator(&tokens, index);

                    if owns_separator {
                        body.push_str(&format!("(?:/({expr}))?"));
                    } else if placeholder.optional {
                        body.push_str(&format!("({expr})?"));
                    } else {
                        body.push_str(&format!("({expr})"));
                    }

                    skeleton.push('x');
                    param_names.push(placeholder.name.to_string());
                }
            }
        }

        let source = if leading_optional {
            format!("^(?:{body}|/)$")
        } else {
            format!("^{body}$")
        };

        let pattern = Pattern::from_source(source).map_err(|e| CompileError::InvalidPattern {
            template: normalized.clone(),
            reason: e.to_string(),
        })?;

        Ok(CompiledPath {
            segment_count: segment_count(&skeleton),
            template: normalized,
            pattern,
            param_names,
        })
    }

    fn constraint_expr<'a>(
        template: &str,
        placeholder: &Placeholder<'a>,
    ) -> Result<&'a str, CompileError> {
        let Some(constraint) = placeholder.constraint else {
            return Ok(DEFAULT_SEGMENT);
        };

        let invalid = |reason: String| CompileError::InvalidConstraint {
            template: template.to_string(),
            name: placeholder.name.to_string(),
            reason,
        };

        let regex = Regex::new(constraint).map_err(|e| invalid(e.to_string()))?;
        if regex.captures_len() != 1 {
            return Err(invalid(
                "capture groups are not allowed in constraints; use (?:...)".to_string(),
            ));
        }
        if has_anchor(constraint) {
            return Err(invalid(
                "anchors are not allowed in constraints; patterns are anchored already".to_string(),
            ));
        }
        Ok(constraint)
    }
}

/// True if `expr` contains `^`, `$`, `\A` or `\z` outside a character class.
fn has_anchor(expr: &str) -> bool {
    let mut chars = expr.chars();
    let mut class_depth = 0_usize;
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('A' | 'z') if class_depth == 0 => return true,
                _ => {}
            },
            '[' => class_depth += 1,
            ']' if class_depth > 0 => class_depth -= 1,
            '^' | '$' if class_depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// True if the literal before the placeholder at `index` ended in `/`.
fn follows_separator(tokens: &[Token<'_>], index: usize) -> bool {
    index > 0 && matches!(tokens[index - 1], Token::Literal(text) if text.ends_with('/'))
}
