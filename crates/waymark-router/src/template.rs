//! Path template tokenizer.
//!
//! Splits a template such as `/users/{id:\d+}/posts/{slug?}` into literal
//! runs and placeholders. Both the compiler and URL generation work from
//! these tokens, so a template means the same thing in either direction.

use std::borrow::Cow;

use crate::error::CompileError;

/// One piece of a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text, matched verbatim.
    Literal(&'a str),
    /// A `{...}` placeholder.
    Placeholder(Placeholder<'a>),
}

/// A parsed `{name}`, `{name?}`, `{name:regex}` or `{name?:regex}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placeholder<'a> {
    pub name: &'a str,
    pub optional: bool,
    pub constraint: Option<&'a str>,
}

/// Tokenizes a template, tracking brace depth so constraints may contain
/// quantifiers like `\d{2,4}`.
pub(crate) fn tokenize(template: &str) -> Result<Vec<Token<'_>>, CompileError> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut chars = template.char_indices();

    while let Some((open, c)) = chars.next() {
        match c {
            '{' => {
                if literal_start < open {
                    tokens.push(Token::Literal(&template[literal_start..open]));
                }

                let mut depth = 1_usize;
                let mut close = None;
                for (j, inner) in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                close = Some(j);
                                break;
                            }
                        }
                        _ => {}
                    }
                }

                let close = close.ok_or_else(|| CompileError::UnbalancedBraces {
                    template: template.to_string(),
                    position: open,
                })?;

                let placeholder = parse_placeholder(template, &template[open + 1..close])?;
                tokens.push(Token::Placeholder(placeholder));
                literal_start = close + 1;
            }
            '}' => {
                return Err(CompileError::UnbalancedBraces {
                    template: template.to_string(),
                    position: open,
                });
            }
            _ => {}
        }
    }

    if literal_start < template.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }

    Ok(tokens)
}

fn parse_placeholder<'a>(template: &str, body: &'a str) -> Result<Placeholder<'a>, CompileError> {
    let (head, constraint) = match body.split_once(':') {
        Some((head, constraint)) => (head, Some(constraint)),
        None => (body, None),
    };

    let (name, optional) = match head.strip_suffix('?') {
        Some(name) => (name, true),
        None => (head, false),
    };

    if !is_valid_name(name) {
        return Err(CompileError::InvalidParamName {
            template: template.to_string(),
            name: name.to_string(),
        });
    }

    if constraint.is_some_and(str::is_empty) {
        return Err(CompileError::InvalidConstraint {
            template: template.to_string(),
            name: name.to_string(),
            reason: "constraint is empty".to_string(),
        });
    }

    Ok(Placeholder {
        name,
        optional,
        constraint,
    })
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Normalizes a path to a single leading slash and no trailing slash
/// (the root path stays `/`).
///
/// # Example
///
/// ```rust
/// use waymark_router::normalize_path;
///
/// assert_eq!(normalize_path("users/42/"), "/users/42");
/// assert_eq!(normalize_path("//"), "/");
/// assert_eq!(normalize_path("/users"), "/users");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let already_normal = path == "/"
        || (path.starts_with('/') && !path.starts_with("//") && !path.ends_with('/'));
    if already_normal {
        return Cow::Borrowed(path);
    }

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{trimmed}"))
    }
}

/// Counts the non-empty `/`-separated segments of a path.
pub fn segment_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}
