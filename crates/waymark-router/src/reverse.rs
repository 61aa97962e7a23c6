//! Reverse URL generation from raw templates.
//!
//! Works from the template text alone, never from a compiled pattern, so a
//! cached router can generate links from the `named` section of its artifact.

use url::form_urlencoded;

use crate::error::{RouterError, RouterResult};
use crate::template::{tokenize, Token};

/// Builds a URL for the route `name` with the given `template`.
///
/// - supplied placeholders are substituted
/// - unsupplied optional placeholders are dropped with their leading `/`
/// - repeated separators are collapsed
/// - parameters no placeholder consumed become the query string, in the
///   order they were supplied
///
/// Path values are inserted as given. Matching runs on undecoded paths, so
/// percent-encoding them here would change the value a match reports.
pub(crate) fn generate(name: &str, template: &str, params: &[(&str, &str)]) -> RouterResult<String> {
    let tokens = tokenize(template)?;
    let mut consumed: Vec<&str> = Vec::new();
    let mut path = String::with_capacity(template.len());

    for token in &tokens {
        match token {
            Token::Literal(text) => path.push_str(text),
            Token::Placeholder(placeholder) => {
                consumed.push(placeholder.name);
                let value = params
                    .iter()
                    .find(|(key, _)| *key == placeholder.name)
                    .map(|(_, value)| *value)
                    .filter(|value| !value.is_empty());

                match value {
                    Some(value) => path.push_str(value),
                    None if placeholder.optional => {
                        if path.ends_with('/') {
                            path.pop();
                        }
                    }
                    None => {
                        return Err(RouterError::MissingUrlParameter {
                            name: name.to_string(),
                            param: placeholder.name.to_string(),
                        });
                    }
                }
            }
        }
    }

    let mut url = collapse_separators(&path);

    let extra: Vec<(&str, &str)> = params
        .iter()
        .filter(|(key, _)| !consumed.contains(key))
        .copied()
        .collect();

    if !extra.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(extra)
            .finish();
        url.push('?');
        url.push_str(&query);
    }

    Ok(url)
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }

    if !out.starts_with('/') {
        out.insert(0, '/');
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}
