//! Matched path parameters.
//!
//! Values are stored in template order next to their names. Most routes bind
//! one to three parameters, so the pairs live inline in a small vector.

use indexmap::IndexMap;
use smallvec::SmallVec;

/// Parameters stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Parameters captured by a successful match.
///
/// Only non-empty captures are present: an optional parameter that was not
/// supplied in the path is absent, never an empty string.
///
/// # Example
///
/// ```rust
/// use waymark_router::Params;
///
/// let mut params = Params::new();
/// params.push("id", "42");
/// params.push("postId", "7");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert!(params.contains("postId"));
/// assert_eq!(params.get("tab"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty parameter set with room for `capacity` pairs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `name` was captured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.iter().any(|(n, _)| n == name)
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over `(name, value)` pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Copies the parameters into an ordered map.
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.inner.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}
