//! Dotted path addressing for values in nested structures.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] for parsing rule
//! paths like `user.addresses.0.city`, plus the [`get`] accessor both engines
//! rely on to read nested input values.

use std::fmt::{self, Display};

use serde_json::Value;

/// A segment of a dotted field path.
///
/// Segments are plain keys. Whether a segment is used as an object key or an
/// array index is decided by the container it is applied to, so `items.0`
/// reads the first element of an array but the `"0"` key of an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment(String);

impl PathSegment {
    /// Creates a new segment from a key.
    pub fn new(key: impl Into<String>) -> Self {
        PathSegment(key.into())
    }

    /// Returns the raw key of this segment.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the segment as an array index, if it is a canonical
    /// non-negative integer (`"0"`, `"12"`, but not `"01"`).
    pub fn as_index(&self) -> Option<usize> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if self.0.len() > 1 && self.0.starts_with('0') {
            return None;
        }
        self.0.parse().ok()
    }

    /// Applies this segment to a container, returning the child value.
    ///
    /// Returns `None` if the key is absent, the index is out of bounds, or
    /// the container is not indexable.
    pub fn apply<'v>(&self, container: &'v Value) -> Option<&'v Value> {
        match container {
            Value::Object(map) => map.get(&self.0),
            Value::Array(items) => self.as_index().and_then(|idx| items.get(idx)),
            _ => None,
        }
    }
}

/// A parsed dotted path into a nested JSON-like structure.
///
/// # Example
///
/// ```rust
/// use triage::FieldPath;
/// use serde_json::json;
///
/// let path = FieldPath::parse("users.0.email");
/// let input = json!({"users": [{"email": "ann@example.com"}]});
///
/// assert_eq!(path.resolve(&input), Some(&json!("ann@example.com")));
/// assert_eq!(path.to_string(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dot-separated path.
    ///
    /// The empty string parses to the root path.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split('.').map(PathSegment::new).collect(),
        }
    }

    /// Returns a new path with a segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::new(key));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Descends into `container` following every segment.
    ///
    /// Returns `None` as soon as a segment is missing or the value at that
    /// point is neither an object nor an array.
    pub fn resolve<'v>(&self, container: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(container, |current, segment| segment.apply(current))
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment.0)?;
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

/// Reads the value at a dotted `path`, or `default` if it cannot be reached.
///
/// # Example
///
/// ```rust
/// use triage::path::get;
/// use serde_json::{json, Value};
///
/// assert_eq!(get(&json!({"a": {"b": 1}}), "a.b", Value::Null), json!(1));
/// assert_eq!(get(&json!({}), "a.b", Value::Null), Value::Null);
/// ```
pub fn get(container: &Value, path: &str, default: Value) -> Value {
    FieldPath::parse(path)
        .resolve(container)
        .cloned()
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_path_is_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(FieldPath::parse(""), path);
    }

    #[test]
    fn test_parse_nested() {
        let path = FieldPath::parse("user.email");
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_string(), "user.email");
    }

    #[test]
    fn test_resolve_nested_object() {
        let input = json!({"a": {"b": 1}});
        assert_eq!(FieldPath::parse("a.b").resolve(&input), Some(&json!(1)));
        assert_eq!(FieldPath::parse("a.c").resolve(&input), None);
    }

    #[test]
    fn test_resolve_root_returns_container() {
        let input = json!({"a": 1});
        assert_eq!(FieldPath::root().resolve(&input), Some(&input));
    }

    #[test]
    fn test_numeric_segment_indexes_arrays() {
        let input = json!({"items": ["x", "y"]});
        assert_eq!(FieldPath::parse("items.1").resolve(&input), Some(&json!("y")));
        assert_eq!(FieldPath::parse("items.2").resolve(&input), None);
    }

    #[test]
    fn test_numeric_segment_is_key_on_objects() {
        let input = json!({"items": {"0": "zero"}});
        assert_eq!(
            FieldPath::parse("items.0").resolve(&input),
            Some(&json!("zero"))
        );
    }

    #[test]
    fn test_non_numeric_segment_on_array() {
        let input = json!({"items": [1, 2]});
        assert_eq!(FieldPath::parse("items.first").resolve(&input), None);
        assert_eq!(FieldPath::parse("items.-1").resolve(&input), None);
    }

    #[test]
    fn test_leading_zero_segment_is_not_an_index() {
        let input = json!({"items": [1, 2, 3]});
        assert_eq!(FieldPath::parse("items.01").resolve(&input), None);
        assert_eq!(FieldPath::parse("items.0").resolve(&input), Some(&json!(1)));
        assert_eq!(PathSegment::new("00").as_index(), None);

        let keyed = json!({"items": {"01": "kept"}});
        assert_eq!(FieldPath::parse("items.01").resolve(&keyed), Some(&json!("kept")));
    }

    #[test]
    fn test_scalar_is_not_indexable() {
        let input = json!({"name": "Ann"});
        assert_eq!(FieldPath::parse("name.length").resolve(&input), None);
    }

    #[test]
    fn test_get_with_default() {
        assert_eq!(get(&json!({"a": {"b": 1}}), "a.b", Value::Null), json!(1));
        assert_eq!(get(&json!({}), "a.b", Value::Null), Value::Null);
        assert_eq!(get(&json!({}), "a", json!("fallback")), json!("fallback"));
    }

    #[test]
    fn test_parent_path() {
        let path = FieldPath::parse("users.0.email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "users.0");

        let root = parent.parent().unwrap().parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_push_is_immutable() {
        let base = FieldPath::parse("users");
        let first = base.push("0");
        let second = base.push("1");

        assert_eq!(base.to_string(), "users");
        assert_eq!(first.to_string(), "users.0");
        assert_eq!(second.to_string(), "users.1");
    }

    #[test]
    fn test_last_segment() {
        let path = FieldPath::parse("users.0");
        assert_eq!(path.last().map(PathSegment::as_str), Some("0"));
        assert_eq!(FieldPath::root().last(), None);
    }
}
