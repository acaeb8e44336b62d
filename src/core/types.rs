use crate::trace::units::nanos_to_millis;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// One element of a GraphQL field path: a field name or a list index.
///
/// Paths like `["user", 0, "email"]` mix both kinds. Segments are
/// opaque to the nesting algorithm beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A field name, e.g. `"user"`
    Field(String),
    /// A list index, e.g. `0`
    Index(u64),
}

impl PathSegment {
    /// Builds a field-name segment
    pub fn field<S: Into<String>>(name: S) -> Self {
        Self::Field(name.into())
    }

    /// Builds a list-index segment
    pub fn index(i: u64) -> Self {
        Self::Index(i)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// A field path. Paths are short in practice and stay inline.
pub type FieldPath = SmallVec<[PathSegment; 8]>;

/// A single field-resolver execution span from the tracing payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverSpan {
    /// Field path identifying where in the response this resolver ran.
    /// Unique per span within one trace, though path values may repeat
    /// textually at different tree positions.
    pub path: FieldPath,
    /// Type the resolved field lives on
    pub parent_type: String,
    /// Name of the resolved field
    pub field_name: String,
    /// GraphQL return type of the field
    pub return_type: String,
    /// Nanoseconds from request start
    pub start_offset: u64,
    /// Resolver execution time in nanoseconds
    pub duration: u64,
}

impl ResolverSpan {
    /// Returns the offset at which this span ends, in nanoseconds.
    ///
    /// May exceed the payload's total duration only through arithmetic
    /// saturation; spans legitimately extend to the end of the request.
    pub fn end_offset(&self) -> u64 {
        self.start_offset.saturating_add(self.duration)
    }

    /// Returns the span duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        nanos_to_millis(self.duration)
    }

    /// Returns the start offset in milliseconds
    pub fn start_offset_ms(&self) -> f64 {
        nanos_to_millis(self.start_offset)
    }

    /// Renders the path as a dotted string, e.g. `user.0.email`
    pub fn path_display(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// A minimal timed interval for the parsing and validation phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Nanoseconds from request start
    pub start_offset: u64,
    /// Phase duration in nanoseconds
    pub duration: u64,
}

impl Block {
    /// Returns the offset at which this block ends, in nanoseconds
    pub fn end_offset(&self) -> u64 {
        self.start_offset.saturating_add(self.duration)
    }
}

/// The `execution` object of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    /// Resolver spans in the order the server reported them, which is
    /// not guaranteed to be sorted by time.
    pub resolvers: Vec<ResolverSpan>,
}

/// A complete Apollo Tracing payload.
///
/// All span offsets are relative to the same origin (request start),
/// and `duration` is the root timeline extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracePayload {
    /// Tracing format version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Wall-clock request start, RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<FixedOffset>>,
    /// Wall-clock request end, RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<FixedOffset>>,
    /// Query parsing phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsing: Option<Block>,
    /// Query validation phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Block>,
    /// Total request duration in nanoseconds
    pub duration: u64,
    /// Resolver execution spans
    pub execution: Execution,
}

impl TracePayload {
    /// Returns the total request duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        nanos_to_millis(self.duration)
    }

    /// Returns the number of resolver spans in the payload
    pub fn resolver_count(&self) -> usize {
        self.execution.resolvers.len()
    }
}

/// A resolver span together with the spans nested directly under it.
///
/// The nesting engine populates only one level: entries in `nested`
/// always carry empty `nested` lists of their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedTrace {
    /// The span itself
    #[serde(flatten)]
    pub span: ResolverSpan,
    /// Spans attached directly under this one, in input order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedTrace>,
}

impl NestedTrace {
    /// Wraps a span as a root with no children
    pub fn new(span: ResolverSpan) -> Self {
        NestedTrace {
            span,
            nested: Vec::new(),
        }
    }

    /// Counts span appearances in this tree, including this span.
    ///
    /// A span attached under several roots counts once per appearance.
    pub fn appearance_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(NestedTrace::appearance_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn span(path: FieldPath, start_offset: u64, duration: u64) -> ResolverSpan {
        ResolverSpan {
            path,
            parent_type: "Query".to_string(),
            field_name: "field".to_string(),
            return_type: "String".to_string(),
            start_offset,
            duration,
        }
    }

    #[test]
    fn test_path_segment_deserializes_untagged() {
        let path: FieldPath =
            serde_json::from_str(r#"["user", 0, "email"]"#).unwrap();
        assert_eq!(
            path.as_slice(),
            &[
                PathSegment::field("user"),
                PathSegment::index(0),
                PathSegment::field("email"),
            ]
        );
    }

    #[test]
    fn test_negative_path_index_is_rejected() {
        let result: std::result::Result<FieldPath, _> =
            serde_json::from_str(r#"["user", -1]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_span_end_offset() {
        let s = span(smallvec![PathSegment::field("a")], 10, 20);
        assert_eq!(s.end_offset(), 30);
        assert_eq!(s.path_display(), "a");
    }

    #[test]
    fn test_path_display_mixes_segments() {
        let s = span(
            smallvec![
                PathSegment::field("user"),
                PathSegment::index(3),
                PathSegment::field("email"),
            ],
            0,
            1,
        );
        assert_eq!(s.path_display(), "user.3.email");
    }

    #[test]
    fn test_appearance_count_includes_nested() {
        let mut root = NestedTrace::new(span(smallvec![PathSegment::field("a")], 0, 100));
        root.nested
            .push(NestedTrace::new(span(smallvec![PathSegment::field("a")], 1, 2)));
        root.nested
            .push(NestedTrace::new(span(smallvec![PathSegment::field("a")], 3, 4)));
        assert_eq!(root.appearance_count(), 3);
    }

    #[test]
    fn test_resolver_span_wire_names_are_camel_case() {
        let s = span(smallvec![PathSegment::field("hero")], 5, 7);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["fieldName"], "field");
        assert_eq!(json["startOffset"], 5);
        assert_eq!(json["parentType"], "Query");
    }
}
