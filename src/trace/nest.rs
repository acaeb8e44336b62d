//! Trace nesting engine.
//!
//! Converts the flat, arbitrarily-ordered resolver list of a tracing
//! payload into a forest of root spans with directly nested children,
//! the structure the waterfall renders hierarchically.

use crate::core::{NestedTrace, ResolverSpan};

/// Builds the nesting forest from resolver spans in their given order.
///
/// Each incoming span is tested against every current root: if the
/// root's path segments all occur in the span's path and the span's
/// interval lies within the root's, the span is attached under that
/// root. A span that fits several roots is attached under every one of
/// them. A span that fits none becomes a new root.
///
/// Nesting is one level deep: spans are only ever tested against
/// top-level roots, so a "grandchild" in time and path terms lands in
/// the same `nested` list as its ancestors' other children. Both
/// `roots` and each `nested` list preserve input order.
///
/// Calling this twice on the same input yields structurally equal
/// forests; the engine reads the payload and owns no state.
pub fn nest(resolvers: &[ResolverSpan]) -> Vec<NestedTrace> {
    let mut roots: Vec<NestedTrace> = Vec::new();

    for resolver in resolvers {
        let mut was_nested = false;

        for root in &mut roots {
            if nests_under(resolver, &root.span) {
                root.nested.push(NestedTrace::new(resolver.clone()));
                was_nested = true;
            }
        }

        if !was_nested {
            roots.push(NestedTrace::new(resolver.clone()));
        }
    }

    roots
}

/// Tests whether `candidate` belongs under `parent`.
///
/// Path containment is a membership test, not a prefix test: every
/// segment of the parent's path must occur somewhere in the
/// candidate's path, at any position. Interval containment requires
/// the candidate to start no earlier and end no later than the parent.
fn nests_under(candidate: &ResolverSpan, parent: &ResolverSpan) -> bool {
    let path_contained = parent
        .path
        .iter()
        .all(|segment| candidate.path.contains(segment));

    path_contained
        && candidate.start_offset >= parent.start_offset
        && candidate.end_offset() <= parent.end_offset()
}

/// Counts span appearances across the whole forest.
///
/// With multi-parent attachment a span can appear in several `nested`
/// lists; each appearance counts.
pub fn span_appearances(forest: &[NestedTrace]) -> usize {
    forest.iter().map(NestedTrace::appearance_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldPath, PathSegment};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn span(path: &[PathSegment], start_offset: u64, duration: u64) -> ResolverSpan {
        ResolverSpan {
            path: FieldPath::from(path),
            parent_type: "Query".to_string(),
            field_name: path
                .last()
                .map(ToString::to_string)
                .unwrap_or_default(),
            return_type: "String".to_string(),
            start_offset,
            duration,
        }
    }

    fn field(name: &str) -> PathSegment {
        PathSegment::field(name)
    }

    #[test]
    fn test_child_nests_under_containing_root() {
        let a = span(&[field("a")], 0, 100);
        let b = span(&[field("a"), field("b")], 10, 20);

        let forest = nest(&[a.clone(), b.clone()]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].span, a);
        assert_eq!(forest[0].nested.len(), 1);
        assert_eq!(forest[0].nested[0].span, b);
        assert!(forest[0].nested[0].nested.is_empty());
    }

    #[test]
    fn test_disjoint_spans_stay_roots_in_input_order() {
        let spans = vec![
            span(&[field("c")], 200, 50),
            span(&[field("a")], 0, 50),
            span(&[field("b")], 100, 50),
        ];

        let forest = nest(&spans);

        assert_eq!(forest.len(), 3);
        for (root, input) in forest.iter().zip(&spans) {
            assert_eq!(&root.span, input);
            assert!(root.nested.is_empty());
        }
    }

    #[test]
    fn test_interval_containment_is_required() {
        // path matches but the candidate ends after the root
        let a = span(&[field("a")], 0, 100);
        let b = span(&[field("a"), field("b")], 50, 100);

        let forest = nest(&[a, b]);

        assert_eq!(forest.len(), 2);
        assert!(forest[0].nested.is_empty());
    }

    #[test]
    fn test_path_containment_is_membership_not_prefix() {
        // parent path elements occur out of position in the child path
        let a = span(&[field("b")], 0, 100);
        let b = span(&[field("b"), field("a")], 10, 20);
        let c = span(&[field("a"), field("b")], 40, 20);

        let forest = nest(&[a, b, c]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].nested.len(), 2);
    }

    #[test]
    fn test_span_extending_to_request_end_nests() {
        let a = span(&[field("a")], 0, 100);
        let b = span(&[field("a"), field("b")], 50, 50);

        let forest = nest(&[a, b]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].nested.len(), 1);
    }

    #[test]
    fn test_nesting_is_one_level_deep() {
        // c is a grandchild in path and time terms, but lands in the
        // same nested list as b
        let a = span(&[field("a")], 0, 100);
        let b = span(&[field("a"), field("b")], 10, 50);
        let c = span(&[field("a"), field("b"), field("c")], 20, 10);

        let forest = nest(&[a, b, c]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].nested.len(), 2);
        assert!(forest[0].nested.iter().all(|t| t.nested.is_empty()));
    }

    #[test]
    fn test_multi_parent_attachment() {
        // c fits under both a and b, which are mutually non-nestable
        let a = span(&[field("a")], 0, 100);
        let b = span(&[field("b")], 0, 100);
        let c = span(&[field("a"), field("b"), field("c")], 10, 10);

        let forest = nest(&[a, b, c.clone()]);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].nested.len(), 1);
        assert_eq!(forest[1].nested.len(), 1);
        assert_eq!(forest[0].nested[0].span, c);
        assert_eq!(forest[1].nested[0].span, c);
        // one appearance per qualifying parent
        assert_eq!(span_appearances(&forest), 4);
    }

    #[test]
    fn test_appearances_match_input_length_without_overlap() {
        let spans = vec![
            span(&[field("hero")], 0, 1000),
            span(&[field("hero"), field("name")], 100, 200),
            span(&[field("hero"), field("friends")], 300, 600),
            span(&[field("villain")], 1100, 400),
        ];

        let forest = nest(&spans);

        assert_eq!(span_appearances(&forest), spans.len());
    }

    #[test]
    fn test_later_span_can_become_parent_of_nothing() {
        // input order matters: a child arriving before its would-be
        // parent becomes a root of its own
        let child = span(&[field("a"), field("b")], 10, 20);
        let parent = span(&[field("a")], 0, 100);

        let forest = nest(&[child, parent]);

        assert_eq!(forest.len(), 2);
        assert!(forest[0].nested.is_empty());
        assert!(forest[1].nested.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_forest() {
        assert!(nest(&[]).is_empty());
    }

    #[test]
    fn test_nest_is_idempotent_over_input() {
        let spans = vec![
            span(&[field("a")], 0, 100),
            span(&[field("a"), field("b")], 10, 20),
            span(&[field("c")], 200, 10),
        ];

        assert_eq!(nest(&spans), nest(&spans));
    }

    #[test]
    fn test_paths_with_indices_nest() {
        let users: FieldPath = smallvec![field("users")];
        let a = span(&users, 0, 100);
        let b = span(
            &[field("users"), PathSegment::index(0), field("email")],
            10,
            20,
        );

        let forest = nest(&[a, b]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].nested.len(), 1);
    }
}
