/*!
 * Tests for bounded traversal, first/last lookups and positional deletion
 */

use subline::{Bound, Chain, Line, LineSet, NodeId, SubtitleError};

use crate::common;

/// Test that bounded counts match a direct count over the spans
#[test]
fn test_each_withEveryBound_shouldMatchSpanCounts() {
    for count in [1_i64, 3, 10] {
        let (subtitle, _) = common::create_numbered_subtitle(count);

        for bound in 0..=count + 2 {
            let before = subtitle.each(Some(Bound::Time(bound)), None).unwrap().count() as i64;
            let after = subtitle.each(None, Some(Bound::Time(bound))).unwrap().count() as i64;

            let expected_before = (1..=count).filter(|i| i + 1 <= bound).count() as i64;
            let expected_after = (1..=count).filter(|i| *i >= bound).count() as i64;

            assert_eq!(before, expected_before, "before {} with {} lines", bound, count);
            assert_eq!(after, expected_after, "after {} with {} lines", bound, count);
        }
    }
}

/// Test combining both bounds
#[test]
fn test_each_withBothBounds_shouldYieldWindow() {
    let (subtitle, ids) = common::create_numbered_subtitle(10);

    let window: Vec<NodeId> = subtitle.each(Some(Bound::Time(7)), Some(Bound::Time(3))).unwrap().collect();

    assert_eq!(window, ids[2..6].to_vec());
}

/// Test bounds given as lines
#[test]
fn test_each_withLineBounds_shouldUseTheirEdges() {
    let (subtitle, ids) = common::create_numbered_subtitle(10);

    assert_eq!(subtitle.each(Some(Bound::Node(ids[9])), None).unwrap().count(), 9);
    assert_eq!(subtitle.each(None, Some(Bound::Node(ids[0]))).unwrap().count(), 9);
    assert_eq!(subtitle.each(Some(ids[5].into()), Some(ids[1].into())).unwrap().count(), 3);
}

/// Test that traversal of an empty collection yields nothing
#[test]
fn test_each_withEmptyCollection_shouldYieldNothing() {
    let (subtitle, _) = common::create_numbered_subtitle(0);

    assert_eq!(subtitle.each(Some(Bound::Time(5)), Some(Bound::Time(1))).unwrap().count(), 0);
    assert_eq!(subtitle.first(None).unwrap(), None);
    assert_eq!(subtitle.last(None).unwrap(), None);
    assert!(subtitle.first_n(3, None).unwrap().is_empty());
    assert!(subtitle.last_n(3, None).unwrap().is_empty());
}

/// Test that a sentinel cannot be used as a bound
#[test]
fn test_each_withSentinelBound_shouldBeTypeMismatch() {
    let (subtitle, _) = common::create_numbered_subtitle(3);
    let head = subtitle.head();

    assert!(matches!(subtitle.each(None, Some(Bound::Node(head))), Err(SubtitleError::TypeMismatch(_))));
    assert!(matches!(subtitle.first(Some(Bound::Node(head))), Err(SubtitleError::TypeMismatch(_))));
    assert!(matches!(subtitle.last(Some(Bound::Node(subtitle.tail()))), Err(SubtitleError::TypeMismatch(_))));
}

/// Test first/last lookups with truncation
#[test]
fn test_firstAndLast_withLargeN_shouldTruncate() {
    let (subtitle, ids) = common::create_numbered_subtitle(5);

    assert_eq!(subtitle.first(None).unwrap(), Some(ids[0]));
    assert_eq!(subtitle.first(Some(Bound::Time(3))).unwrap(), Some(ids[2]));
    assert_eq!(subtitle.first_n(2, Some(Bound::Time(3))).unwrap(), ids[2..4].to_vec());
    assert_eq!(subtitle.first_n(10, Some(Bound::Time(3))).unwrap(), ids[2..].to_vec());

    assert_eq!(subtitle.last(None).unwrap(), Some(ids[4]));
    assert_eq!(subtitle.last(Some(Bound::Time(4))).unwrap(), Some(ids[2]));
    assert_eq!(subtitle.last_n(2, Some(Bound::Time(4))).unwrap(), ids[1..3].to_vec());
    assert_eq!(subtitle.last_n(10, Some(Bound::Time(4))).unwrap(), ids[..3].to_vec());
}

/// Test deletion from both ends
#[test]
fn test_deleteAt_withZeroAndMinusOne_shouldRemoveEnds() {
    let (mut subtitle, ids) = common::create_numbered_subtitle(4);

    assert_eq!(subtitle.delete_at(0).unwrap(), Some(ids[0]));
    assert_eq!(subtitle.first_line(), Some(ids[1]));
    assert!(subtitle.chain().is_first(ids[1]));

    assert_eq!(subtitle.delete_at(-1).unwrap(), Some(ids[3]));
    assert_eq!(subtitle.last_line(), Some(ids[2]));
    assert!(subtitle.chain().is_last(ids[2]));
}

/// Test that out of range offsets leave the collection unchanged
#[test]
fn test_deleteAt_withOutOfRangeOffsets_shouldBeNoOp() {
    let (mut subtitle, ids) = common::create_numbered_subtitle(3);

    for offset in [3_isize, 4, 100, -4, -5, isize::MIN, isize::MAX] {
        assert_eq!(subtitle.delete_at(offset).unwrap(), None, "offset {}", offset);
    }

    assert_eq!(subtitle.iter().collect::<Vec<_>>(), ids);
}

/// Test that negative offsets mirror positive ones
#[test]
fn test_deleteAt_withNegativeOffsets_shouldMirrorPositive() {
    let (mut forward, forward_ids) = common::create_numbered_subtitle(5);
    let (mut backward, backward_ids) = common::create_numbered_subtitle(5);

    forward.delete_at(1).unwrap();
    backward.delete_at(-4).unwrap();

    let forward_left: Vec<usize> = forward.iter().map(|id| forward_ids.iter().position(|x| *x == id).unwrap()).collect();
    let backward_left: Vec<usize> = backward.iter().map(|id| backward_ids.iter().position(|x| *x == id).unwrap()).collect();
    assert_eq!(forward_left, vec![0, 2, 3, 4]);
    assert_eq!(forward_left, backward_left);
}

/// Test scoped traversal over lines linked one after another
#[test]
fn test_scope_withStandaloneChain_shouldTraverseFromLine() {
    common::init_logging();

    let mut chain = Chain::new();
    let first = chain.standalone(Line::new(1..2, 1));
    let mut last = first;
    for index in 2..=10_i64 {
        last = chain.insert_after(last, Line::new(index..index + 1, index)).unwrap();
    }

    let scope = subline::Scope::new(&mut chain, first).unwrap();

    assert_eq!(scope.each(Some(Bound::Time(5)), None).unwrap().count(), 4);
    assert_eq!(scope.each(Some(Bound::Node(last)), None).unwrap().count(), 9);
    assert_eq!(scope.each(None, Some(Bound::Time(5))).unwrap().count(), 6);
    assert_eq!(scope.each(None, Some(Bound::Node(first))).unwrap().count(), 9);
}

/// Test that a scope leaves the real chain boundaries alone
#[test]
fn test_scope_withMiddleLine_shouldKeepRealBoundaries() {
    let (mut subtitle, ids) = common::create_numbered_subtitle(5);

    let scope_head = {
        let scope = subtitle.scope(ids[2]).unwrap();
        assert_eq!(scope.first(None).unwrap(), Some(ids[2]));
        assert_eq!(scope.iter().count(), 3);
        scope.head()
    };

    assert_eq!(subtitle.chain_mut().virtual_head(ids[2]).unwrap(), scope_head);
    assert!(!subtitle.chain().is_first(ids[2]));
    assert_eq!(subtitle.first_line(), Some(ids[0]));
    assert_eq!(subtitle.len(), 5);
}
