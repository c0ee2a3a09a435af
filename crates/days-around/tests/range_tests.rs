//! Tests for inclusive integer ranges.

use days_around::{ClosedRange, LayoutError};

#[test]
fn symmetric_range_is_ascending_and_inclusive() {
    let range = ClosedRange::from_to(-2, 2).unwrap();
    assert_eq!(range.to_vec(), vec![-2, -1, 0, 1, 2]);
    assert_eq!(range.len(), 5);
}

#[test]
fn degenerate_range_yields_single_zero() {
    let range = ClosedRange::from_to(0, 0).unwrap();
    assert_eq!(range.to_vec(), vec![0]);
    assert_eq!(range.len(), 1);
    assert!(!range.is_empty());
}

#[test]
fn negative_only_range() {
    let range = ClosedRange::from_to(-3, -1).unwrap();
    assert_eq!(range.to_vec(), vec![-3, -2, -1]);
}

#[test]
fn inverted_bounds_rejected() {
    let err = ClosedRange::from_to(1, -1).unwrap_err();
    assert!(
        matches!(err, LayoutError::InvalidArgument(_)),
        "expected InvalidArgument, got {:?}",
        err
    );
}

#[test]
fn range_is_reusable() {
    let range = ClosedRange::from_to(-1, 1).unwrap();
    let first: Vec<i64> = range.iter().collect();
    let second: Vec<i64> = (&range).into_iter().collect();
    let third: Vec<i64> = range.into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn contains_respects_both_bounds() {
    let range = ClosedRange::from_to(-2, 3).unwrap();
    assert!(range.contains(-2));
    assert!(range.contains(0));
    assert!(range.contains(3));
    assert!(!range.contains(-3));
    assert!(!range.contains(4));
    assert_eq!(range.lo(), -2);
    assert_eq!(range.hi(), 3);
}

#[test]
fn full_i64_range_length_does_not_overflow() {
    let range = ClosedRange::from_to(i64::MIN, i64::MAX).unwrap();
    assert_eq!(range.len(), 1u128 << 64);
    assert!(range.contains(0));
}
