// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, PageRequest, PaginationPolicy, PaginationViolation};

fn violations(err: DomainError) -> Vec<PaginationViolation> {
    match err {
        DomainError::InvalidPagination(v) => v,
        other => panic!("expected InvalidPagination, got {other:?}"),
    }
}

#[test]
fn test_default_policy_bounds() {
    let policy: PaginationPolicy = PaginationPolicy::default();
    assert_eq!(policy.min_page_number, 0);
    assert_eq!(policy.min_page_size, 1);
    assert_eq!(policy.max_page_size, 100);
    assert_eq!(policy.default_page_size, 20);
}

#[test]
fn test_accepts_every_in_range_pair() {
    let policy: PaginationPolicy = PaginationPolicy::default();
    for page in [0, 1, 50, 10_000] {
        for size in [1, 2, 20, 99, 100] {
            let request: PageRequest = policy.validate(page, size).unwrap();
            assert_eq!(request.page(), page);
            assert_eq!(request.size(), size);
        }
    }
}

#[test]
fn test_rejects_size_zero() {
    let err: DomainError = PaginationPolicy::default().validate(0, 0).unwrap_err();
    assert_eq!(
        violations(err.clone()),
        vec![PaginationViolation::PageSizeTooSmall { min: 1 }]
    );
    assert_eq!(err.to_string(), "Page size must be at least 1.");
}

#[test]
fn test_rejects_size_above_max() {
    let err: DomainError = PaginationPolicy::default().validate(0, 101).unwrap_err();
    assert_eq!(err.to_string(), "Page size cannot exceed 100. Requested: 101.");
}

#[test]
fn test_rejects_negative_page() {
    let err: DomainError = PaginationPolicy::default().validate(-1, 20).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Page number cannot be negative. Minimum page number is 0."
    );
}

#[test]
fn test_reports_both_violations() {
    let err: DomainError = PaginationPolicy::default().validate(-3, 500).unwrap_err();
    assert_eq!(violations(err).len(), 2);
}

#[test]
fn test_resolve_without_parameters_is_unpaginated() {
    let policy: PaginationPolicy = PaginationPolicy::default();
    assert_eq!(policy.resolve(None, None).unwrap(), None);
}

#[test]
fn test_resolve_fills_missing_parameter() {
    let policy: PaginationPolicy = PaginationPolicy::default();

    let only_page: PageRequest = policy.resolve(Some(2), None).unwrap().unwrap();
    assert_eq!((only_page.page(), only_page.size()), (2, 20));

    let only_size: PageRequest = policy.resolve(None, Some(5)).unwrap().unwrap();
    assert_eq!((only_size.page(), only_size.size()), (0, 5));

    assert!(policy.resolve(None, Some(0)).is_err());
}

#[test]
fn test_offset_and_limit() {
    let request: PageRequest = PaginationPolicy::default().validate(3, 25).unwrap();
    assert_eq!(request.offset(), 75);
    assert_eq!(request.limit(), 25);
}

#[test]
fn test_custom_policy() {
    let policy: PaginationPolicy = PaginationPolicy::new(10, 50).unwrap();
    assert_eq!(policy.resolve(Some(0), None).unwrap().unwrap().size(), 10);
    assert!(policy.validate(0, 51).is_err());

    assert!(matches!(
        PaginationPolicy::new(60, 50),
        Err(DomainError::InvalidPaginationPolicy(_))
    ));
    assert!(PaginationPolicy::new(1, 0).is_err());
}
