// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use crate::{DomainError, EntityKind, PaginationViolation};

#[test]
fn test_immutable_id_message_names_entity() {
    let err: DomainError = DomainError::ImmutableId {
        entity: EntityKind::Movie,
    };
    assert_eq!(err.to_string(), "Cannot modify movie ID");
}

#[test]
fn test_missing_reference_id_message_is_capitalised() {
    let err: DomainError = DomainError::MissingReferenceId {
        entity: EntityKind::Genre,
    };
    assert_eq!(err.to_string(), "Genre ID is required");
}

#[test]
fn test_invalid_field_displays_message_only() {
    let err: DomainError = DomainError::invalid_field("name", "Name is required");
    assert_eq!(err.to_string(), "Name is required");
}

#[test]
fn test_invalid_fields_lists_fields_in_name_order() {
    let mut errors: BTreeMap<String, String> = BTreeMap::new();
    errors.insert(String::from("title"), String::from("Movie title is required"));
    errors.insert(String::from("duration"), String::from("Duration is required"));
    let err: DomainError = DomainError::InvalidFields(errors);

    assert_eq!(
        err.to_string(),
        "Invalid fields: duration: Duration is required; title: Movie title is required"
    );
}

#[test]
fn test_invalid_pagination_joins_violations() {
    let err: DomainError = DomainError::InvalidPagination(vec![
        PaginationViolation::NegativePage { min: 0 },
        PaginationViolation::PageSizeTooSmall { min: 1 },
    ]);
    assert_eq!(
        err.to_string(),
        "Page number cannot be negative. Minimum page number is 0. Page size must be at least 1."
    );
}
