// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use reelbase_domain::{DomainError, EntityKind, GenreDraft, PaginationViolation};
use reelbase_persistence::{ConstraintKind, Persistence, PersistenceError};

use super::create_test_persistence;
use crate::{
    ApiError, DUPLICATE_GENRE_NAME, GENERIC_CONSTRAINT_ERROR, translate_domain_error,
    translate_persistence_error,
};

fn constraint(kind: ConstraintKind, name: Option<&str>, message: &str) -> PersistenceError {
    PersistenceError::ConstraintViolation {
        kind,
        constraint: name.map(ToString::to_string),
        message: message.to_string(),
    }
}

#[test]
fn test_genre_name_uniqueness_is_reported_as_duplicate() {
    let sqlite: ApiError = translate_persistence_error(constraint(
        ConstraintKind::Unique,
        None,
        "UNIQUE constraint failed: genres.name",
    ));
    assert_eq!(sqlite.to_string(), DUPLICATE_GENRE_NAME);

    let mysql: ApiError = translate_persistence_error(constraint(
        ConstraintKind::Unique,
        Some("uq_genres_name"),
        "Duplicate entry 'drama' for key 'uq_genres_name'",
    ));
    assert_eq!(mysql.to_string(), DUPLICATE_GENRE_NAME);
}

#[test]
fn test_storage_genre_uniqueness_is_reported_as_duplicate() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_genre(&GenreDraft {
            name: String::from("Drama"),
        })
        .unwrap();

    let err: PersistenceError = persistence
        .create_genre(&GenreDraft {
            name: String::from("drama"),
        })
        .unwrap_err();
    assert!(err.is_unique_violation(), "{err}");

    let translated: ApiError = translate_persistence_error(err);
    assert_eq!(translated, ApiError::duplicate_genre_name());
    assert_eq!(translated.to_string(), DUPLICATE_GENRE_NAME);
}

#[test]
fn test_other_constraints_are_generic() {
    let check: ApiError = translate_persistence_error(constraint(
        ConstraintKind::Check,
        Some("ck_movies_release_year"),
        "CHECK constraint failed: release_year",
    ));
    assert_eq!(
        check,
        ApiError::ConstraintViolation {
            message: GENERIC_CONSTRAINT_ERROR.to_string()
        }
    );

    let foreign_key: ApiError = translate_persistence_error(constraint(
        ConstraintKind::ForeignKey,
        None,
        "FOREIGN KEY constraint failed",
    ));
    assert_eq!(foreign_key.to_string(), GENERIC_CONSTRAINT_ERROR);
}

#[test]
fn test_unclassified_persistence_errors_are_internal() {
    let err: ApiError =
        translate_persistence_error(PersistenceError::QueryFailed(String::from("disk I/O error")));
    assert!(matches!(err, ApiError::Internal { .. }));

    let missing: ApiError =
        translate_persistence_error(PersistenceError::NotFound(String::from("Movie 4")));
    assert!(matches!(missing, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_domain_errors_keep_their_messages() {
    let mut errors: BTreeMap<String, String> = BTreeMap::new();
    errors.insert(String::from("title"), String::from("Movie title is required"));
    assert_eq!(
        translate_domain_error(DomainError::InvalidFields(errors.clone())),
        ApiError::FieldValidation { errors }
    );

    let missing: ApiError = translate_domain_error(DomainError::MissingReferenceId {
        entity: EntityKind::Actor,
    });
    assert_eq!(
        missing,
        ApiError::InvalidInput {
            field: String::from("actors"),
            message: String::from("Actor ID is required"),
        }
    );

    let paging: ApiError = translate_domain_error(DomainError::InvalidPagination(vec![
        PaginationViolation::NegativePage { min: 0 },
        PaginationViolation::PageSizeTooSmall { min: 1 },
    ]));
    assert_eq!(
        paging.to_string(),
        "Page number cannot be negative. Minimum page number is 0. Page size must be at least 1."
    );
}
