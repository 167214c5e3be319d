// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use std::collections::BTreeMap;

use reelbase_domain::{DomainError, EntityKind};
use reelbase_persistence::PersistenceError;
use tracing::{error, warn};

/// Message reported whenever a genre name collides with an existing one.
pub const DUPLICATE_GENRE_NAME: &str = "A genre with this name already exists";

/// Message reported for any other storage constraint failure.
pub const GENERIC_CONSTRAINT_ERROR: &str = "Database constraint error";

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. The server maps each variant to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A single input value was rejected.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// One or more body fields failed validation.
    FieldValidation {
        /// Field name to message.
        errors: BTreeMap<String, String>,
    },
    /// A requested or referenced resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A delete was refused because the entity still has dependents.
    DeletionBlocked {
        /// The type of resource whose deletion was refused.
        resource_type: String,
        /// A human-readable description naming the entity.
        message: String,
    },
    /// A storage integrity constraint rejected the write.
    ConstraintViolation {
        /// A client-safe description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error. Never shown to clients.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::DeletionBlocked { message, .. }
            | Self::ConstraintViolation { message } => write!(f, "{message}"),
            Self::FieldValidation { errors } => {
                let joined: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect();
                write!(f, "Validation failed: {}", joined.join("; "))
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// The error for a target entity that does not exist.
    #[must_use]
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: entity.label().to_string(),
            message: format!("No {entity} found with ID: {id}"),
        }
    }

    /// The error for a related entity, referenced by id, that does not exist.
    #[must_use]
    pub fn reference_not_found(entity: EntityKind, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: entity.label().to_string(),
            message: format!("{} not found: {id}", entity.label()),
        }
    }

    /// The error for a list filter naming an entity that does not exist.
    #[must_use]
    pub fn filter_target_not_found(entity: EntityKind, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: entity.label().to_string(),
            message: format!("{} not found with id: {id}", entity.label()),
        }
    }

    /// The error for a delete refused because the entity has movies.
    #[must_use]
    pub fn deletion_blocked(entity: EntityKind, name: &str, dependents: &str) -> Self {
        Self::DeletionBlocked {
            resource_type: entity.label().to_string(),
            message: format!(
                "Cannot delete {entity} '{name}' because {entity} has associated {dependents}."
            ),
        }
    }

    /// The duplicate genre name error.
    #[must_use]
    pub fn duplicate_genre_name() -> Self {
        Self::ConstraintViolation {
            message: DUPLICATE_GENRE_NAME.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidField { field, message } => ApiError::InvalidInput { field, message },
        DomainError::InvalidFields(errors) => ApiError::FieldValidation { errors },
        DomainError::ImmutableId { .. } => ApiError::InvalidInput {
            field: String::from("id"),
            message: err.to_string(),
        },
        DomainError::MissingReferenceId { entity } => ApiError::InvalidInput {
            field: match entity {
                EntityKind::Genre => String::from("genres"),
                EntityKind::Actor => String::from("actors"),
                EntityKind::Movie => String::from("movies"),
            },
            message: err.to_string(),
        },
        DomainError::InvalidPagination(_) => ApiError::InvalidInput {
            field: String::from("page"),
            message: err.to_string(),
        },
        DomainError::InvalidPaginationPolicy(msg) => ApiError::Internal {
            message: format!("Invalid pagination policy: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Constraint violations are reclassified by looking at the constraint name
/// and the backend message; details of anything unclassified are logged and
/// kept out of the client-facing message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    if err.is_unique_violation() && names_genre_name(&err) {
        warn!(error = %err, "Genre name uniqueness enforced by storage");
        return ApiError::duplicate_genre_name();
    }

    match err {
        PersistenceError::ConstraintViolation {
            kind,
            constraint,
            message,
        } => {
            warn!(%kind, ?constraint, %message, "Storage constraint violated");
            ApiError::ConstraintViolation {
                message: GENERIC_CONSTRAINT_ERROR.to_string(),
            }
        }
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

/// Whether a constraint failure concerns the genre name column.
///
/// `SQLite` reports `genres.name`; `MySQL` reports the `uq_genres_name` key.
fn names_genre_name(err: &PersistenceError) -> bool {
    let PersistenceError::ConstraintViolation {
        constraint,
        message,
        ..
    } = err
    else {
        return false;
    };
    let haystack: String =
        format!("{} {message}", constraint.as_deref().unwrap_or_default()).to_lowercase();
    haystack.contains("genre") && haystack.contains("name")
}
