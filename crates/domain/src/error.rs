// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use crate::pagination::PaginationViolation;
use crate::types::EntityKind;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A single field failed its rule.
    InvalidField {
        /// The request field name (camelCase, as seen by clients).
        field: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// One or more fields failed their rules, keyed by field name.
    InvalidFields(BTreeMap<String, String>),
    /// A patch tried to change the id of the entity it targets.
    ImmutableId {
        /// The entity being patched.
        entity: EntityKind,
    },
    /// A relationship reference was given without an id.
    MissingReferenceId {
        /// The kind of entity being referenced.
        entity: EntityKind,
    },
    /// Pagination parameters broke one or more bounds.
    InvalidPagination(Vec<PaginationViolation>),
    /// A pagination policy was configured with inconsistent bounds.
    InvalidPaginationPolicy(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField { message, .. } => write!(f, "{message}"),
            Self::InvalidFields(errors) => {
                let joined: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect();
                write!(f, "Invalid fields: {}", joined.join("; "))
            }
            Self::ImmutableId { entity } => write!(f, "Cannot modify {entity} ID"),
            Self::MissingReferenceId { entity } => write!(f, "{} ID is required", entity.label()),
            Self::InvalidPagination(violations) => {
                let joined: Vec<String> = violations.iter().map(ToString::to_string).collect();
                write!(f, "{}", joined.join(" "))
            }
            Self::InvalidPaginationPolicy(msg) => write!(f, "Invalid pagination policy: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Shorthand for a single-field violation.
    #[must_use]
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
