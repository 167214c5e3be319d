// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for the Reelbase movie catalogue.
//!
//! This crate has no I/O. It defines the three catalogue entities, the
//! field rules applied when they are created or patched, and the pagination
//! policy used by every list operation.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod listing;
mod pagination;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use listing::{Listing, Page};
pub use pagination::{PageRequest, PaginationPolicy, PaginationViolation};
pub use types::{Actor, EntityKind, Genre, Movie};
pub use validation::{
    ActorDraft, ActorPatch, FieldErrors, GenreDraft, GenrePatch, MovieDraft, MoviePatch,
    validate_actor_name, validate_birth_date, validate_duration, validate_genre_name,
    validate_release_year, validate_title,
};

/// Earliest accepted release year (the first motion picture).
pub const FIRST_RELEASE_YEAR: i32 = 1888;
/// Latest accepted release year.
pub const LAST_RELEASE_YEAR: i32 = 2100;
/// Longest accepted running time, in minutes.
pub const MAX_DURATION_MINUTES: i32 = 600;
