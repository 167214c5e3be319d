// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Genre operations.

use tracing::{info, warn};

use reelbase_domain::{DomainError, EntityKind, Genre, GenreDraft, GenrePatch};
use reelbase_persistence::Persistence;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{CreateGenreRequest, GenreResponse, UpdateGenreRequest};

/// Loads a genre or fails with `ResourceNotFound`.
pub(crate) fn require_genre(
    persistence: &mut Persistence,
    genre_id: i64,
) -> Result<Genre, ApiError> {
    persistence
        .get_genre(genre_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found(EntityKind::Genre, genre_id))
}

/// Fails if another genre already has `name`, ignoring case.
fn ensure_name_available(
    persistence: &mut Persistence,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    let clash: Option<Genre> = persistence
        .find_genre_by_name(name, exclude_id)
        .map_err(translate_persistence_error)?;

    if let Some(existing) = clash {
        warn!(name, existing_id = existing.id, "Genre name already taken");
        return Err(ApiError::duplicate_genre_name());
    }
    Ok(())
}

/// Creates a genre.
///
/// # Errors
///
/// Returns `FieldValidation` for an invalid name, or `ConstraintViolation`
/// if a genre with the same name exists.
pub fn create_genre(
    persistence: &mut Persistence,
    request: &CreateGenreRequest,
) -> Result<GenreResponse, ApiError> {
    let draft: GenreDraft =
        GenreDraft::validate(request.name.as_deref()).map_err(translate_domain_error)?;
    ensure_name_available(persistence, &draft.name, None)?;

    let genre: Genre = persistence
        .create_genre(&draft)
        .map_err(translate_persistence_error)?;

    info!(genre_id = genre.id, name = %genre.name, "Created genre");
    Ok(GenreResponse::from(&genre))
}

/// Returns one genre.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the genre does not exist.
pub fn get_genre(persistence: &mut Persistence, genre_id: i64) -> Result<GenreResponse, ApiError> {
    let genre: Genre = require_genre(persistence, genre_id)?;
    Ok(GenreResponse::from(&genre))
}

/// Returns every genre in id order.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_genres(persistence: &mut Persistence) -> Result<Vec<GenreResponse>, ApiError> {
    let genres: Vec<Genre> = persistence
        .list_genres()
        .map_err(translate_persistence_error)?;
    Ok(genres.iter().map(GenreResponse::from).collect())
}

/// Renames a genre when `request.name` is present.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `InvalidInput` for an id mismatch,
/// `FieldValidation`, or `ConstraintViolation` for a taken name.
pub fn update_genre(
    persistence: &mut Persistence,
    genre_id: i64,
    request: &UpdateGenreRequest,
) -> Result<GenreResponse, ApiError> {
    let existing: Genre = require_genre(persistence, genre_id)?;

    if request.id.is_some_and(|id| id != genre_id) {
        return Err(translate_domain_error(DomainError::ImmutableId {
            entity: EntityKind::Genre,
        }));
    }

    let patch: GenrePatch =
        GenrePatch::validate(request.name.as_deref()).map_err(translate_domain_error)?;
    let Some(name) = patch.name.as_deref() else {
        return Ok(GenreResponse::from(&existing));
    };
    ensure_name_available(persistence, name, Some(genre_id))?;

    let updated: Genre = patch.apply(&existing);
    persistence
        .update_genre(&updated)
        .map_err(translate_persistence_error)?;

    info!(genre_id, name = %updated.name, "Renamed genre");
    Ok(GenreResponse::from(&updated))
}

/// Deletes a genre.
///
/// Without `force`, a genre used by any movie is kept. With `force`, it is
/// removed from every movie first; movies that had only this genre are left
/// with none.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the genre does not exist, or
/// `DeletionBlocked`.
pub fn delete_genre(
    persistence: &mut Persistence,
    genre_id: i64,
    force: bool,
) -> Result<(), ApiError> {
    let genre: Genre = require_genre(persistence, genre_id)?;
    let movie_count: u64 = persistence
        .count_movies_for_genre(genre_id)
        .map_err(translate_persistence_error)?;

    if movie_count > 0 && !force {
        warn!(genre_id, movie_count, "Refusing to delete genre with movies");
        return Err(ApiError::deletion_blocked(
            EntityKind::Genre,
            &genre.name,
            "movie(s)",
        ));
    }

    let cleared: usize = persistence
        .delete_genre(genre_id, force)
        .map_err(translate_persistence_error)?;

    info!(genre_id, cleared, "Deleted genre");
    Ok(())
}
