// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movie operations, including relationship resolution and filtering.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use reelbase_domain::{
    Actor, DomainError, EntityKind, FieldErrors, Genre, Listing, Movie, MovieDraft, MoviePatch,
};
use reelbase_persistence::{MovieCriteria, Persistence};

use crate::actors::require_actor;
use crate::config::{MovieDeletePolicy, ServiceConfig};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::genres::require_genre;
use crate::listing::{load_listing, text_filter};
use crate::request_response::{
    ActorResponse, CreateMovieRequest, EntityRef, ListMoviesQuery, MovieResponse,
    SearchMoviesQuery, UpdateMovieRequest,
};

/// Loads a movie or fails with `ResourceNotFound`.
fn require_movie(persistence: &mut Persistence, movie_id: i64) -> Result<Movie, ApiError> {
    persistence
        .get_movie(movie_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found(EntityKind::Movie, movie_id))
}

/// Extracts the ids of `refs` in request order.
fn reference_ids(refs: &[EntityRef], entity: EntityKind) -> Result<Vec<i64>, ApiError> {
    refs.iter()
        .map(|r| {
            r.id.ok_or_else(|| {
                translate_domain_error(DomainError::MissingReferenceId { entity })
            })
        })
        .collect()
}

/// Resolves every referenced genre, failing on the first missing one.
fn resolve_genres(
    persistence: &mut Persistence,
    refs: &[EntityRef],
) -> Result<BTreeSet<Genre>, ApiError> {
    let mut genres: BTreeSet<Genre> = BTreeSet::new();
    for genre_id in reference_ids(refs, EntityKind::Genre)? {
        let genre: Genre = persistence
            .get_genre(genre_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::reference_not_found(EntityKind::Genre, genre_id))?;
        genres.insert(genre);
    }
    Ok(genres)
}

/// Resolves every referenced actor, failing on the first missing one.
fn resolve_actors(
    persistence: &mut Persistence,
    refs: &[EntityRef],
) -> Result<BTreeSet<Actor>, ApiError> {
    let mut actors: BTreeSet<Actor> = BTreeSet::new();
    for actor_id in reference_ids(refs, EntityKind::Actor)? {
        let actor: Actor = persistence
            .get_actor(actor_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::reference_not_found(EntityKind::Actor, actor_id))?;
        actors.insert(actor);
    }
    Ok(actors)
}

/// Creates a movie together with its genre and actor relationships.
///
/// Every referenced id is resolved before anything is written; the movie
/// row and its relationship rows are then written in one transaction.
///
/// # Errors
///
/// Returns `FieldValidation` for invalid scalars or an empty genre list,
/// `InvalidInput` for a reference without an id, or `ResourceNotFound` for
/// the first reference that does not resolve.
pub fn create_movie(
    persistence: &mut Persistence,
    request: &CreateMovieRequest,
) -> Result<MovieResponse, ApiError> {
    let genre_refs: &[EntityRef] = request.genres.as_deref().unwrap_or_default();
    let actor_refs: &[EntityRef] = request.actors.as_deref().unwrap_or_default();

    let draft: MovieDraft = MovieDraft::validate(
        request.title.as_deref(),
        request.release_year,
        request.duration,
        genre_refs.len(),
    )
    .map_err(translate_domain_error)?;

    let genres: BTreeSet<Genre> = resolve_genres(persistence, genre_refs)?;
    let actors: BTreeSet<Actor> = resolve_actors(persistence, actor_refs)?;
    let genre_ids: BTreeSet<i64> = genres.iter().map(|g| g.id).collect();
    let actor_ids: BTreeSet<i64> = actors.iter().map(|a| a.id).collect();

    let movie: Movie = persistence
        .create_movie(&draft, &genre_ids, &actor_ids)
        .map_err(translate_persistence_error)?;

    info!(
        movie_id = movie.id,
        title = %movie.title,
        genres = genre_ids.len(),
        actors = actor_ids.len(),
        "Created movie"
    );
    Ok(MovieResponse::from(&movie))
}

/// Returns one movie with its genres and actors.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the movie does not exist.
pub fn get_movie(persistence: &mut Persistence, movie_id: i64) -> Result<MovieResponse, ApiError> {
    let movie: Movie = require_movie(persistence, movie_id)?;
    Ok(MovieResponse::from(&movie))
}

/// Returns the actors of a movie in id order.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the movie does not exist.
pub fn list_movie_actors(
    persistence: &mut Persistence,
    movie_id: i64,
) -> Result<Vec<ActorResponse>, ApiError> {
    if persistence
        .get_movie(movie_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::not_found(EntityKind::Movie, movie_id));
    }

    let actors: Vec<Actor> = persistence
        .list_actors_for_movie(movie_id)
        .map_err(translate_persistence_error)?;
    Ok(actors.iter().map(ActorResponse::from).collect())
}

/// Picks the single filter a movie listing applies.
///
/// Priority is genre, then release year, then actor, then title. Genre and
/// actor filters must name an existing entity.
fn select_movie_criteria(
    persistence: &mut Persistence,
    query: &ListMoviesQuery,
) -> Result<MovieCriteria, ApiError> {
    let title: Option<&str> = text_filter(query.title.as_deref());

    let criteria: MovieCriteria = if let Some(genre_id) = query.genre {
        require_filter_genre(persistence, genre_id)?;
        MovieCriteria::Genre(genre_id)
    } else if let Some(year) = query.year {
        MovieCriteria::ReleaseYear(year)
    } else if let Some(actor_id) = query.actor {
        require_filter_actor(persistence, actor_id)?;
        MovieCriteria::Actor(actor_id)
    } else if let Some(title) = title {
        MovieCriteria::TitleContains(title.to_string())
    } else {
        MovieCriteria::All
    };

    let supplied: usize = [
        query.genre.is_some(),
        query.year.is_some(),
        query.actor.is_some(),
        title.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    if supplied > 1 {
        debug!(?criteria, "Ignoring lower-priority movie filters");
    }

    Ok(criteria)
}

fn require_filter_genre(persistence: &mut Persistence, genre_id: i64) -> Result<(), ApiError> {
    require_genre(persistence, genre_id)
        .map(|_| ())
        .map_err(|err| match err {
            ApiError::ResourceNotFound { .. } => {
                ApiError::filter_target_not_found(EntityKind::Genre, genre_id)
            }
            other => other,
        })
}

fn require_filter_actor(persistence: &mut Persistence, actor_id: i64) -> Result<(), ApiError> {
    require_actor(persistence, actor_id)
        .map(|_| ())
        .map_err(|err| match err {
            ApiError::ResourceNotFound { .. } => {
                ApiError::filter_target_not_found(EntityKind::Actor, actor_id)
            }
            other => other,
        })
}

/// Lists movies, applying at most one filter.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown genre or actor filter, or
/// `InvalidInput` for out-of-range pagination.
pub fn list_movies(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    query: &ListMoviesQuery,
) -> Result<Listing<MovieResponse>, ApiError> {
    let criteria: MovieCriteria = select_movie_criteria(persistence, query)?;
    list_matching(persistence, config, &criteria, query.page, query.size)
}

/// Searches movies by title substring, ignoring case.
///
/// # Errors
///
/// Returns `InvalidInput` if `title` is missing, or for out-of-range
/// pagination.
pub fn search_movies(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    query: &SearchMoviesQuery,
) -> Result<Listing<MovieResponse>, ApiError> {
    let Some(title) = query.title.as_deref() else {
        return Err(ApiError::InvalidInput {
            field: String::from("title"),
            message: String::from("Query parameter 'title' is required"),
        });
    };
    let criteria: MovieCriteria = MovieCriteria::TitleContains(title.trim().to_string());
    list_matching(persistence, config, &criteria, query.page, query.size)
}

fn list_matching(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    criteria: &MovieCriteria,
    page: Option<i64>,
    size: Option<i64>,
) -> Result<Listing<MovieResponse>, ApiError> {
    let listing: Listing<Movie> = load_listing(
        persistence,
        &config.pagination,
        page,
        size,
        |p| p.count_movies(criteria),
        |p, window| p.list_movies(criteria, window),
    )?;
    Ok(listing.map(|movie| MovieResponse::from(&movie)))
}

/// Applies the present fields of `request` to a movie.
///
/// A present `genres` or `actors` list replaces that relationship set and
/// must resolve completely; nothing is written otherwise.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a missing movie or reference,
/// `InvalidInput` for an id mismatch or a reference without an id, or
/// `FieldValidation`.
pub fn update_movie(
    persistence: &mut Persistence,
    movie_id: i64,
    request: &UpdateMovieRequest,
) -> Result<MovieResponse, ApiError> {
    let existing: Movie = require_movie(persistence, movie_id)?;

    if request.id.is_some_and(|id| id != movie_id) {
        return Err(translate_domain_error(DomainError::ImmutableId {
            entity: EntityKind::Movie,
        }));
    }

    let patch: MoviePatch = MoviePatch::validate(
        request.title.as_deref(),
        request.release_year,
        request.duration,
    )
    .map_err(translate_domain_error)?;

    if request.genres.as_ref().is_some_and(Vec::is_empty) {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.insert("genres", "Movie must have at least one genre");
        return Err(translate_domain_error(errors.into_error()));
    }

    let mut updated: Movie = patch.apply(&existing);
    if let Some(refs) = request.genres.as_deref() {
        updated.genres = resolve_genres(persistence, refs)?;
    }
    if let Some(refs) = request.actors.as_deref() {
        updated.actors = resolve_actors(persistence, refs)?;
    }

    persistence
        .update_movie(&updated)
        .map_err(translate_persistence_error)?;

    info!(movie_id, "Updated movie");
    Ok(MovieResponse::from(&updated))
}

/// Deletes a movie according to the configured `MovieDeletePolicy`.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the movie does not exist, or
/// `DeletionBlocked` under `RequireForce` when the movie has relationships
/// and `force` is not set.
pub fn delete_movie(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    movie_id: i64,
    force: bool,
) -> Result<(), ApiError> {
    let movie: Movie = require_movie(persistence, movie_id)?;

    let clear_relationships: bool = match config.movie_delete_policy {
        MovieDeletePolicy::ClearRelationships => true,
        MovieDeletePolicy::RequireForce => {
            let relationships: u64 = persistence
                .count_movie_relationships(movie_id)
                .map_err(translate_persistence_error)?;
            if relationships > 0 && !force {
                warn!(movie_id, relationships, "Refusing to delete movie with relationships");
                return Err(ApiError::deletion_blocked(
                    EntityKind::Movie,
                    &movie.title,
                    "genre(s) or actor(s)",
                ));
            }
            force
        }
    };

    let cleared: usize = persistence
        .delete_movie(movie_id, clear_relationships)
        .map_err(translate_persistence_error)?;

    info!(movie_id, cleared, "Deleted movie");
    Ok(())
}
