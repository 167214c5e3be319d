// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor operations.

use time::Date;
use tracing::{info, warn};

use reelbase_domain::{Actor, ActorDraft, ActorPatch, DomainError, EntityKind, Listing};
use reelbase_persistence::{ActorCriteria, Persistence};

use crate::config::ServiceConfig;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::listing::{load_listing, text_filter};
use crate::request_response::{
    ActorResponse, CreateActorRequest, ListActorsQuery, UpdateActorRequest,
};

/// Loads an actor or fails with `ResourceNotFound`.
pub(crate) fn require_actor(
    persistence: &mut Persistence,
    actor_id: i64,
) -> Result<Actor, ApiError> {
    persistence
        .get_actor(actor_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found(EntityKind::Actor, actor_id))
}

/// Creates an actor.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The actor fields
/// * `today` - The current date; the birth date must be before it
///
/// # Errors
///
/// Returns `FieldValidation` listing every invalid field.
pub fn create_actor(
    persistence: &mut Persistence,
    request: &CreateActorRequest,
    today: Date,
) -> Result<ActorResponse, ApiError> {
    let draft: ActorDraft =
        ActorDraft::validate(request.name.as_deref(), request.birth_date, today)
            .map_err(translate_domain_error)?;

    let actor: Actor = persistence
        .create_actor(&draft)
        .map_err(translate_persistence_error)?;

    info!(actor_id = actor.id, name = %actor.name, "Created actor");
    Ok(ActorResponse::from(&actor))
}

/// Returns one actor.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the actor does not exist.
pub fn get_actor(persistence: &mut Persistence, actor_id: i64) -> Result<ActorResponse, ApiError> {
    let actor: Actor = require_actor(persistence, actor_id)?;
    Ok(ActorResponse::from(&actor))
}

/// Lists actors, optionally filtered by a name substring.
///
/// # Errors
///
/// Returns `InvalidInput` for out-of-range pagination.
pub fn list_actors(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    query: &ListActorsQuery,
) -> Result<Listing<ActorResponse>, ApiError> {
    let criteria: ActorCriteria = text_filter(query.name.as_deref())
        .map_or(ActorCriteria::All, |name| {
            ActorCriteria::NameContains(name.to_string())
        });
    list_matching(persistence, config, &criteria, query)
}

/// Searches actors by name substring, ignoring case.
///
/// # Errors
///
/// Returns `InvalidInput` if `name` is missing, or for out-of-range
/// pagination.
pub fn search_actors(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    query: &ListActorsQuery,
) -> Result<Listing<ActorResponse>, ApiError> {
    let Some(name) = query.name.as_deref() else {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Query parameter 'name' is required"),
        });
    };
    let criteria: ActorCriteria = ActorCriteria::NameContains(name.trim().to_string());
    list_matching(persistence, config, &criteria, query)
}

fn list_matching(
    persistence: &mut Persistence,
    config: &ServiceConfig,
    criteria: &ActorCriteria,
    query: &ListActorsQuery,
) -> Result<Listing<ActorResponse>, ApiError> {
    let listing: Listing<Actor> = load_listing(
        persistence,
        &config.pagination,
        query.page,
        query.size,
        |p| p.count_actors(criteria),
        |p, window| p.list_actors(criteria, window),
    )?;
    Ok(listing.map(|actor| ActorResponse::from(&actor)))
}

/// Applies the present fields of `request` to an actor.
///
/// A blank name is treated as absent. Movie associations are untouched.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the actor does not exist, `InvalidInput` if
/// the body id differs from `actor_id`, or `FieldValidation`.
pub fn update_actor(
    persistence: &mut Persistence,
    actor_id: i64,
    request: &UpdateActorRequest,
    today: Date,
) -> Result<ActorResponse, ApiError> {
    let existing: Actor = require_actor(persistence, actor_id)?;

    if request.id.is_some_and(|id| id != actor_id) {
        return Err(translate_domain_error(DomainError::ImmutableId {
            entity: EntityKind::Actor,
        }));
    }

    let patch: ActorPatch = ActorPatch::validate(request.name.as_deref(), request.birth_date, today)
        .map_err(translate_domain_error)?;
    let updated: Actor = patch.apply(&existing);

    if !updated.same_values(&existing) {
        persistence
            .update_actor(&updated)
            .map_err(translate_persistence_error)?;
        info!(actor_id, "Updated actor");
    }

    Ok(ActorResponse::from(&updated))
}

/// Deletes an actor.
///
/// Without `force`, an actor that appears in any movie is kept. With
/// `force`, its movie associations are removed first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the actor does not exist, or
/// `DeletionBlocked`.
pub fn delete_actor(
    persistence: &mut Persistence,
    actor_id: i64,
    force: bool,
) -> Result<(), ApiError> {
    let actor: Actor = require_actor(persistence, actor_id)?;
    let movie_count: u64 = persistence
        .count_movies_for_actor(actor_id)
        .map_err(translate_persistence_error)?;

    if movie_count > 0 && !force {
        warn!(actor_id, movie_count, "Refusing to delete actor with movies");
        return Err(ApiError::deletion_blocked(
            EntityKind::Actor,
            &actor.name,
            "movie(s)",
        ));
    }

    let cleared: usize = persistence
        .delete_actor(actor_id, force)
        .map_err(translate_persistence_error)?;

    info!(actor_id, cleared, "Deleted actor");
    Ok(())
}
