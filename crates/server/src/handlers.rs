// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route handlers.
//!
//! Each handler unwraps its extractors, takes the persistence lock for the
//! duration of one service call, and converts the result.

use axum::{
    Json,
    extract::{
        Path, Query, RawQuery, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::info;

use reelbase_api::{
    ActorResponse, CreateActorRequest, CreateGenreRequest, CreateMovieRequest, DeleteQuery,
    GenreResponse, ListActorsQuery, ListMoviesQuery, MovieResponse, SearchMoviesQuery,
    UpdateActorRequest, UpdateGenreRequest, UpdateMovieRequest,
};
use reelbase_domain::Listing;

use crate::AppState;
use crate::error::HttpError;

type Created<T> = (StatusCode, Json<T>);

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| HttpError::from_json_rejection(&rejection))
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, HttpError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| HttpError::from_path_rejection(&rejection))
}

fn query<T>(
    query: Result<Query<T>, QueryRejection>,
    raw: &RawQuery,
) -> Result<T, HttpError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| HttpError::from_query_rejection(&rejection, raw.0.as_deref()))
}

// ============================================================================
// Actors
// ============================================================================

pub async fn create_actor(
    State(state): State<AppState>,
    payload: Result<Json<CreateActorRequest>, JsonRejection>,
) -> Result<Created<ActorResponse>, HttpError> {
    let request: CreateActorRequest = body(payload)?;
    info!("Handling create_actor request");

    let mut persistence = state.persistence.lock().await;
    let created: ActorResponse =
        reelbase_api::create_actor(&mut persistence, &request, reelbase_api::today())?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_actors(
    State(state): State<AppState>,
    raw: RawQuery,
    params: Result<Query<ListActorsQuery>, QueryRejection>,
) -> Result<Json<Listing<ActorResponse>>, HttpError> {
    let params: ListActorsQuery = query(params, &raw)?;
    info!(name = ?params.name, page = ?params.page, size = ?params.size, "Handling list_actors request");

    let mut persistence = state.persistence.lock().await;
    let listing: Listing<ActorResponse> =
        reelbase_api::list_actors(&mut persistence, &state.config, &params)?;
    Ok(Json(listing))
}

pub async fn search_actors(
    State(state): State<AppState>,
    raw: RawQuery,
    params: Result<Query<ListActorsQuery>, QueryRejection>,
) -> Result<Json<Listing<ActorResponse>>, HttpError> {
    let params: ListActorsQuery = query(params, &raw)?;
    info!(name = ?params.name, "Handling search_actors request");

    let mut persistence = state.persistence.lock().await;
    let listing: Listing<ActorResponse> =
        reelbase_api::search_actors(&mut persistence, &state.config, &params)?;
    Ok(Json(listing))
}

pub async fn get_actor(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ActorResponse>, HttpError> {
    let actor_id: i64 = path_id(id)?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reelbase_api::get_actor(&mut persistence, actor_id)?))
}

pub async fn update_actor(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateActorRequest>, JsonRejection>,
) -> Result<Json<ActorResponse>, HttpError> {
    let actor_id: i64 = path_id(id)?;
    let request: UpdateActorRequest = body(payload)?;
    info!(actor_id, "Handling update_actor request");

    let mut persistence = state.persistence.lock().await;
    let updated: ActorResponse =
        reelbase_api::update_actor(&mut persistence, actor_id, &request, reelbase_api::today())?;
    Ok(Json(updated))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    raw: RawQuery,
    params: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<StatusCode, HttpError> {
    let actor_id: i64 = path_id(id)?;
    let params: DeleteQuery = query(params, &raw)?;
    info!(actor_id, force = params.force, "Handling delete_actor request");

    let mut persistence = state.persistence.lock().await;
    reelbase_api::delete_actor(&mut persistence, actor_id, params.force)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Genres
// ============================================================================

pub async fn create_genre(
    State(state): State<AppState>,
    payload: Result<Json<CreateGenreRequest>, JsonRejection>,
) -> Result<Created<GenreResponse>, HttpError> {
    let request: CreateGenreRequest = body(payload)?;
    info!(name = ?request.name, "Handling create_genre request");

    let mut persistence = state.persistence.lock().await;
    let created: GenreResponse = reelbase_api::create_genre(&mut persistence, &request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_genres(
    State(state): State<AppState>,
) -> Result<Json<Vec<GenreResponse>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reelbase_api::list_genres(&mut persistence)?))
}

pub async fn get_genre(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<GenreResponse>, HttpError> {
    let genre_id: i64 = path_id(id)?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reelbase_api::get_genre(&mut persistence, genre_id)?))
}

pub async fn update_genre(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateGenreRequest>, JsonRejection>,
) -> Result<Json<GenreResponse>, HttpError> {
    let genre_id: i64 = path_id(id)?;
    let request: UpdateGenreRequest = body(payload)?;
    info!(genre_id, "Handling update_genre request");

    let mut persistence = state.persistence.lock().await;
    Ok(Json(reelbase_api::update_genre(
        &mut persistence,
        genre_id,
        &request,
    )?))
}

pub async fn delete_genre(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    raw: RawQuery,
    params: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<StatusCode, HttpError> {
    let genre_id: i64 = path_id(id)?;
    let params: DeleteQuery = query(params, &raw)?;
    info!(genre_id, force = params.force, "Handling delete_genre request");

    let mut persistence = state.persistence.lock().await;
    reelbase_api::delete_genre(&mut persistence, genre_id, params.force)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Movies
// ============================================================================

pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<Created<MovieResponse>, HttpError> {
    let request: CreateMovieRequest = body(payload)?;
    info!(title = ?request.title, "Handling create_movie request");

    let mut persistence = state.persistence.lock().await;
    let created: MovieResponse = reelbase_api::create_movie(&mut persistence, &request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_movies(
    State(state): State<AppState>,
    raw: RawQuery,
    params: Result<Query<ListMoviesQuery>, QueryRejection>,
) -> Result<Json<Listing<MovieResponse>>, HttpError> {
    let params: ListMoviesQuery = query(params, &raw)?;
    info!(
        genre = ?params.genre,
        year = ?params.year,
        actor = ?params.actor,
        title = ?params.title,
        "Handling list_movies request"
    );

    let mut persistence = state.persistence.lock().await;
    let listing: Listing<MovieResponse> =
        reelbase_api::list_movies(&mut persistence, &state.config, &params)?;
    Ok(Json(listing))
}

pub async fn search_movies(
    State(state): State<AppState>,
    raw: RawQuery,
    params: Result<Query<SearchMoviesQuery>, QueryRejection>,
) -> Result<Json<Listing<MovieResponse>>, HttpError> {
    let params: SearchMoviesQuery = query(params, &raw)?;
    info!(title = ?params.title, "Handling search_movies request");

    let mut persistence = state.persistence.lock().await;
    let listing: Listing<MovieResponse> =
        reelbase_api::search_movies(&mut persistence, &state.config, &params)?;
    Ok(Json(listing))
}

pub async fn get_movie(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MovieResponse>, HttpError> {
    let movie_id: i64 = path_id(id)?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reelbase_api::get_movie(&mut persistence, movie_id)?))
}

pub async fn list_movie_actors(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ActorResponse>>, HttpError> {
    let movie_id: i64 = path_id(id)?;
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reelbase_api::list_movie_actors(
        &mut persistence,
        movie_id,
    )?))
}

pub async fn update_movie(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> Result<Json<MovieResponse>, HttpError> {
    let movie_id: i64 = path_id(id)?;
    let request: UpdateMovieRequest = body(payload)?;
    info!(movie_id, "Handling update_movie request");

    let mut persistence = state.persistence.lock().await;
    Ok(Json(reelbase_api::update_movie(
        &mut persistence,
        movie_id,
        &request,
    )?))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    raw: RawQuery,
    params: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<StatusCode, HttpError> {
    let movie_id: i64 = path_id(id)?;
    let params: DeleteQuery = query(params, &raw)?;
    info!(movie_id, force = params.force, "Handling delete_movie request");

    let mut persistence = state.persistence.lock().await;
    reelbase_api::delete_movie(&mut persistence, &state.config, movie_id, params.force)?;
    Ok(StatusCode::NO_CONTENT)
}
