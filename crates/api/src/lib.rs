// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary for the Reelbase movie catalogue.
//!
//! Each operation is a plain function taking the persistence layer and a
//! request DTO. Operations validate input with the domain rules, enforce
//! relationship integrity, and translate every lower-level error into an
//! [`ApiError`]. Nothing here knows about HTTP.

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

mod actors;
mod config;
mod error;
mod genres;
mod listing;
mod movies;
mod request_response;

#[cfg(test)]
mod tests;

use time::{Date, OffsetDateTime};

pub use actors::{create_actor, delete_actor, get_actor, list_actors, search_actors, update_actor};
pub use config::{MovieDeletePolicy, ServiceConfig};
pub use error::{
    ApiError, DUPLICATE_GENRE_NAME, GENERIC_CONSTRAINT_ERROR, translate_domain_error,
    translate_persistence_error,
};
pub use genres::{create_genre, delete_genre, get_genre, list_genres, update_genre};
pub use movies::{
    create_movie, delete_movie, get_movie, list_movie_actors, list_movies, search_movies,
    update_movie,
};
pub use request_response::{
    ActorResponse, CreateActorRequest, CreateGenreRequest, CreateMovieRequest, DeleteQuery,
    EntityRef, GenreResponse, ListActorsQuery, ListMoviesQuery, MovieResponse, SearchMoviesQuery,
    UpdateActorRequest, UpdateGenreRequest, UpdateMovieRequest,
};

/// The current UTC date, used as "today" by birth date validation.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
