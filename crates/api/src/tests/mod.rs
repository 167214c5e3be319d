// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod error_tests;

use time::{Date, Month};

use reelbase_persistence::Persistence;

use crate::{
    ActorResponse, CreateActorRequest, CreateGenreRequest, CreateMovieRequest, EntityRef,
    GenreResponse, MovieResponse, ServiceConfig, create_actor, create_genre, create_movie,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig::default()
}

/// A fixed "today" so birth date rules are deterministic.
pub fn test_today() -> Date {
    date(2026, Month::March, 15)
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid date")
}

pub fn refs(ids: &[i64]) -> Vec<EntityRef> {
    ids.iter().copied().map(EntityRef::new).collect()
}

pub fn seed_genre(persistence: &mut Persistence, name: &str) -> GenreResponse {
    let request: CreateGenreRequest = CreateGenreRequest {
        name: Some(name.to_string()),
    };
    create_genre(persistence, &request).expect("genre created")
}

pub fn seed_actor(persistence: &mut Persistence, name: &str, birth_date: Date) -> ActorResponse {
    let request: CreateActorRequest = CreateActorRequest {
        name: Some(name.to_string()),
        birth_date: Some(birth_date),
    };
    create_actor(persistence, &request, test_today()).expect("actor created")
}

pub fn movie_request(
    title: &str,
    release_year: i32,
    genre_ids: &[i64],
    actor_ids: &[i64],
) -> CreateMovieRequest {
    CreateMovieRequest {
        title: Some(title.to_string()),
        release_year: Some(release_year),
        duration: Some(120),
        genres: Some(refs(genre_ids)),
        actors: Some(refs(actor_ids)),
    }
}

pub fn seed_movie(
    persistence: &mut Persistence,
    title: &str,
    release_year: i32,
    genre_ids: &[i64],
    actor_ids: &[i64],
) -> MovieResponse {
    let request: CreateMovieRequest = movie_request(title, release_year, genre_ids, actor_ids);
    create_movie(persistence, &request).expect("movie created")
}
