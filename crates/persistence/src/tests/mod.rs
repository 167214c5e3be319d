// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod actor_tests;
#[cfg(feature = "mysql")]
mod backend_validation_tests;

use std::collections::BTreeSet;
use time::{Date, Month};

use reelbase_domain::{Actor, ActorDraft, Genre, GenreDraft, Movie, MovieDraft};

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_actor(persistence: &mut Persistence, name: &str, year: i32) -> Actor {
    let draft: ActorDraft = ActorDraft {
        name: name.to_string(),
        birth_date: Date::from_calendar_date(year, Month::June, 15).expect("valid date"),
    };
    persistence.create_actor(&draft).expect("actor inserted")
}

pub fn create_test_genre(persistence: &mut Persistence, name: &str) -> Genre {
    let draft: GenreDraft = GenreDraft {
        name: name.to_string(),
    };
    persistence.create_genre(&draft).expect("genre inserted")
}

pub fn create_test_movie(
    persistence: &mut Persistence,
    title: &str,
    release_year: i32,
    genres: &[&Genre],
    actors: &[&Actor],
) -> Movie {
    let draft: MovieDraft = MovieDraft {
        title: title.to_string(),
        release_year,
        duration: 120,
    };
    let genre_ids: BTreeSet<i64> = genres.iter().map(|g| g.id).collect();
    let actor_ids: BTreeSet<i64> = actors.iter().map(|a| a.id).collect();
    persistence
        .create_movie(&draft, &genre_ids, &actor_ids)
        .expect("movie inserted")
}
