// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movie queries.
//!
//! Movies are loaded in two steps: the scalar rows first, then the genre
//! and actor relationships for those rows in batched joins.

use std::collections::{BTreeMap, BTreeSet};

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use reelbase_domain::{Actor, Genre, Movie};
use tracing::debug;

use super::{LIKE_ESCAPE, contains_pattern, lower, parse_birth_date, to_count};
use crate::criteria::{MovieCriteria, PageWindow};
use crate::diesel_schema::{actors, genres, movie_actors, movie_genres, movies};
use crate::error::PersistenceError;

type MovieRow = (i64, String, i32, i32);

/// Upper bound on ids bound into one `IN (...)` list.
const HYDRATION_CHUNK: usize = 500;

/// Boxed `movies` query with the criteria applied.
macro_rules! movie_criteria_query {
    ($criteria:expr) => {{
        let mut query = movies::table.into_boxed();
        match $criteria {
            MovieCriteria::All => {}
            MovieCriteria::Genre(genre_id) => {
                query = query.filter(
                    movies::movie_id.eq_any(
                        movie_genres::table
                            .filter(movie_genres::genre_id.eq(*genre_id))
                            .select(movie_genres::movie_id),
                    ),
                );
            }
            MovieCriteria::ReleaseYear(year) => {
                query = query.filter(movies::release_year.eq(*year));
            }
            MovieCriteria::Actor(actor_id) => {
                query = query.filter(
                    movies::movie_id.eq_any(
                        movie_actors::table
                            .filter(movie_actors::actor_id.eq(*actor_id))
                            .select(movie_actors::movie_id),
                    ),
                );
            }
            MovieCriteria::TitleContains(fragment) => {
                query = query.filter(
                    lower(movies::title)
                        .like(contains_pattern(fragment))
                        .escape(LIKE_ESCAPE),
                );
            }
        }
        query
    }};
}

/// Attaches genres and actors to scalar movie rows, keeping row order.
macro_rules! hydrate_movies {
    ($conn:ident, $rows:expr) => {{
        let rows: Vec<MovieRow> = $rows;
        let ids: Vec<i64> = rows.iter().map(|row| row.0).collect();
        let mut genres_by_movie: BTreeMap<i64, BTreeSet<Genre>> = BTreeMap::new();
        let mut actors_by_movie: BTreeMap<i64, BTreeSet<Actor>> = BTreeMap::new();

        for chunk in ids.chunks(HYDRATION_CHUNK) {
            let genre_rows: Vec<(i64, i64, String)> = movie_genres::table
                .inner_join(genres::table)
                .filter(movie_genres::movie_id.eq_any(chunk))
                .select((movie_genres::movie_id, genres::genre_id, genres::name))
                .load::<(i64, i64, String)>($conn)?;
            for (movie_id, genre_id, name) in genre_rows {
                genres_by_movie
                    .entry(movie_id)
                    .or_default()
                    .insert(Genre::new(genre_id, name));
            }

            let actor_rows: Vec<(i64, i64, String, String)> = movie_actors::table
                .inner_join(actors::table)
                .filter(movie_actors::movie_id.eq_any(chunk))
                .select((
                    movie_actors::movie_id,
                    actors::actor_id,
                    actors::name,
                    actors::birth_date,
                ))
                .load::<(i64, i64, String, String)>($conn)?;
            for (movie_id, actor_id, name, birth_date) in actor_rows {
                actors_by_movie
                    .entry(movie_id)
                    .or_default()
                    .insert(Actor::new(actor_id, name, parse_birth_date(&birth_date)?));
            }
        }

        rows.into_iter()
            .map(|(movie_id, title, release_year, duration)| {
                let mut movie: Movie = Movie::new(movie_id, title, release_year, duration);
                movie.genres = genres_by_movie.remove(&movie_id).unwrap_or_default();
                movie.actors = actors_by_movie.remove(&movie_id).unwrap_or_default();
                movie
            })
            .collect::<Vec<Movie>>()
    }};
}

backend_fn! {
/// Looks up a movie by id together with its genres and actors.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn find_movie(conn: &mut _, movie_id: i64) -> Result<Option<Movie>, PersistenceError> {
    let row: Option<MovieRow> = movies::table
        .filter(movies::movie_id.eq(movie_id))
        .select((
            movies::movie_id,
            movies::title,
            movies::release_year,
            movies::duration,
        ))
        .first::<MovieRow>(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut hydrated: Vec<Movie> = hydrate_movies!(conn, vec![row]);
    Ok(hydrated.pop())
}
}

backend_fn! {
/// Lists movies matching `criteria` in id order, optionally one window only.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn list_movies(
    conn: &mut _,
    criteria: &MovieCriteria,
    window: Option<PageWindow>,
) -> Result<Vec<Movie>, PersistenceError> {
    debug!(?criteria, ?window, "Listing movies");

    let mut query = movie_criteria_query!(criteria)
        .select((
            movies::movie_id,
            movies::title,
            movies::release_year,
            movies::duration,
        ))
        .order(movies::movie_id.asc());

    if let Some(window) = window {
        query = query.offset(window.offset).limit(window.limit);
    }

    let rows: Vec<MovieRow> = query.load::<MovieRow>(conn)?;
    Ok(hydrate_movies!(conn, rows))
}
}

backend_fn! {
/// Counts movies matching `criteria`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_movies(conn: &mut _, criteria: &MovieCriteria) -> Result<u64, PersistenceError> {
    let count: i64 = movie_criteria_query!(criteria).count().get_result::<i64>(conn)?;
    to_count(count)
}
}

backend_fn! {
/// Counts a movie's genre and actor relationship rows together.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn count_movie_relationships(conn: &mut _, movie_id: i64) -> Result<u64, PersistenceError> {
    let genre_links: i64 = movie_genres::table
        .filter(movie_genres::movie_id.eq(movie_id))
        .count()
        .get_result::<i64>(conn)?;
    let actor_links: i64 = movie_actors::table
        .filter(movie_actors::movie_id.eq(movie_id))
        .count()
        .get_result::<i64>(conn)?;

    to_count(genre_links.saturating_add(actor_links))
}
}
