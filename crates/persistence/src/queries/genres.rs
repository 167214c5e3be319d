// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Genre queries.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use reelbase_domain::Genre;

use super::{lower, to_count};
use crate::diesel_schema::{genres, movie_genres};
use crate::error::PersistenceError;

type GenreRow = (i64, String);

backend_fn! {
/// Looks up a genre by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_genre(conn: &mut _, genre_id: i64) -> Result<Option<Genre>, PersistenceError> {
    let row: Option<GenreRow> = genres::table
        .filter(genres::genre_id.eq(genre_id))
        .select((genres::genre_id, genres::name))
        .first::<GenreRow>(conn)
        .optional()?;

    Ok(row.map(|(id, name)| Genre::new(id, name)))
}
}

backend_fn! {
/// Finds a genre whose name equals `name` ignoring case.
///
/// `exclude_id` skips one genre, so a genre being renamed does not
/// collide with itself.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_genre_by_name(
    conn: &mut _,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<Option<Genre>, PersistenceError> {
    let mut query = genres::table
        .filter(lower(genres::name).eq(name.to_lowercase()))
        .into_boxed();

    if let Some(id) = exclude_id {
        query = query.filter(genres::genre_id.ne(id));
    }

    let row: Option<GenreRow> = query
        .select((genres::genre_id, genres::name))
        .first::<GenreRow>(conn)
        .optional()?;

    Ok(row.map(|(id, name)| Genre::new(id, name)))
}
}

backend_fn! {
/// Lists every genre in id order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_genres(conn: &mut _) -> Result<Vec<Genre>, PersistenceError> {
    let rows: Vec<GenreRow> = genres::table
        .select((genres::genre_id, genres::name))
        .order(genres::genre_id.asc())
        .load::<GenreRow>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| Genre::new(id, name))
        .collect())
}
}

backend_fn! {
/// Counts the movies tagged with a genre.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_movies_for_genre(conn: &mut _, genre_id: i64) -> Result<u64, PersistenceError> {
    let count: i64 = movie_genres::table
        .filter(movie_genres::genre_id.eq(genre_id))
        .count()
        .get_result::<i64>(conn)?;
    to_count(count)
}
}
