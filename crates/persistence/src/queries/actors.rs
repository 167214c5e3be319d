// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor queries.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use reelbase_domain::Actor;
use tracing::debug;

use super::{LIKE_ESCAPE, contains_pattern, lower, parse_birth_date, to_count};
use crate::criteria::{ActorCriteria, PageWindow};
use crate::diesel_schema::{actors, movie_actors};
use crate::error::PersistenceError;

type ActorRow = (i64, String, String);

fn actor_from_row((actor_id, name, birth_date): ActorRow) -> Result<Actor, PersistenceError> {
    Ok(Actor::new(actor_id, name, parse_birth_date(&birth_date)?))
}

/// Boxed `actors` query with the criteria applied.
macro_rules! actor_criteria_query {
    ($criteria:expr) => {{
        let mut query = actors::table.into_boxed();
        if let ActorCriteria::NameContains(fragment) = $criteria {
            query = query.filter(
                lower(actors::name)
                    .like(contains_pattern(fragment))
                    .escape(LIKE_ESCAPE),
            );
        }
        query
    }};
}

backend_fn! {
/// Looks up an actor by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored birth date is corrupt.
pub fn find_actor(conn: &mut _, actor_id: i64) -> Result<Option<Actor>, PersistenceError> {
    let row: Option<ActorRow> = actors::table
        .filter(actors::actor_id.eq(actor_id))
        .select((actors::actor_id, actors::name, actors::birth_date))
        .first::<ActorRow>(conn)
        .optional()?;

    row.map(actor_from_row).transpose()
}
}

backend_fn! {
/// Lists actors matching `criteria` in id order, optionally one window only.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_actors(
    conn: &mut _,
    criteria: &ActorCriteria,
    window: Option<PageWindow>,
) -> Result<Vec<Actor>, PersistenceError> {
    debug!(?criteria, ?window, "Listing actors");

    let mut query = actor_criteria_query!(criteria)
        .select((actors::actor_id, actors::name, actors::birth_date))
        .order(actors::actor_id.asc());

    if let Some(window) = window {
        query = query.offset(window.offset).limit(window.limit);
    }

    query
        .load::<ActorRow>(conn)?
        .into_iter()
        .map(actor_from_row)
        .collect()
}
}

backend_fn! {
/// Counts actors matching `criteria`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_actors(conn: &mut _, criteria: &ActorCriteria) -> Result<u64, PersistenceError> {
    let count: i64 = actor_criteria_query!(criteria).count().get_result::<i64>(conn)?;
    to_count(count)
}
}

backend_fn! {
/// Lists the actors related to a movie, in id order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_actors_for_movie(conn: &mut _, movie_id: i64) -> Result<Vec<Actor>, PersistenceError> {
    movie_actors::table
        .inner_join(actors::table)
        .filter(movie_actors::movie_id.eq(movie_id))
        .select((actors::actor_id, actors::name, actors::birth_date))
        .order(actors::actor_id.asc())
        .load::<ActorRow>(conn)?
        .into_iter()
        .map(actor_from_row)
        .collect()
}
}

backend_fn! {
/// Counts the movies an actor appears in.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_movies_for_actor(conn: &mut _, actor_id: i64) -> Result<u64, PersistenceError> {
    let count: i64 = movie_actors::table
        .filter(movie_actors::actor_id.eq(actor_id))
        .count()
        .get_result::<i64>(conn)?;
    to_count(count)
}
}
