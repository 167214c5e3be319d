// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use reelbase_domain::{Movie, MovieDraft};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{movie_actors, movie_genres, movies};
use crate::error::PersistenceError;

/// Inserts `movie_genres` and `movie_actors` rows for one movie.
macro_rules! insert_relationships {
    ($conn:ident, $movie_id:expr, $genre_ids:expr, $actor_ids:expr) => {{
        let movie_id: i64 = $movie_id;
        let genre_rows: Vec<_> = $genre_ids
            .map(|genre_id: i64| {
                (
                    movie_genres::movie_id.eq(movie_id),
                    movie_genres::genre_id.eq(genre_id),
                )
            })
            .collect();
        if !genre_rows.is_empty() {
            diesel::insert_into(movie_genres::table)
                .values(genre_rows)
                .execute($conn)?;
        }

        let actor_rows: Vec<_> = $actor_ids
            .map(|actor_id: i64| {
                (
                    movie_actors::movie_id.eq(movie_id),
                    movie_actors::actor_id.eq(actor_id),
                )
            })
            .collect();
        if !actor_rows.is_empty() {
            diesel::insert_into(movie_actors::table)
                .values(actor_rows)
                .execute($conn)?;
        }
    }};
}

backend_fn! {
/// Inserts a movie and its relationship rows in one transaction.
///
/// Returns the new movie id. A missing genre or actor id fails the whole
/// insert with a foreign key violation.
///
/// # Errors
///
/// Returns the database error; nothing is persisted on failure.
pub fn insert_movie(
    conn: &mut _,
    draft: &MovieDraft,
    genre_ids: &BTreeSet<i64>,
    actor_ids: &BTreeSet<i64>,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(movies::table)
            .values((
                movies::title.eq(&draft.title),
                movies::release_year.eq(draft.release_year),
                movies::duration.eq(draft.duration),
            ))
            .execute(conn)?;
        let movie_id: i64 = conn.get_last_insert_rowid()?;

        insert_relationships!(
            conn,
            movie_id,
            genre_ids.iter().copied(),
            actor_ids.iter().copied()
        );

        info!(
            movie_id,
            genres = genre_ids.len(),
            actors = actor_ids.len(),
            "Inserted movie"
        );
        Ok(movie_id)
    })
}
}

backend_fn! {
/// Writes a movie's scalar fields and replaces both relationship sets
/// with the ones it carries, in one transaction.
///
/// # Errors
///
/// Returns `NotFound` if the movie does not exist, or the database error;
/// nothing changes on failure.
pub fn update_movie(conn: &mut _, movie: &Movie) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(movies::table.filter(movies::movie_id.eq(movie.id)))
            .set((
                movies::title.eq(&movie.title),
                movies::release_year.eq(movie.release_year),
                movies::duration.eq(movie.duration),
            ))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Movie with ID {} not found",
                movie.id
            )));
        }

        diesel::delete(movie_genres::table.filter(movie_genres::movie_id.eq(movie.id)))
            .execute(conn)?;
        diesel::delete(movie_actors::table.filter(movie_actors::movie_id.eq(movie.id)))
            .execute(conn)?;
        insert_relationships!(conn, movie.id, movie.genre_ids(), movie.actor_ids());

        info!(movie_id = movie.id, "Updated movie");
        Ok(())
    })
}
}

backend_fn! {
/// Deletes a movie, first removing its relationship rows when
/// `clear_relationships` is set.
///
/// Returns the number of relationship rows removed.
///
/// # Errors
///
/// Returns `NotFound` if the movie does not exist, or the database error.
pub fn delete_movie(
    conn: &mut _,
    movie_id: i64,
    clear_relationships: bool,
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut cleared: usize = 0;
        if clear_relationships {
            cleared += diesel::delete(movie_genres::table.filter(movie_genres::movie_id.eq(movie_id)))
                .execute(conn)?;
            cleared += diesel::delete(movie_actors::table.filter(movie_actors::movie_id.eq(movie_id)))
                .execute(conn)?;
        }
        debug!(movie_id, cleared, "Cleared movie relationships");

        let deleted: usize = diesel::delete(movies::table.filter(movies::movie_id.eq(movie_id)))
            .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Movie with ID {movie_id} not found"
            )));
        }

        info!(movie_id, cleared, "Deleted movie");
        Ok(cleared)
    })
}
}
