// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use reelbase_domain::{Genre, GenreDraft};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{genres, movie_genres};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a genre and returns its id.
///
/// # Errors
///
/// Returns a unique `ConstraintViolation` if the name is taken.
pub fn insert_genre(conn: &mut _, draft: &GenreDraft) -> Result<i64, PersistenceError> {
    diesel::insert_into(genres::table)
        .values(genres::name.eq(&draft.name))
        .execute(conn)?;

    let genre_id: i64 = conn.get_last_insert_rowid()?;
    info!(genre_id, name = %draft.name, "Inserted genre");
    Ok(genre_id)
}
}

backend_fn! {
/// Renames a genre.
///
/// # Errors
///
/// Returns `NotFound` if no row has the genre's id, or a unique
/// `ConstraintViolation` if the name is taken.
pub fn update_genre(conn: &mut _, genre: &Genre) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(genres::table.filter(genres::genre_id.eq(genre.id)))
        .set(genres::name.eq(&genre.name))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Genre with ID {} not found",
            genre.id
        )));
    }

    info!(genre_id = genre.id, "Updated genre");
    Ok(())
}
}

backend_fn! {
/// Deletes a genre, first removing its `movie_genres` rows when
/// `clear_relationships` is set.
///
/// Returns the number of relationship rows removed.
///
/// # Errors
///
/// Returns `NotFound` if the genre does not exist, or the database error.
pub fn delete_genre(
    conn: &mut _,
    genre_id: i64,
    clear_relationships: bool,
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let cleared: usize = if clear_relationships {
            diesel::delete(movie_genres::table.filter(movie_genres::genre_id.eq(genre_id)))
                .execute(conn)?
        } else {
            0
        };
        debug!(genre_id, cleared, "Cleared genre relationships");

        let deleted: usize = diesel::delete(genres::table.filter(genres::genre_id.eq(genre_id)))
            .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Genre with ID {genre_id} not found"
            )));
        }

        info!(genre_id, cleared, "Deleted genre");
        Ok(cleared)
    })
}
}
