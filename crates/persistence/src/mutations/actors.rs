// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use reelbase_domain::{Actor, ActorDraft};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{actors, movie_actors};
use crate::error::PersistenceError;
use crate::queries::format_birth_date;

backend_fn! {
/// Inserts an actor and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_actor(conn: &mut _, draft: &ActorDraft) -> Result<i64, PersistenceError> {
    let birth_date: String = format_birth_date(draft.birth_date)?;

    diesel::insert_into(actors::table)
        .values((
            actors::name.eq(&draft.name),
            actors::birth_date.eq(&birth_date),
        ))
        .execute(conn)?;

    let actor_id: i64 = conn.get_last_insert_rowid()?;
    info!(actor_id, name = %draft.name, "Inserted actor");
    Ok(actor_id)
}
}

backend_fn! {
/// Overwrites an actor's name and birth date.
///
/// # Errors
///
/// Returns `NotFound` if no row has the actor's id.
pub fn update_actor(conn: &mut _, actor: &Actor) -> Result<(), PersistenceError> {
    let birth_date: String = format_birth_date(actor.birth_date)?;

    let updated: usize = diesel::update(actors::table.filter(actors::actor_id.eq(actor.id)))
        .set((
            actors::name.eq(&actor.name),
            actors::birth_date.eq(&birth_date),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Actor with ID {} not found",
            actor.id
        )));
    }

    info!(actor_id = actor.id, "Updated actor");
    Ok(())
}
}

backend_fn! {
/// Deletes an actor, first removing its `movie_actors` rows when
/// `clear_relationships` is set.
///
/// Returns the number of relationship rows removed. Without clearing, an
/// actor that still appears in a movie fails with a foreign key violation.
///
/// # Errors
///
/// Returns `NotFound` if the actor does not exist, or the database error.
pub fn delete_actor(
    conn: &mut _,
    actor_id: i64,
    clear_relationships: bool,
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let cleared: usize = if clear_relationships {
            diesel::delete(movie_actors::table.filter(movie_actors::actor_id.eq(actor_id)))
                .execute(conn)?
        } else {
            0
        };
        debug!(actor_id, cleared, "Cleared actor relationships");

        let deleted: usize = diesel::delete(actors::table.filter(actors::actor_id.eq(actor_id)))
            .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Actor with ID {actor_id} not found"
            )));
        }

        info!(actor_id, cleared, "Deleted actor");
        Ok(cleared)
    })
}
}
