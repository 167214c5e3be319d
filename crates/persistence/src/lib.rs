// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Reelbase movie catalogue.
//!
//! Stores actors, genres and movies plus the two relationship tables
//! (`movie_genres`, `movie_actors`) through Diesel.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (always compiled) backs development and every standard
//!   test, usually as an isolated in-memory database.
//! - **`MariaDB`/`MySQL`** is compiled with the `mysql` feature and validated
//!   by `#[ignore]`d tests run through `cargo xtask test-mariadb`.
//!
//! ## Migration Strategy
//!
//! SQL syntax differs between backends, so there are two migration
//! directories with identical schema semantics:
//!
//! - `migrations/` for `SQLite`
//! - `migrations_mysql/` for `MySQL`/`MariaDB`
//!
//! Foreign keys never cascade. Relationship rows are removed explicitly by
//! the delete mutations, inside the same transaction as the delete.

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

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use reelbase_domain::{Actor, ActorDraft, Genre, GenreDraft, Movie, MovieDraft};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique names for in-memory databases, one per `new_in_memory()` call.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates monomorphic backend-specific query/mutation functions.
///
/// From one body this emits `<name>_sqlite` taking `&mut SqliteConnection`
/// and, with the `mysql` feature, `<name>_mysql` taking
/// `&mut MysqlConnection`. Diesel needs a concrete backend type at compile
/// time, so the body is duplicated rather than made generic. Dispatch
/// happens only in the `Persistence` adapter.
///
/// ```ignore
/// backend_fn! {
///     pub fn genre_name(conn: &mut _, genre_id: i64) -> Result<String, PersistenceError> {
///         diesel_schema::genres::table
///             .filter(diesel_schema::genres::genre_id.eq(genre_id))
///             .select(diesel_schema::genres::name)
///             .first::<String>(conn)
///             .map_err(Into::into)
///     }
/// }
/// ```
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            $(#[$meta])*
            #[cfg(feature = "mysql")]
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod criteria;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use criteria::{ActorCriteria, MovieCriteria, PageWindow};
pub use error::{ConstraintKind, PersistenceError};

use backend::PersistenceBackend;

/// The live connection, one variant per compiled backend.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    #[cfg(feature = "mysql")]
    Mysql(MysqlConnection),
}

/// Backend-agnostic persistence adapter for the catalogue.
///
/// The backend is chosen once at construction; every method dispatches to
/// the matching generated function.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates an adapter over a fresh, isolated in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_reelbase_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates an adapter over a file-based `SQLite` database, in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates an adapter over a `MySQL`/`MariaDB` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    #[cfg(feature = "mysql")]
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;
        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Short name of the active backend, for logs.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match &self.conn {
            BackendConnection::Sqlite(_) => "sqlite",
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(_) => "mysql",
        }
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Actors
    // ========================================================================

    /// Inserts a validated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_actor(&mut self, draft: &ActorDraft) -> Result<Actor, PersistenceError> {
        let actor_id: i64 = match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::actors::insert_actor_sqlite(conn, draft)?,
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => mutations::actors::insert_actor_mysql(conn, draft)?,
        };
        Ok(Actor::new(actor_id, draft.name.clone(), draft.birth_date))
    }

    /// Looks up an actor by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_actor(&mut self, actor_id: i64) -> Result<Option<Actor>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::actors::find_actor_sqlite(conn, actor_id),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => queries::actors::find_actor_mysql(conn, actor_id),
        }
    }

    /// Lists actors matching `criteria` in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_actors(
        &mut self,
        criteria: &ActorCriteria,
        window: Option<PageWindow>,
    ) -> Result<Vec<Actor>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::actors::list_actors_sqlite(conn, criteria, window)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                queries::actors::list_actors_mysql(conn, criteria, window)
            }
        }
    }

    /// Counts actors matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_actors(&mut self, criteria: &ActorCriteria) -> Result<u64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::actors::count_actors_sqlite(conn, criteria),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => queries::actors::count_actors_mysql(conn, criteria),
        }
    }

    /// Overwrites an existing actor.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the actor does not exist.
    pub fn update_actor(&mut self, actor: &Actor) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::actors::update_actor_sqlite(conn, actor),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => mutations::actors::update_actor_mysql(conn, actor),
        }
    }

    /// Counts the movies an actor appears in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_movies_for_actor(&mut self, actor_id: i64) -> Result<u64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::actors::count_movies_for_actor_sqlite(conn, actor_id)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                queries::actors::count_movies_for_actor_mysql(conn, actor_id)
            }
        }
    }

    /// Deletes an actor, clearing its relationship rows first if asked.
    ///
    /// Returns the number of relationship rows removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the actor does not exist, or a foreign key
    /// violation if it still has relationships and clearing was not asked.
    pub fn delete_actor(
        &mut self,
        actor_id: i64,
        clear_relationships: bool,
    ) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::actors::delete_actor_sqlite(conn, actor_id, clear_relationships)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                mutations::actors::delete_actor_mysql(conn, actor_id, clear_relationships)
            }
        }
    }

    /// Lists the actors of a movie in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_actors_for_movie(&mut self, movie_id: i64) -> Result<Vec<Actor>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::actors::list_actors_for_movie_sqlite(conn, movie_id)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                queries::actors::list_actors_for_movie_mysql(conn, movie_id)
            }
        }
    }

    // ========================================================================
    // Genres
    // ========================================================================

    /// Inserts a validated genre.
    ///
    /// # Errors
    ///
    /// Returns a unique `ConstraintViolation` if the name is taken.
    pub fn create_genre(&mut self, draft: &GenreDraft) -> Result<Genre, PersistenceError> {
        let genre_id: i64 = match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::genres::insert_genre_sqlite(conn, draft)?,
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => mutations::genres::insert_genre_mysql(conn, draft)?,
        };
        Ok(Genre::new(genre_id, draft.name.clone()))
    }

    /// Looks up a genre by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_genre(&mut self, genre_id: i64) -> Result<Option<Genre>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::genres::find_genre_sqlite(conn, genre_id),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => queries::genres::find_genre_mysql(conn, genre_id),
        }
    }

    /// Finds a genre with the same name ignoring case, other than `exclude_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_genre_by_name(
        &mut self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Genre>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::genres::find_genre_by_name_sqlite(conn, name, exclude_id)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                queries::genres::find_genre_by_name_mysql(conn, name, exclude_id)
            }
        }
    }

    /// Lists every genre in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_genres(&mut self) -> Result<Vec<Genre>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::genres::list_genres_sqlite(conn),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => queries::genres::list_genres_mysql(conn),
        }
    }

    /// Renames an existing genre.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the genre does not exist, or a unique
    /// `ConstraintViolation` if the name is taken.
    pub fn update_genre(&mut self, genre: &Genre) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::genres::update_genre_sqlite(conn, genre),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => mutations::genres::update_genre_mysql(conn, genre),
        }
    }

    /// Counts the movies tagged with a genre.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_movies_for_genre(&mut self, genre_id: i64) -> Result<u64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::genres::count_movies_for_genre_sqlite(conn, genre_id)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                queries::genres::count_movies_for_genre_mysql(conn, genre_id)
            }
        }
    }

    /// Deletes a genre, clearing its relationship rows first if asked.
    ///
    /// Returns the number of relationship rows removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the genre does not exist, or a foreign key
    /// violation if it still has relationships and clearing was not asked.
    pub fn delete_genre(
        &mut self,
        genre_id: i64,
        clear_relationships: bool,
    ) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::genres::delete_genre_sqlite(conn, genre_id, clear_relationships)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                mutations::genres::delete_genre_mysql(conn, genre_id, clear_relationships)
            }
        }
    }

    // ========================================================================
    // Movies
    // ========================================================================

    /// Inserts a movie with its relationships and returns it fully loaded.
    ///
    /// # Errors
    ///
    /// Returns the database error if any write fails; nothing is persisted.
    pub fn create_movie(
        &mut self,
        draft: &MovieDraft,
        genre_ids: &BTreeSet<i64>,
        actor_ids: &BTreeSet<i64>,
    ) -> Result<Movie, PersistenceError> {
        let movie_id: i64 = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::movies::insert_movie_sqlite(conn, draft, genre_ids, actor_ids)?
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                mutations::movies::insert_movie_mysql(conn, draft, genre_ids, actor_ids)?
            }
        };

        self.get_movie(movie_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Movie with ID {movie_id} vanished after insert"))
        })
    }

    /// Looks up a movie by id, with its genres and actors.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_movie(&mut self, movie_id: i64) -> Result<Option<Movie>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::movies::find_movie_sqlite(conn, movie_id),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => queries::movies::find_movie_mysql(conn, movie_id),
        }
    }

    /// Lists movies matching `criteria` in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn list_movies(
        &mut self,
        criteria: &MovieCriteria,
        window: Option<PageWindow>,
    ) -> Result<Vec<Movie>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::movies::list_movies_sqlite(conn, criteria, window)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                queries::movies::list_movies_mysql(conn, criteria, window)
            }
        }
    }

    /// Counts movies matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_movies(&mut self, criteria: &MovieCriteria) -> Result<u64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::movies::count_movies_sqlite(conn, criteria),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => queries::movies::count_movies_mysql(conn, criteria),
        }
    }

    /// Writes a movie's scalars and replaces its relationship sets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the movie does not exist, or the database
    /// error; nothing changes on failure.
    pub fn update_movie(&mut self, movie: &Movie) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::movies::update_movie_sqlite(conn, movie),
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => mutations::movies::update_movie_mysql(conn, movie),
        }
    }

    /// Counts a movie's genre and actor relationship rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn count_movie_relationships(&mut self, movie_id: i64) -> Result<u64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::movies::count_movie_relationships_sqlite(conn, movie_id)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                queries::movies::count_movie_relationships_mysql(conn, movie_id)
            }
        }
    }

    /// Deletes a movie, clearing its relationship rows first if asked.
    ///
    /// Returns the number of relationship rows removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the movie does not exist, or a foreign key
    /// violation if it still has relationships and clearing was not asked.
    pub fn delete_movie(
        &mut self,
        movie_id: i64,
        clear_relationships: bool,
    ) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::movies::delete_movie_sqlite(conn, movie_id, clear_relationships)
            }
            #[cfg(feature = "mysql")]
            BackendConnection::Mysql(conn) => {
                mutations::movies::delete_movie_mysql(conn, movie_id, clear_relationships)
            }
        }
    }
}
