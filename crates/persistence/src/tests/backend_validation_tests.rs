// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MariaDB/MySQL backend validation.
//!
//! Every test here is `#[ignore]`d and runs only through
//! `cargo xtask test-mariadb`, which provisions a `MariaDB` container and
//! sets `DATABASE_URL` and `REELBASE_TEST_BACKEND=mariadb`. The tests check
//! schema and constraint behaviour; business rules are covered by the
//! `SQLite` suite.

use diesel::MysqlConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use std::env;

use reelbase_domain::{Genre, GenreDraft, Movie, MovieDraft};

use crate::backend::mysql;
use crate::{MovieCriteria, Persistence, PersistenceError};

fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

fn verify_mariadb_test_environment() {
    let backend = env::var("REELBASE_TEST_BACKEND").expect(
        "REELBASE_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "REELBASE_TEST_BACKEND must be 'mariadb'");
}

/// Unique suffix so repeated runs against one container do not collide.
fn unique_suffix() -> String {
    let nanos: u128 = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    // Genre names allow letters only.
    nanos
        .to_string()
        .chars()
        .map(|c| char::from_digit(c.to_digit(10).unwrap() + 10, 36).unwrap())
        .collect()
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url: String = get_mariadb_url();

    let result = mysql::initialize_database(&url);
    assert!(result.is_ok(), "Migrations failed: {:?}", result.err());
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_foreign_keys_enforced() {
    verify_mariadb_test_environment();
    let mut conn: MysqlConnection = MysqlConnection::establish(&get_mariadb_url()).unwrap();
    mysql::run_migrations(&mut conn).unwrap();

    assert!(mysql::verify_foreign_key_enforcement(&mut conn).is_ok());
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_genre_unique_constraint() {
    verify_mariadb_test_environment();
    let mut persistence: Persistence = Persistence::new_with_mysql(&get_mariadb_url()).unwrap();

    let name: String = format!("Genre {}", unique_suffix());
    persistence
        .create_genre(&GenreDraft { name: name.clone() })
        .unwrap();
    let err: PersistenceError = persistence
        .create_genre(&GenreDraft { name })
        .unwrap_err();

    assert!(err.is_unique_violation(), "unexpected error: {err:?}");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_movie_round_trip_and_force_delete() {
    verify_mariadb_test_environment();
    let mut persistence: Persistence = Persistence::new_with_mysql(&get_mariadb_url()).unwrap();

    let genre: Genre = persistence
        .create_genre(&GenreDraft {
            name: format!("Noir {}", unique_suffix()),
        })
        .unwrap();
    let draft: MovieDraft = MovieDraft {
        title: String::from("Backend Check"),
        release_year: 1950,
        duration: 90,
    };
    let movie: Movie = persistence
        .create_movie(&draft, &BTreeSet::from([genre.id]), &BTreeSet::new())
        .unwrap();

    let by_genre: Vec<Movie> = persistence
        .list_movies(&MovieCriteria::Genre(genre.id), None)
        .unwrap();
    assert_eq!(by_genre.len(), 1);
    assert!(by_genre[0].same_values(&movie));

    assert!(persistence.delete_genre(genre.id, false).is_err());
    assert_eq!(persistence.delete_genre(genre.id, true).unwrap(), 1);
    assert_eq!(persistence.delete_movie(movie.id, true).unwrap(), 0);
}
