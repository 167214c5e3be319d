// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific connection setup.
//!
//! Everything here is code that cannot be written once in Diesel DSL:
//! connection establishment, migrations, PRAGMA/system-variable checks and
//! last-insert-id retrieval. Catalogue queries and mutations live in
//! `queries/` and `mutations/` and are written once for every backend.
//!
//! - `sqlite` is always compiled and backs development and tests.
//! - `mysql` is compiled with the `mysql` feature and targets MySQL/MariaDB.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod sqlite;

use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// Operations whose SQL differs per backend.
pub trait PersistenceBackend: Connection {
    /// Retrieves the id generated by the most recent insert on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Fails unless the backend enforces foreign keys on this connection.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyEnforcementNotEnabled` or a query error.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

#[cfg(feature = "mysql")]
impl PersistenceBackend for diesel::MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
