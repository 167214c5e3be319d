// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only catalogue queries.
//!
//! Every query is generated once per backend by `backend_fn!` (`_sqlite`,
//! and `_mysql` with the `mysql` feature). The `Persistence` adapter in
//! `lib.rs` dispatches to the variant matching its connection.

pub mod actors;
pub mod genres;
pub mod movies;

use diesel::{SqliteConnection, define_sql_function};
use diesel::sql_types::Text;
use num_traits::ToPrimitive;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::PersistenceError;

define_sql_function! {
    /// SQL `LOWER()`.
    fn lower(x: Text) -> Text;
}

/// Replaces `SQLite`'s ASCII-only `LOWER()` with Unicode lowercasing on this
/// connection, so stored text folds the same way as `contains_pattern`.
///
/// `MySQL` lowercases through the column collation and needs no override.
///
/// # Errors
///
/// Returns an error if the function cannot be registered.
pub fn register_unicode_lower(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    lower_utils::register_impl(conn, |text: String| text.to_lowercase())?;
    Ok(())
}

/// Escape character used in every `LIKE` pattern.
pub const LIKE_ESCAPE: char = '!';

/// Storage format of `actors.birth_date`.
const BIRTH_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Builds a lower-cased `%fragment%` pattern with `%`, `_` and the escape
/// character matched literally.
#[must_use]
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern: String = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Parses a stored `YYYY-MM-DD` birth date.
///
/// # Errors
///
/// Returns `CorruptRow` if the text is not a valid date.
pub fn parse_birth_date(raw: &str) -> Result<Date, PersistenceError> {
    Date::parse(raw, BIRTH_DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(format!("Invalid birth date '{raw}': {e}")))
}

/// Formats a birth date for storage.
///
/// # Errors
///
/// Returns `CorruptRow` if the date cannot be formatted (years beyond four digits).
pub fn format_birth_date(date: Date) -> Result<String, PersistenceError> {
    date.format(BIRTH_DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(format!("Cannot format birth date: {e}")))
}

/// Converts a SQL `COUNT(*)` into `u64`.
///
/// # Errors
///
/// Returns `QueryFailed` for a negative count.
pub fn to_count(count: i64) -> Result<u64, PersistenceError> {
    count
        .to_u64()
        .ok_or_else(|| PersistenceError::QueryFailed(format!("Invalid row count: {count}")))
}
