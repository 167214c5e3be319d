// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field rules for catalogue entities.
//!
//! Each `validate_*` function checks one field and returns the normalised
//! value (trimmed strings) or an `InvalidField` error naming the field as
//! clients see it. Drafts run every rule for a create request and report
//! all failures together; patches run the rules only for fields that are
//! present, treating blank strings as absent.

use std::collections::BTreeMap;
use time::Date;

use crate::error::DomainError;
use crate::types::{Actor, Genre, Movie};
use crate::{FIRST_RELEASE_YEAR, LAST_RELEASE_YEAR, MAX_DURATION_MINUTES};

const ACTOR_NAME_LEN: (usize, usize) = (2, 100);
const GENRE_NAME_LEN: (usize, usize) = (2, 50);
const TITLE_LEN: (usize, usize) = (2, 100);

/// Collects field violations into a field-name-to-message map.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of `result`, if any, and passes the value through.
    ///
    /// The first violation recorded for a field wins.
    pub fn record<T>(&mut self, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(DomainError::InvalidField { field, message }) => {
                self.errors.entry(field).or_insert(message);
                None
            }
            Err(other) => {
                self.errors
                    .entry(String::from("request"))
                    .or_insert_with(|| other.to_string());
                None
            }
        }
    }

    /// Records a violation directly.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the collected violations into a single error.
    #[must_use]
    pub fn into_error(self) -> DomainError {
        DomainError::InvalidFields(self.errors)
    }

    /// Returns `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFields` holding every recorded violation.
    pub fn finish(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Treats `None`, empty and whitespace-only strings alike as "not provided".
fn provided(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_length(
    value: &str,
    (min, max): (usize, usize),
    field: &str,
    message: &str,
) -> Result<(), DomainError> {
    let len: usize = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::invalid_field(field, message));
    }
    Ok(())
}

/// Validates an actor name.
///
/// Rules: required, 2 to 100 characters, only ASCII letters, whitespace,
/// dots, apostrophes and hyphens.
///
/// # Errors
///
/// Returns `InvalidField` for `name` if any rule fails.
pub fn validate_actor_name(name: Option<&str>) -> Result<String, DomainError> {
    let name: &str =
        provided(name).ok_or_else(|| DomainError::invalid_field("name", "Name is required"))?;

    check_length(
        name,
        ACTOR_NAME_LEN,
        "name",
        "Name must be between 2 and 100 characters",
    )?;

    let allowed = |c: char| {
        c.is_ascii_alphabetic() || c.is_ascii_whitespace() || matches!(c, '.' | '\'' | '-')
    };
    if !name.chars().all(allowed) {
        return Err(DomainError::invalid_field(
            "name",
            "Name can only contain letters, spaces, dots, apostrophes and hyphens",
        ));
    }

    Ok(name.to_string())
}

/// Validates a birth date against `today`.
///
/// # Errors
///
/// Returns `InvalidField` for `birthDate` if the date is missing or is not
/// strictly before `today`.
pub fn validate_birth_date(birth_date: Option<Date>, today: Date) -> Result<Date, DomainError> {
    let birth_date: Date = birth_date
        .ok_or_else(|| DomainError::invalid_field("birthDate", "Birth date is required"))?;

    if birth_date >= today {
        return Err(DomainError::invalid_field(
            "birthDate",
            "Birth date must be in the past",
        ));
    }

    Ok(birth_date)
}

/// Validates a genre name.
///
/// Rules: required, 2 to 50 characters, only ASCII letters and whitespace.
///
/// # Errors
///
/// Returns `InvalidField` for `name` if any rule fails.
pub fn validate_genre_name(name: Option<&str>) -> Result<String, DomainError> {
    let name: &str = provided(name)
        .ok_or_else(|| DomainError::invalid_field("name", "Genre name is required"))?;

    check_length(
        name,
        GENRE_NAME_LEN,
        "name",
        "Genre name must be between 2 and 50 characters",
    )?;

    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace())
    {
        return Err(DomainError::invalid_field(
            "name",
            "Genre name can only contain letters and spaces",
        ));
    }

    Ok(name.to_string())
}

/// Validates a movie title: required, 2 to 100 characters.
///
/// # Errors
///
/// Returns `InvalidField` for `title` if any rule fails.
pub fn validate_title(title: Option<&str>) -> Result<String, DomainError> {
    let title: &str = provided(title)
        .ok_or_else(|| DomainError::invalid_field("title", "Movie title is required"))?;

    check_length(
        title,
        TITLE_LEN,
        "title",
        "Title must be between 2 and 100 characters",
    )?;

    Ok(title.to_string())
}

/// Validates a release year: required, within `1888..=2100`.
///
/// # Errors
///
/// Returns `InvalidField` for `releaseYear` if any rule fails.
pub fn validate_release_year(release_year: Option<i32>) -> Result<i32, DomainError> {
    let year: i32 = release_year
        .ok_or_else(|| DomainError::invalid_field("releaseYear", "Release year is required"))?;

    if year < FIRST_RELEASE_YEAR {
        return Err(DomainError::invalid_field(
            "releaseYear",
            "Release year cannot be before 1888 (first movie year)",
        ));
    }
    if year > LAST_RELEASE_YEAR {
        return Err(DomainError::invalid_field(
            "releaseYear",
            "Release year cannot be after 2100",
        ));
    }

    Ok(year)
}

/// Validates a running time: required, positive, at most 600 minutes.
///
/// # Errors
///
/// Returns `InvalidField` for `duration` if any rule fails.
pub fn validate_duration(duration: Option<i32>) -> Result<i32, DomainError> {
    let minutes: i32 =
        duration.ok_or_else(|| DomainError::invalid_field("duration", "Duration is required"))?;

    if minutes <= 0 {
        return Err(DomainError::invalid_field(
            "duration",
            "Duration must be positive",
        ));
    }
    if minutes > MAX_DURATION_MINUTES {
        return Err(DomainError::invalid_field(
            "duration",
            "Duration cannot exceed 600 minutes (10 hours)",
        ));
    }

    Ok(minutes)
}

/// A validated actor ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorDraft {
    pub name: String,
    pub birth_date: Date,
}

impl ActorDraft {
    /// Validates every field of a create request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFields` with one entry per failing field.
    pub fn validate(
        name: Option<&str>,
        birth_date: Option<Date>,
        today: Date,
    ) -> Result<Self, DomainError> {
        let mut errors: FieldErrors = FieldErrors::new();
        let name: Option<String> = errors.record(validate_actor_name(name));
        let birth_date: Option<Date> = errors.record(validate_birth_date(birth_date, today));

        match (name, birth_date) {
            (Some(name), Some(birth_date)) => Ok(Self { name, birth_date }),
            _ => Err(errors.into_error()),
        }
    }
}

/// The validated, present fields of an actor patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub birth_date: Option<Date>,
}

impl ActorPatch {
    /// Validates the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFields` with one entry per failing field.
    pub fn validate(
        name: Option<&str>,
        birth_date: Option<Date>,
        today: Date,
    ) -> Result<Self, DomainError> {
        let mut errors: FieldErrors = FieldErrors::new();
        let name: Option<String> =
            provided(name).and_then(|n| errors.record(validate_actor_name(Some(n))));
        let birth_date: Option<Date> =
            birth_date.and_then(|d| errors.record(validate_birth_date(Some(d), today)));
        errors.finish()?;

        Ok(Self { name, birth_date })
    }

    /// Returns `actor` with the present fields replaced.
    #[must_use]
    pub fn apply(&self, actor: &Actor) -> Actor {
        Actor {
            id: actor.id,
            name: self.name.clone().unwrap_or_else(|| actor.name.clone()),
            birth_date: self.birth_date.unwrap_or(actor.birth_date),
        }
    }
}

/// A validated genre ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreDraft {
    pub name: String,
}

impl GenreDraft {
    /// # Errors
    ///
    /// Returns `InvalidFields` if the name fails its rules.
    pub fn validate(name: Option<&str>) -> Result<Self, DomainError> {
        let mut errors: FieldErrors = FieldErrors::new();
        match errors.record(validate_genre_name(name)) {
            Some(name) => Ok(Self { name }),
            None => Err(errors.into_error()),
        }
    }
}

/// The validated, present fields of a genre patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenrePatch {
    pub name: Option<String>,
}

impl GenrePatch {
    /// # Errors
    ///
    /// Returns `InvalidFields` if a present name fails its rules.
    pub fn validate(name: Option<&str>) -> Result<Self, DomainError> {
        let mut errors: FieldErrors = FieldErrors::new();
        let name: Option<String> =
            provided(name).and_then(|n| errors.record(validate_genre_name(Some(n))));
        errors.finish()?;

        Ok(Self { name })
    }

    #[must_use]
    pub fn apply(&self, genre: &Genre) -> Genre {
        Genre {
            id: genre.id,
            name: self.name.clone().unwrap_or_else(|| genre.name.clone()),
        }
    }
}

/// The validated scalar fields of a movie create request.
///
/// Relationship ids are resolved separately against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub release_year: i32,
    pub duration: i32,
}

impl MovieDraft {
    /// Validates the scalar fields and that at least one genre is referenced.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFields` with one entry per failing field.
    pub fn validate(
        title: Option<&str>,
        release_year: Option<i32>,
        duration: Option<i32>,
        genre_count: usize,
    ) -> Result<Self, DomainError> {
        let mut errors: FieldErrors = FieldErrors::new();
        let title: Option<String> = errors.record(validate_title(title));
        let release_year: Option<i32> = errors.record(validate_release_year(release_year));
        let duration: Option<i32> = errors.record(validate_duration(duration));

        if genre_count == 0 {
            errors.insert("genres", "Movie must have at least one genre");
        }

        match (title, release_year, duration) {
            (Some(title), Some(release_year), Some(duration)) if errors.is_empty() => Ok(Self {
                title,
                release_year,
                duration,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

/// The validated, present scalar fields of a movie patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<i32>,
}

impl MoviePatch {
    /// # Errors
    ///
    /// Returns `InvalidFields` with one entry per failing present field.
    pub fn validate(
        title: Option<&str>,
        release_year: Option<i32>,
        duration: Option<i32>,
    ) -> Result<Self, DomainError> {
        let mut errors: FieldErrors = FieldErrors::new();
        let title: Option<String> =
            provided(title).and_then(|t| errors.record(validate_title(Some(t))));
        let release_year: Option<i32> =
            release_year.and_then(|y| errors.record(validate_release_year(Some(y))));
        let duration: Option<i32> =
            duration.and_then(|d| errors.record(validate_duration(Some(d))));
        errors.finish()?;

        Ok(Self {
            title,
            release_year,
            duration,
        })
    }

    /// Returns `movie` with the present scalar fields replaced.
    ///
    /// Relationships are carried over unchanged.
    #[must_use]
    pub fn apply(&self, movie: &Movie) -> Movie {
        Movie {
            id: movie.id,
            title: self.title.clone().unwrap_or_else(|| movie.title.clone()),
            release_year: self.release_year.unwrap_or(movie.release_year),
            duration: self.duration.unwrap_or(movie.duration),
            genres: movie.genres.clone(),
            actors: movie.actors.clone(),
        }
    }
}
