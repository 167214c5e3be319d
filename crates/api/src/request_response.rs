// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Every request field is optional so that presence rules are enforced by
//! validation, with a field-level message, rather than by deserialisation.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};
use time::Date;

use reelbase_domain::{Actor, Genre, Movie};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Reads an optional numeric query parameter, treating an empty value as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.parse::<T>())
        .transpose()
        .map_err(<D::Error as de::Error>::custom)
}

/// API request to create an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActorRequest {
    pub name: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub birth_date: Option<Date>,
}

/// API request to patch an actor. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActorRequest {
    /// If present, must equal the id in the path.
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub birth_date: Option<Date>,
}

/// API request to create a genre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateGenreRequest {
    pub name: Option<String>,
}

/// API request to rename a genre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateGenreRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// A reference to an existing entity inside a movie request, e.g. `{"id": 3}`.
///
/// Any other fields sent alongside the id are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EntityRef {
    pub id: Option<i64>,
}

impl EntityRef {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

/// API request to create a movie with its relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<i32>,
    pub genres: Option<Vec<EntityRef>>,
    pub actors: Option<Vec<EntityRef>>,
}

/// API request to patch a movie.
///
/// A present `genres` or `actors` list replaces the whole relationship set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<i32>,
    pub genres: Option<Vec<EntityRef>>,
    pub actors: Option<Vec<EntityRef>>,
}

/// Query parameters of the movie listing.
///
/// At most one filter is applied, chosen by the priority
/// `genre` > `year` > `actor` > `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListMoviesQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub genre: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub actor: Option<i64>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<i64>,
}

/// Query parameters of the movie title search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchMoviesQuery {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<i64>,
}

/// Query parameters of the actor listing and the actor name search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListActorsQuery {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<i64>,
}

/// Query parameters of every delete endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub force: bool,
}

/// An actor as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorResponse {
    pub id: i64,
    pub name: String,
    #[serde(with = "iso_date")]
    pub birth_date: Date,
}

impl From<&Actor> for ActorResponse {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            birth_date: actor.birth_date,
        }
    }
}

/// A genre as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Genre> for GenreResponse {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

/// A movie with its genres and actors, each in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub release_year: i32,
    /// Running time in minutes.
    pub duration: i32,
    pub genres: Vec<GenreResponse>,
    pub actors: Vec<ActorResponse>,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_year: movie.release_year,
            duration: movie.duration,
            genres: movie.genres.iter().map(GenreResponse::from).collect(),
            actors: movie.actors.iter().map(ActorResponse::from).collect(),
        }
    }
}
