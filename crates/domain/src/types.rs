// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use time::Date;

/// The kinds of catalogue entity.
///
/// Used to name the entity involved in an error without carrying the
/// entity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Actor,
    Genre,
    Movie,
}

impl EntityKind {
    /// Capitalised label, e.g. `"Genre"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Actor => "Actor",
            Self::Genre => "Genre",
            Self::Movie => "Movie",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actor => write!(f, "actor"),
            Self::Genre => write!(f, "genre"),
            Self::Movie => write!(f, "movie"),
        }
    }
}

/// Implements id-only identity for a persisted entity.
///
/// Two values with the same id are the same row, whatever their other
/// fields say. This is what set membership and ordering use; full value
/// comparison is `same_values`.
macro_rules! id_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.id.cmp(&other.id)
            }
        }
    };
}

/// A persisted actor.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Surrogate identifier assigned by the database.
    pub id: i64,
    pub name: String,
    pub birth_date: Date,
}

id_identity!(Actor);

impl Actor {
    #[must_use]
    pub const fn new(id: i64, name: String, birth_date: Date) -> Self {
        Self {
            id,
            name,
            birth_date,
        }
    }

    /// Compares every field, not just the id.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.birth_date == other.birth_date
    }
}

/// A persisted genre.
#[derive(Debug, Clone)]
pub struct Genre {
    /// Surrogate identifier assigned by the database.
    pub id: i64,
    pub name: String,
}

id_identity!(Genre);

impl Genre {
    #[must_use]
    pub const fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }

    /// Compares every field, not just the id.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

/// A persisted movie together with its related genres and actors.
///
/// The movie side owns both relationships: the join rows are written
/// and replaced through the movie.
#[derive(Debug, Clone)]
pub struct Movie {
    /// Surrogate identifier assigned by the database.
    pub id: i64,
    pub title: String,
    pub release_year: i32,
    /// Running time in minutes.
    pub duration: i32,
    pub genres: BTreeSet<Genre>,
    pub actors: BTreeSet<Actor>,
}

id_identity!(Movie);

impl Movie {
    /// Creates a movie with no relationships.
    #[must_use]
    pub const fn new(id: i64, title: String, release_year: i32, duration: i32) -> Self {
        Self {
            id,
            title,
            release_year,
            duration,
            genres: BTreeSet::new(),
            actors: BTreeSet::new(),
        }
    }

    /// Compares the scalar fields and the related ids.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.release_year == other.release_year
            && self.duration == other.duration
            && self.genre_ids().eq(other.genre_ids())
            && self.actor_ids().eq(other.actor_ids())
    }

    /// Ids of the related genres, ascending.
    pub fn genre_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.genres.iter().map(|genre| genre.id)
    }

    /// Ids of the related actors, ascending.
    pub fn actor_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.actors.iter().map(|actor| actor.id)
    }
}
