// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reelbase_domain::PageRequest;

/// The single filter applied to a movie listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieCriteria {
    All,
    /// Movies related to this genre id.
    Genre(i64),
    ReleaseYear(i32),
    /// Movies related to this actor id.
    Actor(i64),
    /// Case-insensitive substring of the title.
    TitleContains(String),
}

/// The filter applied to an actor listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorCriteria {
    All,
    /// Case-insensitive substring of the name.
    NameContains(String),
}

/// Rows to skip and rows to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

impl From<PageRequest> for PageWindow {
    fn from(request: PageRequest) -> Self {
        Self {
            offset: request.offset(),
            limit: request.limit(),
        }
    }
}
