// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reelbase_domain::PaginationPolicy;

/// What `delete_movie` does with a movie that still has relationships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovieDeletePolicy {
    /// Always delete; the movie's relationship rows are cleared first and
    /// `force` is ignored.
    #[default]
    ClearRelationships,
    /// Refuse to delete a movie with relationships unless `force` is set.
    RequireForce,
}

/// Runtime settings shared by every service operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub pagination: PaginationPolicy,
    pub movie_delete_policy: MovieDeletePolicy,
}

impl ServiceConfig {
    #[must_use]
    pub const fn new(pagination: PaginationPolicy, movie_delete_policy: MovieDeletePolicy) -> Self {
        Self {
            pagination,
            movie_delete_policy,
        }
    }
}
