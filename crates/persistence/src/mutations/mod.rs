// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalogue writes.
//!
//! Composite writes (a row plus its relationship rows, or relationship
//! cleanup plus a delete) run inside one transaction and roll back as a
//! unit. Like `queries`, every mutation is generated per backend by
//! `backend_fn!`.

pub mod actors;
pub mod genres;
pub mod movies;
