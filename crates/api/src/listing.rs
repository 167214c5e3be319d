// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reelbase_domain::{Listing, Page, PageRequest, PaginationPolicy};
use reelbase_persistence::{PageWindow, Persistence, PersistenceError};
use tracing::debug;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};

/// Runs a list query either paged or in full, depending on whether the
/// caller asked for a page.
///
/// `count` is only called for paged requests.
pub(crate) fn load_listing<T>(
    persistence: &mut Persistence,
    policy: &PaginationPolicy,
    page: Option<i64>,
    size: Option<i64>,
    count: impl FnOnce(&mut Persistence) -> Result<u64, PersistenceError>,
    load: impl FnOnce(&mut Persistence, Option<PageWindow>) -> Result<Vec<T>, PersistenceError>,
) -> Result<Listing<T>, ApiError> {
    let request: Option<PageRequest> = policy.resolve(page, size).map_err(translate_domain_error)?;

    let Some(request) = request else {
        let items: Vec<T> = load(persistence, None).map_err(translate_persistence_error)?;
        return Ok(Listing::All(items));
    };

    debug!(page = request.page(), size = request.size(), "Loading page");
    let total: u64 = count(persistence).map_err(translate_persistence_error)?;
    let items: Vec<T> =
        load(persistence, Some(PageWindow::from(request))).map_err(translate_persistence_error)?;

    Ok(Listing::Page(Page::new(items, request, total)))
}

/// Trims a text filter, treating blank as absent.
pub(crate) fn text_filter(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
