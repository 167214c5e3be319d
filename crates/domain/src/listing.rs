// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::pagination::PageRequest;

/// One page of a list result plus the metadata needed to walk the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page number.
    pub page: i64,
    pub size: i64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Wraps one page of `content` fetched for `request` out of `total` rows.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total: u64) -> Self {
        let size: u64 = u64::try_from(request.size()).unwrap_or(1).max(1);
        let page: u64 = u64::try_from(request.page()).unwrap_or(0);
        let total_pages: u64 = total.div_ceil(size);

        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements: total,
            total_pages,
            has_next: page.saturating_add(1) < total_pages,
            has_previous: page > 0,
        }
    }

    /// Converts the content, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// The result of a list operation: one page, or everything.
///
/// Serialises as a page object or as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(Page<T>),
    All(Vec<T>),
}

impl<T> Listing<T> {
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Listing<U> {
        match self {
            Self::Page(page) => Listing::Page(page.map(f)),
            Self::All(items) => Listing::All(items.into_iter().map(f).collect()),
        }
    }

    /// The items held, whichever shape.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Page(page) => &page.content,
            Self::All(items) => items,
        }
    }
}
