// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

use crate::error::DomainError;

/// A single broken pagination bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationViolation {
    #[error("Page number cannot be negative. Minimum page number is {min}.")]
    NegativePage { min: i64 },

    #[error("Page size must be at least {min}.")]
    PageSizeTooSmall { min: i64 },

    #[error("Page size cannot exceed {max}. Requested: {requested}.")]
    PageSizeTooLarge { max: i64, requested: i64 },
}

/// Bounds applied to every paginated list request.
///
/// Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub min_page_number: i64,
    pub min_page_size: i64,
    pub max_page_size: i64,
    pub default_page_size: i64,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            min_page_number: 0,
            min_page_size: 1,
            max_page_size: 100,
            default_page_size: 20,
        }
    }
}

impl PaginationPolicy {
    /// Builds a policy with custom default and maximum page sizes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPaginationPolicy` if the maximum is below the minimum
    /// page size or the default lies outside `[min_page_size, max_page_size]`.
    pub fn new(default_page_size: i64, max_page_size: i64) -> Result<Self, DomainError> {
        let base: Self = Self::default();

        if max_page_size < base.min_page_size {
            return Err(DomainError::InvalidPaginationPolicy(format!(
                "maximum page size {max_page_size} is below the minimum of {}",
                base.min_page_size
            )));
        }
        if default_page_size < base.min_page_size || default_page_size > max_page_size {
            return Err(DomainError::InvalidPaginationPolicy(format!(
                "default page size {default_page_size} must be between {} and {max_page_size}",
                base.min_page_size
            )));
        }

        Ok(Self {
            max_page_size,
            default_page_size,
            ..base
        })
    }

    /// Checks a page number and size against every bound.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPagination` listing each violated bound in the order
    /// page, then size.
    pub fn validate(&self, page: i64, size: i64) -> Result<PageRequest, DomainError> {
        let mut violations: Vec<PaginationViolation> = Vec::new();

        if page < self.min_page_number {
            violations.push(PaginationViolation::NegativePage {
                min: self.min_page_number,
            });
        }
        if size < self.min_page_size {
            violations.push(PaginationViolation::PageSizeTooSmall {
                min: self.min_page_size,
            });
        } else if size > self.max_page_size {
            violations.push(PaginationViolation::PageSizeTooLarge {
                max: self.max_page_size,
                requested: size,
            });
        }

        if !violations.is_empty() {
            return Err(DomainError::InvalidPagination(violations));
        }

        Ok(PageRequest { page, size })
    }

    /// Decides whether a list request is paginated.
    ///
    /// Returns `None` when neither `page` nor `size` was supplied. Otherwise
    /// fills the missing one from the defaults and validates the pair.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPagination` if the resolved pair breaks a bound.
    pub fn resolve(
        &self,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<Option<PageRequest>, DomainError> {
        if page.is_none() && size.is_none() {
            return Ok(None);
        }

        let page: i64 = page.unwrap_or(self.min_page_number);
        let size: i64 = size.unwrap_or(self.default_page_size);
        self.validate(page, size).map(Some)
    }
}

/// A validated page number and size.
///
/// Only constructed through `PaginationPolicy`, so both fields are
/// non-negative and `size` is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Zero-based page number.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> i64 {
        self.size
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    /// Maximum number of rows to return.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.size
    }
}
