// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod error;
mod listing;
mod pagination;
mod validation;

use time::{Date, Month};

/// A fixed "today" so birth-date rules are deterministic.
pub fn test_today() -> Date {
    Date::from_calendar_date(2026, Month::March, 15).expect("valid test date")
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}
