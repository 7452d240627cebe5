//! # carbon
//!
//! A calendar-aware date/time value with fluent parsing, formatting, comparison and arithmetic.
//!
//! A [`Carbon`] wraps a zoned instant together with the [`Config`] it was built with (layout,
//! zone, language, week start, weekend days and clock). Values are immutable: every operation
//! returns a new value. Operations never panic and never return `Result`: a value that could not
//! be built is an *error value* that remembers why, and every later operation on it passes the
//! error along.
//!
//! ## Examples
//!
//! ```
//! use carbon::prelude::*;
//!
//! let c = Carbon::parse("2020-08-05 13:14:15");
//! assert_eq!("2020-08-05 13:14:15 +0000 UTC", c.to_string());
//! assert_eq!("Wednesday, August 5th 2020", c.format("l, F jK Y"));
//!
//! // month arithmetic carries into the next month by default, or clamps on request
//! let jan31 = Carbon::parse("2020-01-31");
//! assert_eq!("2020-03-02", jan31.add_month().to_date_string());
//! assert_eq!("2020-02-29", jan31.add_month_no_overflow().to_date_string());
//!
//! // errors travel along instead of panicking
//! let bad = Carbon::parse("not a date").add_days(3);
//! assert!(bad.has_error());
//! assert_eq!("", bad.to_date_string());
//! ```
//!
//! Values carry their own config, so a zone or clock set once flows through every derived value:
//!
//! ```
//! use carbon::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let frozen = Utc.with_ymd_and_hms(2020, 8, 5, 13, 14, 15).unwrap();
//! let config = Config::default()
//!     .with_timezone_name("PRC")
//!     .unwrap()
//!     .with_clock(Clock::Frozen(frozen));
//!
//! let now = config.now();
//! assert_eq!("2020-08-05 21:14:15", now.to_date_time_string());
//! assert_eq!("3 days ago", now.sub_days(3).diff_for_humans(None));
//! ```
//!
//! ## Important Terms
//!
//! - **Layout**: a chrono strftime string, such as `%Y-%m-%d`. Used by [`Carbon::layout`] and
//!   [`Carbon::parse_by_layout`]. The pseudo-layouts `unix`, `unixMilli`, `unixMicro` and
//!   `unixNano` stand for unix timestamps.
//! - **Format**: a string in token notation, such as `Y-m-d`. Used by [`Carbon::format`] and
//!   [`Carbon::parse_by_format`]. See the [table](#format-tokens) below.
//! - **Overflow**: what month arithmetic does when the day does not exist in the target month.
//!   See [`Overflow`].
//! - **Status**: whether a value is nil, an error, empty, the zero instant, or valid. See
//!   [`Status`].
//! - **Season**: a meteorological season of the northern hemisphere, three whole months starting
//!   in March, June, September or December. See [`Season`] and [`Carbon::start_of_season`].
//! - **Constellation**: the western zodiac sign of a date. See [`Constellation`].
//!
//! ## Format tokens
//!
//! Examples reference `2020-08-05 13:14:15.999999999` in UTC, a Wednesday in the 32nd ISO week.
//!
//! | Token | Example | Parses? | Description |
//! |---|---|---|---|
//! | `d` | `05` | ✅ | Day of the month, zero-padded |
//! | `j` | `5` | ✅ | Day of the month |
//! | `D` | `Wed` | ✅ | Short weekday name |
//! | `l` | `Wednesday` | ✅ | Weekday name |
//! | `N` | `3` | ✅ | ISO weekday, Monday is `1` |
//! | `w` | `2` | ❌ | Weekday, Monday is `0` |
//! | `K` | `th` | ❌ | Ordinal suffix of the day |
//! | `W` | `32` | ✅ | ISO week of the year, zero-padded |
//! | `F` | `August` | ✅ | Month name |
//! | `M` | `Aug` | ✅ | Short month name |
//! | `m` | `08` | ✅ | Month, zero-padded |
//! | `n` | `8` | ✅ | Month |
//! | `t` | `31` | ❌ | Days in the month |
//! | `q` | `3` | ❌ | Quarter |
//! | `Y` | `2020` | ✅ | Year |
//! | `y` | `20` | ✅ | Two-digit year |
//! | `L` | `1` | ❌ | `1` in a leap year, `0` otherwise |
//! | `c` | `21` | ❌ | Century |
//! | `a` | `pm` | ✅ | Lowercase meridiem |
//! | `A` | `PM` | ✅ | Uppercase meridiem |
//! | `g` | `1` | ✅ | 12-hour hour |
//! | `h` | `01` | ✅ | 12-hour hour, zero-padded |
//! | `G` | `13` | ✅ | 24-hour hour |
//! | `H` | `13` | ✅ | 24-hour hour, zero-padded |
//! | `i` | `14` | ✅ | Minute, zero-padded |
//! | `s` | `15` | ✅ | Second, zero-padded |
//! | `u` | `999` | ✅ | Millisecond |
//! | `v` | `999999` | ✅ | Microsecond |
//! | `x` | `999999999` | ✅ | Nanosecond |
//! | `S` | `1596633255` | ✅ | Unix timestamp in seconds |
//! | `U` | `1596633255999` | alone | Unix timestamp in milliseconds |
//! | `V` | `1596633255999999` | alone | Unix timestamp in microseconds |
//! | `X` | `1596633255999999999` | alone | Unix timestamp in nanoseconds |
//! | `O` | `+0000` | ✅ | Offset |
//! | `P` | `+00:00` | ✅ | Offset with a colon |
//! | `Q` | `Z` | ❌ | Offset, `Z` in UTC |
//! | `R` | `Z` | ❌ | Offset with a colon, `Z` in UTC |
//! | `o` | `0` | ❌ | Offset in seconds |
//! | `Z` | `UTC` | ✅ | Zone abbreviation |
//! | `z` | `UTC` | ❌ | Zone name |
//!
//! "alone" tokens parse only when they are the whole format. Month and weekday names render in the
//! configured [`Language`], and parse in English.
//!
//! ### Escaping
//!
//! A backslash makes the next character literal:
//!
//! ```
//! use carbon::prelude::*;
//!
//! let c = Carbon::parse("2020-08-05");
//! assert_eq!("It is 2020-08-05", c.format(r"\I\t \i\s Y-m-d"));
//! assert_eq!("%Y-%m-%d %% %H", format_to_layout("Y-m-d % H"));
//! ```
//!
//! ## Prelude
//!
//! carbon provides a prelude module for convenience. It contains everything needed to interact
//! with the library.
//!
//! Use it with:
//!
//! ```
//! use carbon::prelude::*;
//! ```
#![warn(missing_docs)]

mod boundary;
mod cache;
mod carbon;
mod comparer;
mod config;
mod difference;
mod duration;
mod error;
mod format;
mod language;
mod outputer;
mod parser;
mod season;
mod traveler;
mod zone;

pub use crate::carbon::{Carbon, Status};
pub use crate::config::{Clock, Config, DEFAULT_LAYOUT};
pub use crate::difference::DiffUnit;
pub use crate::duration::parse_duration;
pub use crate::error::Error;
pub use crate::format::format_to_layout;
pub use crate::language::{Language, DEFAULT_LOCALE};
pub use crate::parser::{
    TIMESTAMP_LAYOUT, TIMESTAMP_MICRO_LAYOUT, TIMESTAMP_MILLI_LAYOUT, TIMESTAMP_NANO_LAYOUT,
};
pub use crate::season::{Constellation, Season};
pub use crate::traveler::Overflow;
pub use crate::zone::{load_timezone, LOCAL};
pub use chrono::Weekday;
pub use chrono_tz::Tz;

/// A convenience module appropriate for glob imports (`use carbon::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::Carbon;
    #[doc(no_inline)]
    pub use crate::Clock;
    #[doc(no_inline)]
    pub use crate::Config;
    #[doc(no_inline)]
    pub use crate::Constellation;
    #[doc(no_inline)]
    pub use crate::DiffUnit;
    #[doc(no_inline)]
    pub use crate::Error;
    #[doc(no_inline)]
    pub use crate::Language;
    #[doc(no_inline)]
    pub use crate::Overflow;
    #[doc(no_inline)]
    pub use crate::Season;
    #[doc(no_inline)]
    pub use crate::Status;
    #[doc(no_inline)]
    pub use crate::Tz;
    #[doc(no_inline)]
    pub use crate::Weekday;
    #[doc(no_inline)]
    pub use crate::format_to_layout;
}
