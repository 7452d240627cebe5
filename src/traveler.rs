use crate::{
    carbon::{days_in_month, localize, Carbon},
    duration::parse_duration,
    error::Error,
};
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta};
use chrono_tz::Tz;

const MONTHS_PER_CENTURY: i64 = 1200;
const MONTHS_PER_DECADE: i64 = 120;
const MONTHS_PER_YEAR: i64 = 12;
const MONTHS_PER_QUARTER: i64 = 3;
const DAYS_PER_WEEK: i64 = 7;

/// What month arithmetic does when the day of month does not exist in the target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Keep the day of month and let the excess days roll into the following month:
    /// January 31st plus one month is March 2nd (or 3rd).
    Carry,

    /// Clamp to the last day of the target month: January 31st plus one month is February 29th
    /// (or 28th).
    Clamp,
}

/// Shifts the local calendar month of `dt` by `months`, keeping the wall clock time.
pub(crate) fn shift_months(
    dt: &DateTime<Tz>,
    months: i64,
    overflow: Overflow,
    operation: &'static str,
) -> Result<DateTime<Tz>, Error> {
    let out_of_range = || Error::OutOfRange { operation };
    let naive = dt.naive_local();

    let linear = i64::from(naive.year())
        .checked_mul(MONTHS_PER_YEAR)
        .and_then(|m| m.checked_add(i64::from(naive.month0())))
        .and_then(|m| m.checked_add(months))
        .ok_or_else(out_of_range)?;
    let year = i32::try_from(linear.div_euclid(MONTHS_PER_YEAR)).map_err(|_| out_of_range())?;
    // rem_euclid of 12 is always in 0..12
    let month = linear.rem_euclid(MONTHS_PER_YEAR) as u32 + 1;
    let day = naive.day();

    let date = match overflow {
        Overflow::Carry => NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1)))),
        Overflow::Clamp => {
            NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
        }
    }
    .ok_or_else(out_of_range)?;

    localize(&dt.timezone(), date.and_time(naive.time()))
}

/// Shifts the local calendar date of `dt` by `days`, keeping the wall clock time.
pub(crate) fn shift_days(
    dt: &DateTime<Tz>,
    days: i64,
    operation: &'static str,
) -> Result<DateTime<Tz>, Error> {
    let naive = dt.naive_local();
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        naive.checked_add_days(magnitude)
    } else {
        naive.checked_sub_days(magnitude)
    }
    .ok_or(Error::OutOfRange { operation })?;
    localize(&dt.timezone(), shifted)
}

/// Adds elapsed time to `dt`.
pub(crate) fn shift_elapsed(
    dt: &DateTime<Tz>,
    delta: Option<TimeDelta>,
    operation: &'static str,
) -> Result<DateTime<Tz>, Error> {
    delta
        .and_then(|delta| dt.checked_add_signed(delta))
        .ok_or(Error::OutOfRange { operation })
}

/// Calendar arithmetic.
///
/// Every month based unit (centuries, decades, years, quarters and months) goes through
/// [`Carbon::add_months_with`], so they share both end-of-month policies. Weeks and days move the
/// local calendar date and keep the wall clock. Hours and finer units add elapsed time.
///
/// Results outside the supported range become error values holding [`Error::OutOfRange`]. Empty
/// and error values are returned unchanged.
impl Carbon {
    /// Adds `months` months using the given end-of-month policy.
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let c = Carbon::parse("2020-08-31");
    /// assert_eq!("2020-10-01", c.add_months_with(1, Overflow::Carry).to_date_string());
    /// assert_eq!("2020-09-30", c.add_months_with(1, Overflow::Clamp).to_date_string());
    /// ```
    pub fn add_months_with(&self, months: i64, overflow: Overflow) -> Carbon {
        self.map_time(|dt| shift_months(dt, months, overflow, "add_months"))
    }

    fn step_months(
        &self,
        count: Option<i64>,
        factor: i64,
        overflow: Overflow,
        operation: &'static str,
    ) -> Carbon {
        self.map_time(|dt| {
            let months = count
                .and_then(|count| count.checked_mul(factor))
                .ok_or(Error::OutOfRange { operation })?;
            shift_months(dt, months, overflow, operation)
        })
    }

    fn step_days(&self, count: Option<i64>, factor: i64, operation: &'static str) -> Carbon {
        self.map_time(|dt| {
            let days = count
                .and_then(|count| count.checked_mul(factor))
                .ok_or(Error::OutOfRange { operation })?;
            shift_days(dt, days, operation)
        })
    }

    fn step_elapsed(&self, delta: Option<TimeDelta>, operation: &'static str) -> Carbon {
        self.map_time(|dt| shift_elapsed(dt, delta, operation))
    }

    /// Adds a duration literal such as `"2h30m"` or `"-1.5h"`. See
    /// [`parse_duration`](crate::parse_duration) for the syntax.
    pub fn add_duration(&self, duration: &str) -> Carbon {
        self.map_time(|dt| {
            let delta = parse_duration(duration)?;
            shift_elapsed(dt, Some(delta), "add_duration")
        })
    }

    /// Subtracts a duration literal. See [`Carbon::add_duration`].
    pub fn sub_duration(&self, duration: &str) -> Carbon {
        self.map_time(|dt| {
            let delta = parse_duration(duration)?;
            shift_elapsed(dt, delta.checked_mul(-1), "sub_duration")
        })
    }

    /// Adds a [`TimeDelta`] of elapsed time.
    pub fn add_delta(&self, delta: TimeDelta) -> Carbon {
        self.step_elapsed(Some(delta), "add_delta")
    }

    /// Subtracts a [`TimeDelta`] of elapsed time.
    pub fn sub_delta(&self, delta: TimeDelta) -> Carbon {
        self.step_elapsed(delta.checked_mul(-1), "sub_delta")
    }
}

macro_rules! month_units {
    ($($unit:literal, $factor:expr => $add:ident, $add_no:ident, $sub:ident, $sub_no:ident, $add1:ident, $add1_no:ident, $sub1:ident, $sub1_no:ident;)*) => {
        impl Carbon {
            $(
                #[doc = concat!("Adds `count` ", $unit, "s. A day of month missing from the target month carries into the next one.")]
                pub fn $add(&self, count: i64) -> Carbon {
                    self.step_months(Some(count), $factor, Overflow::Carry, stringify!($add))
                }

                #[doc = concat!("Adds `count` ", $unit, "s. A day of month missing from the target month clamps to its last day.")]
                pub fn $add_no(&self, count: i64) -> Carbon {
                    self.step_months(Some(count), $factor, Overflow::Clamp, stringify!($add_no))
                }

                #[doc = concat!("Subtracts `count` ", $unit, "s, carrying like [`Carbon::", stringify!($add), "`].")]
                pub fn $sub(&self, count: i64) -> Carbon {
                    self.step_months(count.checked_neg(), $factor, Overflow::Carry, stringify!($sub))
                }

                #[doc = concat!("Subtracts `count` ", $unit, "s, clamping like [`Carbon::", stringify!($add_no), "`].")]
                pub fn $sub_no(&self, count: i64) -> Carbon {
                    self.step_months(count.checked_neg(), $factor, Overflow::Clamp, stringify!($sub_no))
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($add), "`] with a count of 1.")]
                pub fn $add1(&self) -> Carbon {
                    self.$add(1)
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($add_no), "`] with a count of 1.")]
                pub fn $add1_no(&self) -> Carbon {
                    self.$add_no(1)
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($sub), "`] with a count of 1.")]
                pub fn $sub1(&self) -> Carbon {
                    self.$sub(1)
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($sub_no), "`] with a count of 1.")]
                pub fn $sub1_no(&self) -> Carbon {
                    self.$sub_no(1)
                }
            )*
        }
    };
}

month_units! {
    "century", MONTHS_PER_CENTURY => add_centuries, add_centuries_no_overflow, sub_centuries, sub_centuries_no_overflow, add_century, add_century_no_overflow, sub_century, sub_century_no_overflow;
    "decade", MONTHS_PER_DECADE => add_decades, add_decades_no_overflow, sub_decades, sub_decades_no_overflow, add_decade, add_decade_no_overflow, sub_decade, sub_decade_no_overflow;
    "year", MONTHS_PER_YEAR => add_years, add_years_no_overflow, sub_years, sub_years_no_overflow, add_year, add_year_no_overflow, sub_year, sub_year_no_overflow;
    "quarter", MONTHS_PER_QUARTER => add_quarters, add_quarters_no_overflow, sub_quarters, sub_quarters_no_overflow, add_quarter, add_quarter_no_overflow, sub_quarter, sub_quarter_no_overflow;
    "month", 1 => add_months, add_months_no_overflow, sub_months, sub_months_no_overflow, add_month, add_month_no_overflow, sub_month, sub_month_no_overflow;
}

macro_rules! day_units {
    ($($unit:literal, $factor:expr => $add:ident, $sub:ident, $add1:ident, $sub1:ident;)*) => {
        impl Carbon {
            $(
                #[doc = concat!("Adds `count` ", $unit, "s to the calendar date, keeping the wall clock time.")]
                pub fn $add(&self, count: i64) -> Carbon {
                    self.step_days(Some(count), $factor, stringify!($add))
                }

                #[doc = concat!("Subtracts `count` ", $unit, "s from the calendar date, keeping the wall clock time.")]
                pub fn $sub(&self, count: i64) -> Carbon {
                    self.step_days(count.checked_neg(), $factor, stringify!($sub))
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($add), "`] with a count of 1.")]
                pub fn $add1(&self) -> Carbon {
                    self.$add(1)
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($sub), "`] with a count of 1.")]
                pub fn $sub1(&self) -> Carbon {
                    self.$sub(1)
                }
            )*
        }
    };
}

day_units! {
    "week", DAYS_PER_WEEK => add_weeks, sub_weeks, add_week, sub_week;
    "day", 1 => add_days, sub_days, add_day, sub_day;
}

macro_rules! elapsed_units {
    ($($unit:literal, $delta:expr => $add:ident, $sub:ident, $add1:ident, $sub1:ident;)*) => {
        impl Carbon {
            $(
                #[doc = concat!("Adds `count` ", $unit, "s of elapsed time.")]
                pub fn $add(&self, count: i64) -> Carbon {
                    self.step_elapsed($delta(count), stringify!($add))
                }

                #[doc = concat!("Subtracts `count` ", $unit, "s of elapsed time.")]
                pub fn $sub(&self, count: i64) -> Carbon {
                    self.step_elapsed(count.checked_neg().and_then($delta), stringify!($sub))
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($add), "`] with a count of 1.")]
                pub fn $add1(&self) -> Carbon {
                    self.$add(1)
                }

                #[doc = concat!("Same as [`Carbon::", stringify!($sub), "`] with a count of 1.")]
                pub fn $sub1(&self) -> Carbon {
                    self.$sub(1)
                }
            )*
        }
    };
}

elapsed_units! {
    "hour", TimeDelta::try_hours => add_hours, sub_hours, add_hour, sub_hour;
    "minute", TimeDelta::try_minutes => add_minutes, sub_minutes, add_minute, sub_minute;
    "second", TimeDelta::try_seconds => add_seconds, sub_seconds, add_second, sub_second;
    "millisecond", TimeDelta::try_milliseconds => add_milliseconds, sub_milliseconds, add_millisecond, sub_millisecond;
    "microsecond", |n| Some(TimeDelta::microseconds(n)) => add_microseconds, sub_microseconds, add_microsecond, sub_microsecond;
    "nanosecond", |n| Some(TimeDelta::nanoseconds(n)) => add_nanoseconds, sub_nanoseconds, add_nanosecond, sub_nanosecond;
}
