use crate::{
    carbon::Carbon,
    traveler::{shift_months, Overflow},
};
use chrono::{DateTime, Datelike, TimeDelta};
use chrono_tz::Tz;
use std::fmt::{self, Display};

/// The unit picked by [`Carbon::diff`] to describe a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffUnit {
    /// Whole years.
    Year,
    /// Whole months.
    Month,
    /// Whole weeks.
    Week,
    /// Whole days.
    Day,
    /// Whole hours.
    Hour,
    /// Whole minutes.
    Minute,
    /// Whole seconds.
    Second,
    /// Less than a second.
    Now,
}

impl DiffUnit {
    /// The resource key for this unit in a [`Language`](crate::Language) table.
    pub fn name(&self) -> &'static str {
        match self {
            DiffUnit::Year => "year",
            DiffUnit::Month => "month",
            DiffUnit::Week => "week",
            DiffUnit::Day => "day",
            DiffUnit::Hour => "hour",
            DiffUnit::Minute => "minute",
            DiffUnit::Second => "second",
            DiffUnit::Now => "now",
        }
    }
}

impl Display for DiffUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whole months from `start` to `end`: the largest `n` such that `start` plus `n` months (clamped
/// to the end of the month) does not pass `end`. Negative when `end` is earlier.
fn months_between(start: &DateTime<Tz>, end: &DateTime<Tz>) -> i64 {
    let local_end = end.with_timezone(&start.timezone());
    let estimate = (i64::from(local_end.year()) - i64::from(start.year())) * 12
        + i64::from(local_end.month())
        - i64::from(start.month());

    // the estimate only overshoots when the day of month (or time of day) has not been reached yet
    let overshoots = |months: i64| {
        match shift_months(start, months, Overflow::Clamp, "diff_in_months") {
            Ok(shifted) if months > 0 => shifted > *end,
            Ok(shifted) if months < 0 => shifted < *end,
            Ok(_) => false,
            Err(_) => true,
        }
    };

    if estimate > 0 && overshoots(estimate) {
        estimate - 1
    } else if estimate < 0 && overshoots(estimate) {
        estimate + 1
    } else {
        estimate
    }
}

/// Differences.
///
/// Each `diff_in_*` takes an optional other value, `None` meaning now (from this value's clock),
/// and is signed as `other - self`: positive when `other` is later. Years and months count
/// calendar months, see [`Carbon::diff_in_months`]; weeks and finer units count elapsed time
/// truncated toward zero. Anything involving an empty or error value gives `0`, a zero
/// [`TimeDelta`] or `""`.
impl Carbon {
    fn span(&self, other: Option<&Carbon>) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let start = *self.time()?;
        let end = match other {
            Some(other) => *other.time()?,
            None => self.config.now_in_zone(),
        };
        Some((start, end))
    }

    fn elapsed(&self, other: Option<&Carbon>) -> Option<TimeDelta> {
        self.span(other).map(|(start, end)| end - start)
    }

    /// Whole years to `other`. This is [`Carbon::diff_in_months`] divided by 12.
    pub fn diff_in_years(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_months(other) / 12
    }

    /// Whole calendar months to `other`.
    ///
    /// This is the largest `n` such that adding `n` months (without overflow) to this value does
    /// not pass `other`, so the 31st of one month is one month away from the 30th of the next.
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let a = Carbon::parse("2020-08-05");
    /// let b = Carbon::parse("2020-10-05");
    /// assert_eq!(2, a.diff_in_months(Some(&b)));
    /// assert_eq!(-2, b.diff_in_months(Some(&a)));
    /// ```
    pub fn diff_in_months(&self, other: Option<&Carbon>) -> i64 {
        self.span(other)
            .map(|(start, end)| months_between(&start, &end))
            .unwrap_or_default()
    }

    /// Whole weeks to `other`.
    pub fn diff_in_weeks(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_days(other) / 7
    }

    /// Whole days to `other`.
    pub fn diff_in_days(&self, other: Option<&Carbon>) -> i64 {
        self.elapsed(other).map_or(0, |delta| delta.num_days())
    }

    /// Whole hours to `other`.
    pub fn diff_in_hours(&self, other: Option<&Carbon>) -> i64 {
        self.elapsed(other).map_or(0, |delta| delta.num_hours())
    }

    /// Whole minutes to `other`.
    pub fn diff_in_minutes(&self, other: Option<&Carbon>) -> i64 {
        self.elapsed(other).map_or(0, |delta| delta.num_minutes())
    }

    /// Whole seconds to `other`.
    pub fn diff_in_seconds(&self, other: Option<&Carbon>) -> i64 {
        self.elapsed(other).map_or(0, |delta| delta.num_seconds())
    }

    /// Elapsed time to `other`.
    pub fn diff_in_duration(&self, other: Option<&Carbon>) -> TimeDelta {
        self.elapsed(other).unwrap_or_else(TimeDelta::zero)
    }

    /// [`Carbon::diff_in_years`] without the sign.
    pub fn diff_abs_in_years(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_years(other).saturating_abs()
    }

    /// [`Carbon::diff_in_months`] without the sign.
    pub fn diff_abs_in_months(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_months(other).saturating_abs()
    }

    /// [`Carbon::diff_in_weeks`] without the sign.
    pub fn diff_abs_in_weeks(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_weeks(other).saturating_abs()
    }

    /// [`Carbon::diff_in_days`] without the sign.
    pub fn diff_abs_in_days(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_days(other).saturating_abs()
    }

    /// [`Carbon::diff_in_hours`] without the sign.
    pub fn diff_abs_in_hours(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_hours(other).saturating_abs()
    }

    /// [`Carbon::diff_in_minutes`] without the sign.
    pub fn diff_abs_in_minutes(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_minutes(other).saturating_abs()
    }

    /// [`Carbon::diff_in_seconds`] without the sign.
    pub fn diff_abs_in_seconds(&self, other: Option<&Carbon>) -> i64 {
        self.diff_in_seconds(other).saturating_abs()
    }

    /// [`Carbon::diff_in_duration`] without the sign.
    pub fn diff_abs_in_duration(&self, other: Option<&Carbon>) -> TimeDelta {
        self.diff_in_duration(other).abs()
    }

    /// The largest unit with a non-zero diff to `other`, and the signed diff in that unit. A gap
    /// under a second is [`DiffUnit::Now`] with a value of `0`. `None` if either value is empty or
    /// an error.
    pub fn diff(&self, other: Option<&Carbon>) -> Option<(DiffUnit, i64)> {
        let (start, end) = self.span(other)?;
        let months = months_between(&start, &end);
        let delta = end - start;

        let candidates = [
            (DiffUnit::Year, months / 12),
            (DiffUnit::Month, months),
            (DiffUnit::Week, delta.num_days() / 7),
            (DiffUnit::Day, delta.num_days()),
            (DiffUnit::Hour, delta.num_hours()),
            (DiffUnit::Minute, delta.num_minutes()),
            (DiffUnit::Second, delta.num_seconds()),
        ];
        Some(
            candidates
                .into_iter()
                .find(|(_, value)| *value != 0)
                .unwrap_or((DiffUnit::Now, 0)),
        )
    }

    /// The best-unit diff to `other` as text, keeping the sign: `"-1 year"`, `"3 days"`,
    /// `"just now"`.
    pub fn diff_in_string(&self, other: Option<&Carbon>) -> String {
        self.diff(other)
            .map(|(unit, value)| self.config.language.translate(unit.name(), value))
            .unwrap_or_default()
    }

    /// Like [`Carbon::diff_in_string`] without the sign.
    pub fn diff_abs_in_string(&self, other: Option<&Carbon>) -> String {
        self.diff(other)
            .map(|(unit, value)| {
                self.config
                    .language
                    .translate(unit.name(), value.saturating_abs())
            })
            .unwrap_or_default()
    }

    /// The diff as a human readable phrase.
    ///
    /// Against now (`None`) this reads `"2 days ago"` or `"2 days from now"`; against an explicit
    /// value it reads `"2 days before"` or `"2 days after"`, describing this value relative to
    /// `other`.
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let a = Carbon::parse("2020-08-05");
    /// let b = Carbon::parse("2020-08-07");
    /// assert_eq!("2 days before", a.diff_for_humans(Some(&b)));
    /// assert_eq!("2 days after", b.diff_for_humans(Some(&a)));
    /// ```
    pub fn diff_for_humans(&self, other: Option<&Carbon>) -> String {
        let Some((unit, value)) = self.diff(other) else {
            return String::new();
        };
        let language = &self.config.language;
        let phrase = language.translate(unit.name(), value.saturating_abs());
        if unit == DiffUnit::Now {
            return phrase;
        }
        let key = match (value > 0, other.is_none()) {
            (true, true) => "ago",
            (true, false) => "before",
            (false, true) => "from_now",
            (false, false) => "after",
        };
        language.direction(key, &phrase)
    }
}
