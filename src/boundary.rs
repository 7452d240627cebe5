use crate::{
    carbon::{days_in_month, localize, Carbon},
    error::Error,
};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use chrono_tz::Tz;

const LAST_NANOSECOND: u32 = 999_999_999;

fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, LAST_NANOSECOND).unwrap_or(NaiveTime::MIN)
}

fn date(year: i32, month: u32, day: u32, operation: &'static str) -> Result<NaiveDate, Error> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::OutOfRange { operation })
}

/// Midnight at the start of the given local date.
fn start_on(
    dt: &DateTime<Tz>,
    (year, month, day): (i32, u32, u32),
    operation: &'static str,
) -> Result<DateTime<Tz>, Error> {
    localize(&dt.timezone(), date(year, month, day, operation)?.and_time(NaiveTime::MIN))
}

/// The last nanosecond of the given local date.
fn end_on(
    dt: &DateTime<Tz>,
    (year, month, day): (i32, u32, u32),
    operation: &'static str,
) -> Result<DateTime<Tz>, Error> {
    localize(&dt.timezone(), date(year, month, day, operation)?.and_time(end_of_day_time()))
}

/// First and last `(year, month)` of the season containing `dt`. Winter spans the year change.
fn season_span(dt: &DateTime<Tz>) -> [(i32, u32); 2] {
    let month0 = dt.month0() as i32;
    // March, June, September and December open a season
    let first = dt.year() * 12 + month0 - (month0 + 1) % 3;
    [first, first + 2].map(|linear| (linear.div_euclid(12), linear.rem_euclid(12) as u32 + 1))
}

/// Days from the most recent `week_start` back to `weekday`, in `0..7`.
fn days_since(weekday: Weekday, week_start: Weekday) -> u32 {
    (weekday.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

fn at(
    dt: &DateTime<Tz>,
    naive: Option<NaiveDateTime>,
    operation: &'static str,
) -> Result<DateTime<Tz>, Error> {
    localize(&dt.timezone(), naive.ok_or(Error::OutOfRange { operation })?)
}

/// Boundaries of the calendar periods containing a value, in the value's zone.
///
/// `start_of_*` is the first nanosecond of the period, `end_of_*` the last. Week boundaries honour
/// the configured first day of the week.
impl Carbon {
    /// January 1st of the first year of the century (`2000` for `2020`), at midnight.
    pub fn start_of_century(&self) -> Carbon {
        self.map_time(|dt| {
            let year = dt.year().div_euclid(100) * 100;
            start_on(dt, (year, 1, 1), "start_of_century")
        })
    }

    /// December 31st of the last year of the century (`2099` for `2020`), at the last nanosecond.
    pub fn end_of_century(&self) -> Carbon {
        self.map_time(|dt| {
            let year = dt.year().div_euclid(100) * 100 + 99;
            end_on(dt, (year, 12, 31), "end_of_century")
        })
    }

    /// January 1st of the first year of the decade, at midnight.
    pub fn start_of_decade(&self) -> Carbon {
        self.map_time(|dt| {
            let year = dt.year().div_euclid(10) * 10;
            start_on(dt, (year, 1, 1), "start_of_decade")
        })
    }

    /// December 31st of the last year of the decade, at the last nanosecond.
    pub fn end_of_decade(&self) -> Carbon {
        self.map_time(|dt| {
            let year = dt.year().div_euclid(10) * 10 + 9;
            end_on(dt, (year, 12, 31), "end_of_decade")
        })
    }

    /// January 1st, at midnight.
    pub fn start_of_year(&self) -> Carbon {
        self.map_time(|dt| start_on(dt, (dt.year(), 1, 1), "start_of_year"))
    }

    /// December 31st, at the last nanosecond.
    pub fn end_of_year(&self) -> Carbon {
        self.map_time(|dt| end_on(dt, (dt.year(), 12, 31), "end_of_year"))
    }

    /// The first day of the quarter, at midnight.
    pub fn start_of_quarter(&self) -> Carbon {
        self.map_time(|dt| {
            let month = dt.month0() / 3 * 3 + 1;
            start_on(dt, (dt.year(), month, 1), "start_of_quarter")
        })
    }

    /// The last day of the quarter, at the last nanosecond.
    pub fn end_of_quarter(&self) -> Carbon {
        self.map_time(|dt| {
            let month = dt.month0() / 3 * 3 + 3;
            let day = days_in_month(dt.year(), month);
            end_on(dt, (dt.year(), month, day), "end_of_quarter")
        })
    }

    /// The first day of the season, at midnight. Winter starts on December 1st of the previous
    /// year for January and February. See [`Season`](crate::Season).
    pub fn start_of_season(&self) -> Carbon {
        self.map_time(|dt| {
            let [(year, month), _] = season_span(dt);
            start_on(dt, (year, month, 1), "start_of_season")
        })
    }

    /// The last day of the season, at the last nanosecond.
    pub fn end_of_season(&self) -> Carbon {
        self.map_time(|dt| {
            let [_, (year, month)] = season_span(dt);
            end_on(dt, (year, month, days_in_month(year, month)), "end_of_season")
        })
    }

    /// The first day of the month, at midnight.
    pub fn start_of_month(&self) -> Carbon {
        self.map_time(|dt| start_on(dt, (dt.year(), dt.month(), 1), "start_of_month"))
    }

    /// The last day of the month, at the last nanosecond.
    pub fn end_of_month(&self) -> Carbon {
        self.map_time(|dt| {
            let day = days_in_month(dt.year(), dt.month());
            end_on(dt, (dt.year(), dt.month(), day), "end_of_month")
        })
    }

    /// The configured first day of the week, at midnight.
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let c = Carbon::parse("2020-08-05");
    /// assert_eq!("2020-08-03", c.start_of_week().to_date_string());
    /// assert_eq!("2020-08-02", c.set_week_starts_at(Weekday::Sun).start_of_week().to_date_string());
    /// ```
    pub fn start_of_week(&self) -> Carbon {
        let week_start = self.config.week_starts_at;
        self.map_time(|dt| {
            let back = days_since(dt.weekday(), week_start);
            let start = dt.date_naive().checked_sub_days(Days::new(u64::from(back)));
            at(dt, start.map(|d| d.and_time(NaiveTime::MIN)), "start_of_week")
        })
    }

    /// The last day of the week, at the last nanosecond.
    pub fn end_of_week(&self) -> Carbon {
        let week_start = self.config.week_starts_at;
        self.map_time(|dt| {
            let back = days_since(dt.weekday(), week_start);
            let end = dt.date_naive().checked_add_days(Days::new(u64::from(6 - back)));
            at(dt, end.map(|d| d.and_time(end_of_day_time())), "end_of_week")
        })
    }

    /// Midnight.
    pub fn start_of_day(&self) -> Carbon {
        self.map_time(|dt| {
            let start = dt.date_naive().and_time(NaiveTime::MIN);
            at(dt, Some(start), "start_of_day")
        })
    }

    /// The last nanosecond of the day.
    pub fn end_of_day(&self) -> Carbon {
        self.map_time(|dt| {
            let end = dt.date_naive().and_time(end_of_day_time());
            at(dt, Some(end), "end_of_day")
        })
    }

    /// The start of the hour.
    pub fn start_of_hour(&self) -> Carbon {
        self.map_time(|dt| {
            let start = dt.date_naive().and_hms_opt(dt.hour(), 0, 0);
            at(dt, start, "start_of_hour")
        })
    }

    /// The last nanosecond of the hour.
    pub fn end_of_hour(&self) -> Carbon {
        self.map_time(|dt| {
            let end = dt.date_naive().and_hms_nano_opt(dt.hour(), 59, 59, LAST_NANOSECOND);
            at(dt, end, "end_of_hour")
        })
    }

    /// The start of the minute.
    pub fn start_of_minute(&self) -> Carbon {
        self.map_time(|dt| {
            let start = dt.date_naive().and_hms_opt(dt.hour(), dt.minute(), 0);
            at(dt, start, "start_of_minute")
        })
    }

    /// The last nanosecond of the minute.
    pub fn end_of_minute(&self) -> Carbon {
        self.map_time(|dt| {
            let end = dt
                .date_naive()
                .and_hms_nano_opt(dt.hour(), dt.minute(), 59, LAST_NANOSECOND);
            at(dt, end, "end_of_minute")
        })
    }

    /// The start of the second.
    pub fn start_of_second(&self) -> Carbon {
        self.map_time(|dt| Ok(dt.with_nanosecond(0).unwrap_or(*dt)))
    }

    /// The last nanosecond of the second.
    pub fn end_of_second(&self) -> Carbon {
        self.map_time(|dt| Ok(dt.with_nanosecond(LAST_NANOSECOND).unwrap_or(*dt)))
    }
}
