use crate::{
    config::Config,
    error::Error,
    language::Language,
    traveler::{shift_days, shift_months, Overflow},
    zone::load_timezone,
};
use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Inner {
    Error(Error),
    Empty,
    Time(DateTime<Tz>),
}

/// The state of a value, checked in this priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// There is no value at all (an absent `Option<Carbon>`).
    Nil,
    /// The value holds an error from parsing, construction or arithmetic.
    Error,
    /// The value was built from an empty string.
    Empty,
    /// The value is the zero instant, `0001-01-01T00:00:00Z`.
    Zero,
    /// Anything else.
    Valid,
}

impl Status {
    /// The status of an optional value. `None` is [`Status::Nil`].
    pub fn of(carbon: Option<&Carbon>) -> Status {
        carbon.map_or(Status::Nil, Carbon::status)
    }
}

/// A calendar-aware point in time.
///
/// A `Carbon` is either an instant (with its zone), an *empty* value (parsed from `""`), or an
/// *error* value that remembers why it could not be built. Every operation is total: arithmetic
/// and setters on an empty or error value return a clone of it, getters return `0`, `""`, `false`
/// or `None`, and comparisons or diffs involving one return `false`, `0` or `""`.
///
/// `==` is structural: it compares the state, the zone and the [`Config`]. The inherent
/// [`eq`](Carbon::eq), [`ne`](Carbon::ne), [`gt`](Carbon::gt) and friends compare instants only,
/// and take precedence over the `PartialEq` methods under method call syntax. So the same moment
/// in two zones is `a.eq(&b)` but `a != b`.
///
/// ```
/// use carbon::prelude::*;
///
/// let c = Carbon::parse("2020-01-31");
/// assert_eq!("2020-03-02", c.add_months(1).to_date_string());
/// assert_eq!("2020-02-29", c.add_months_no_overflow(1).to_date_string());
///
/// let bad = Carbon::parse("xxx").add_days(5);
/// assert!(bad.has_error());
/// assert_eq!("", bad.to_date_string());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Carbon {
    pub(crate) inner: Inner,
    pub(crate) config: Config,
}

pub(crate) fn zero_instant() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Attaches a zone to a wall clock time.
///
/// Ambiguous times (a fold, when clocks go back) resolve to the earliest instant. Times that do
/// not exist (a gap, when clocks go forward) are read with the offset in effect before the gap,
/// which lands them after it.
pub(crate) fn localize(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>, Error> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            let shifted_back = naive
                .checked_sub_signed(TimeDelta::days(1))
                .ok_or(Error::OutOfRange {
                    operation: "localize",
                })?;
            let offset = tz.offset_from_utc_datetime(&shifted_back).fix().local_minus_utc();
            let utc = naive
                .checked_sub_signed(TimeDelta::seconds(i64::from(offset)))
                .ok_or(Error::OutOfRange {
                    operation: "localize",
                })?;
            tracing::debug!(%naive, zone = tz.name(), "local time falls in a gap");
            Ok(tz.from_utc_datetime(&utc))
        }
    }
}

impl Carbon {
    pub(crate) fn from_parts(inner: Inner, config: Config) -> Self {
        if let Inner::Error(err) = &inner {
            tracing::debug!(%err, "value entered the error state");
        }
        Self { inner, config }
    }

    pub(crate) fn with_instant(config: Config, instant: DateTime<Tz>) -> Self {
        let instant = instant.with_timezone(&config.timezone);
        Self::from_parts(Inner::Time(instant), config)
    }

    pub(crate) fn with_error(config: Config, err: Error) -> Self {
        Self::from_parts(Inner::Error(err), config)
    }

    /// The instant, if this value holds one.
    pub(crate) fn time(&self) -> Option<&DateTime<Tz>> {
        match &self.inner {
            Inner::Time(dt) => Some(dt),
            Inner::Error(_) | Inner::Empty => None,
        }
    }

    /// Applies `op` to the instant. Empty and error values pass through unchanged; a failing `op`
    /// turns the result into an error value.
    pub(crate) fn map_time<F>(&self, op: F) -> Carbon
    where
        F: FnOnce(&DateTime<Tz>) -> Result<DateTime<Tz>, Error>,
    {
        match self.time() {
            Some(dt) => match op(dt) {
                Ok(shifted) => Self::from_parts(Inner::Time(shifted), self.config.clone()),
                Err(err) => Self::with_error(self.config.clone(), err),
            },
            None => self.clone(),
        }
    }

    /// Replaces the config, moving the instant into the new config's zone.
    pub(crate) fn map_config<F>(&self, op: F) -> Carbon
    where
        F: FnOnce(Config) -> Config,
    {
        let config = op(self.config.clone());
        let inner = match &self.inner {
            Inner::Time(dt) => Inner::Time(dt.with_timezone(&config.timezone)),
            other => other.clone(),
        };
        Self { inner, config }
    }

    /// A value holding the zero instant, `0001-01-01T00:00:00Z`.
    pub fn zero() -> Carbon {
        Config::default().zero()
    }

    /// An empty value, as parsed from `""`.
    pub fn empty() -> Carbon {
        Config::default().empty()
    }

    /// Wraps a zoned instant, using the default config with the instant's zone.
    pub fn from_date_time(instant: DateTime<Tz>) -> Carbon {
        let config = Config::default().with_timezone(instant.timezone());
        Self::with_instant(config, instant)
    }

    /// The status of this value. See [`Status`].
    pub fn status(&self) -> Status {
        match &self.inner {
            Inner::Error(_) => Status::Error,
            Inner::Empty => Status::Empty,
            Inner::Time(dt) if dt.naive_utc() == zero_instant().naive_utc() => Status::Zero,
            Inner::Time(_) => Status::Valid,
        }
    }

    /// Whether this value was built from an empty string.
    pub fn is_empty(&self) -> bool {
        matches!(self.inner, Inner::Empty)
    }

    /// Whether this value holds an error.
    pub fn has_error(&self) -> bool {
        matches!(self.inner, Inner::Error(_))
    }

    /// The error this value holds, if any.
    pub fn error(&self) -> Option<&Error> {
        match &self.inner {
            Inner::Error(err) => Some(err),
            Inner::Empty | Inner::Time(_) => None,
        }
    }

    /// Whether this value is the zero instant.
    pub fn is_zero(&self) -> bool {
        self.status() == Status::Zero
    }

    /// Whether this value holds an instant (the zero instant included).
    pub fn is_valid(&self) -> bool {
        self.time().is_some()
    }

    /// The opposite of [`Carbon::is_valid`].
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The zoned instant, if this value holds one.
    pub fn to_date_time(&self) -> Option<DateTime<Tz>> {
        self.time().copied()
    }

    /// The config captured by this value.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The config's language.
    pub fn language(&self) -> &Language {
        &self.config.language
    }
}

impl From<Option<Carbon>> for Carbon {
    /// `None` becomes an empty value.
    fn from(carbon: Option<Carbon>) -> Self {
        carbon.unwrap_or_else(Carbon::empty)
    }
}

impl From<DateTime<Tz>> for Carbon {
    fn from(instant: DateTime<Tz>) -> Self {
        Carbon::from_date_time(instant)
    }
}

/// Getters. Each returns `0` (or `""`, `false`) for empty and error values.
impl Carbon {
    fn field<T: Default>(&self, get: impl FnOnce(&DateTime<Tz>) -> T) -> T {
        self.time().map(get).unwrap_or_default()
    }

    /// The century, counting the years 2001 to 2100 as the 21st.
    pub fn century(&self) -> i32 {
        self.field(|dt| dt.year().div_euclid(100) + 1)
    }

    /// The decade, as the first year of it within its century (`2020` gives `20`).
    pub fn decade(&self) -> i32 {
        self.field(|dt| dt.year().rem_euclid(100) / 10 * 10)
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.field(Datelike::year)
    }

    /// The quarter (`1`-`4`).
    pub fn quarter(&self) -> u32 {
        self.field(|dt| dt.month0() / 3 + 1)
    }

    /// The month (`1`-`12`).
    pub fn month(&self) -> u32 {
        self.field(Datelike::month)
    }

    /// The ISO week of the year (`1`-`53`).
    pub fn week_of_year(&self) -> u32 {
        self.field(|dt| dt.iso_week().week())
    }

    /// The day of the month (`1`-`31`).
    pub fn day(&self) -> u32 {
        self.field(Datelike::day)
    }

    /// The day of the year (`1`-`366`).
    pub fn day_of_year(&self) -> u32 {
        self.field(Datelike::ordinal)
    }

    /// The day of the week, Monday being `1` and Sunday `7`.
    pub fn day_of_week(&self) -> u32 {
        self.field(|dt| dt.weekday().number_from_monday())
    }

    /// The day of the week.
    pub fn weekday(&self) -> Option<Weekday> {
        self.time().map(Datelike::weekday)
    }

    /// The hour (`0`-`23`).
    pub fn hour(&self) -> u32 {
        self.field(Timelike::hour)
    }

    /// The minute (`0`-`59`).
    pub fn minute(&self) -> u32 {
        self.field(Timelike::minute)
    }

    /// The second (`0`-`59`).
    pub fn second(&self) -> u32 {
        self.field(Timelike::second)
    }

    /// The millisecond within the second.
    pub fn millisecond(&self) -> u32 {
        self.field(|dt| dt.nanosecond() / 1_000_000)
    }

    /// The microsecond within the second.
    pub fn microsecond(&self) -> u32 {
        self.field(|dt| dt.nanosecond() / 1_000)
    }

    /// The nanosecond within the second.
    pub fn nanosecond(&self) -> u32 {
        self.field(Timelike::nanosecond)
    }

    /// Seconds since the unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.field(DateTime::timestamp)
    }

    /// Milliseconds since the unix epoch.
    pub fn timestamp_milli(&self) -> i64 {
        self.field(DateTime::timestamp_millis)
    }

    /// Microseconds since the unix epoch.
    pub fn timestamp_micro(&self) -> i64 {
        self.field(DateTime::timestamp_micros)
    }

    /// Nanoseconds since the unix epoch, `0` when that does not fit in an `i64`.
    pub fn timestamp_nano(&self) -> i64 {
        self.field(|dt| dt.timestamp_nanos_opt().unwrap_or_default())
    }

    /// The number of days in this value's month.
    pub fn days_in_month(&self) -> u32 {
        self.field(|dt| days_in_month(dt.year(), dt.month()))
    }

    /// The number of days in this value's year.
    pub fn days_in_year(&self) -> u32 {
        self.field(|dt| if is_leap_year(dt.year()) { 366 } else { 365 })
    }

    /// The zone name, such as `Asia/Shanghai` or `PRC`.
    pub fn timezone(&self) -> &'static str {
        self.field(|dt| dt.timezone().name())
    }

    /// The zone abbreviation in effect, such as `CST`.
    pub fn zone_name(&self) -> String {
        self.field(|dt| dt.format("%Z").to_string())
    }

    /// The offset from UTC in seconds.
    pub fn zone_offset(&self) -> i32 {
        self.field(|dt| dt.offset().fix().local_minus_utc())
    }

    /// The locale of this value's language.
    pub fn locale(&self) -> &str {
        if self.is_valid() {
            self.config.language.locale()
        } else {
            ""
        }
    }

    /// Whole years between this value and now.
    pub fn age(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        self.diff_in_years(None).max(0)
    }
}

/// Setters. Each returns a new value; empty and error values pass through unchanged.
///
/// Date and time fields are normalized the way the month arithmetic is: setting day `31` in a
/// 30-day month carries into the next month, setting hour `24` carries into the next day.
impl Carbon {
    /// Converts the instant to another zone, keeping the instant.
    pub fn set_timezone(&self, timezone: Tz) -> Carbon {
        if !self.is_valid() {
            return self.clone();
        }
        self.map_config(|config| config.with_timezone(timezone))
    }

    /// Like [`Carbon::set_timezone`], resolving the zone by name first.
    pub fn set_timezone_name(&self, name: &str) -> Carbon {
        if !self.is_valid() {
            return self.clone();
        }
        match load_timezone(name) {
            Ok(timezone) => self.set_timezone(timezone),
            Err(err) => Self::with_error(self.config.clone(), err),
        }
    }

    /// Switches to a bundled locale.
    pub fn set_locale(&self, locale: &str) -> Carbon {
        if !self.is_valid() {
            return self.clone();
        }
        match Language::new(locale) {
            Ok(language) => self.set_language(language),
            Err(err) => Self::with_error(self.config.clone(), err),
        }
    }

    /// Replaces the language.
    pub fn set_language(&self, language: Language) -> Carbon {
        if !self.is_valid() {
            return self.clone();
        }
        self.map_config(|config| config.with_language(language))
    }

    /// Replaces the layout used by [`Carbon::to_layout_string`].
    pub fn set_layout(&self, layout: &str) -> Carbon {
        if !self.is_valid() {
            return self.clone();
        }
        if layout.is_empty() {
            return Self::with_error(self.config.clone(), Error::EmptyLayout);
        }
        self.map_config(|config| config.with_layout(layout))
    }

    /// Replaces the first day of the week.
    pub fn set_week_starts_at(&self, weekday: Weekday) -> Carbon {
        if !self.is_valid() {
            return self.clone();
        }
        self.map_config(|config| config.with_week_starts_at(weekday))
    }

    /// Replaces the weekend days.
    pub fn set_weekend_days(&self, weekdays: impl IntoIterator<Item = Weekday>) -> Carbon {
        if !self.is_valid() {
            return self.clone();
        }
        self.map_config(|config| config.with_weekend_days(weekdays))
    }

    /// Moves to the month `month` of year `year` (both may be out of range and carry), keeping
    /// the day of month.
    fn set_year_month(
        &self,
        year: Option<i32>,
        month: Option<i64>,
        overflow: Overflow,
        operation: &'static str,
    ) -> Carbon {
        self.map_time(|dt| {
            let years = i64::from(year.unwrap_or(dt.year())) - i64::from(dt.year());
            let months = month
                .unwrap_or(i64::from(dt.month()))
                .checked_sub(i64::from(dt.month()))
                .and_then(|months| months.checked_add(years * 12))
                .ok_or(Error::OutOfRange { operation })?;
            shift_months(dt, months, overflow, operation)
        })
    }

    /// Sets the year. February 29th carries into March 1st in a common year.
    pub fn set_year(&self, year: i32) -> Carbon {
        self.set_year_month(Some(year), None, Overflow::Carry, "set_year")
    }

    /// Sets the year. February 29th clamps to February 28th in a common year.
    pub fn set_year_no_overflow(&self, year: i32) -> Carbon {
        self.set_year_month(Some(year), None, Overflow::Clamp, "set_year_no_overflow")
    }

    /// Sets the month. Out of range months carry into other years.
    pub fn set_month(&self, month: i64) -> Carbon {
        self.set_year_month(None, Some(month), Overflow::Carry, "set_month")
    }

    /// Sets the month, clamping the day of month to the target month's length.
    pub fn set_month_no_overflow(&self, month: i64) -> Carbon {
        self.set_year_month(None, Some(month), Overflow::Clamp, "set_month_no_overflow")
    }

    /// Sets the day of month. Out of range days carry into other months.
    pub fn set_day(&self, day: i64) -> Carbon {
        self.map_time(|dt| {
            let operation = "set_day";
            let days = day
                .checked_sub(i64::from(dt.day()))
                .ok_or(Error::OutOfRange { operation })?;
            shift_days(dt, days, operation)
        })
    }

    /// Sets the hour.
    pub fn set_hour(&self, hour: i64) -> Carbon {
        self.set_wall_clock(|time| {
            (
                hour,
                i64::from(time.minute()),
                i64::from(time.second()),
                i64::from(time.nanosecond()),
            )
        })
    }

    /// Sets the minute.
    pub fn set_minute(&self, minute: i64) -> Carbon {
        self.set_wall_clock(|time| {
            (
                i64::from(time.hour()),
                minute,
                i64::from(time.second()),
                i64::from(time.nanosecond()),
            )
        })
    }

    /// Sets the second.
    pub fn set_second(&self, second: i64) -> Carbon {
        self.set_wall_clock(|time| {
            (
                i64::from(time.hour()),
                i64::from(time.minute()),
                second,
                i64::from(time.nanosecond()),
            )
        })
    }

    /// Sets the nanosecond.
    pub fn set_nanosecond(&self, nanosecond: i64) -> Carbon {
        self.set_wall_clock(|time| {
            (
                i64::from(time.hour()),
                i64::from(time.minute()),
                i64::from(time.second()),
                nanosecond,
            )
        })
    }

    /// Sets year, month and day, keeping the time of day.
    pub fn set_date(&self, year: i32, month: u32, day: u32) -> Carbon {
        self.map_time(|dt| {
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidDateTime {
                year,
                month,
                day,
                hour: dt.hour(),
                minute: dt.minute(),
                second: dt.second(),
                nanosecond: dt.nanosecond(),
            })?;
            localize(&dt.timezone(), date.and_time(dt.time()))
        })
    }

    /// Sets hour, minute and second, keeping the date and clearing the fraction.
    pub fn set_time(&self, hour: u32, minute: u32, second: u32) -> Carbon {
        self.map_time(|dt| {
            let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(Error::InvalidDateTime {
                year: dt.year(),
                month: dt.month(),
                day: dt.day(),
                hour,
                minute,
                second,
                nanosecond: 0,
            })?;
            localize(&dt.timezone(), dt.date_naive().and_time(time))
        })
    }

    fn set_wall_clock<F>(&self, fields: F) -> Carbon
    where
        F: FnOnce(NaiveTime) -> (i64, i64, i64, i64),
    {
        self.map_time(|dt| {
            let (hour, minute, second, nanosecond) = fields(dt.time());
            let out_of_range = || Error::OutOfRange {
                operation: "set_time",
            };
            let offset = TimeDelta::try_hours(hour)
                .zip(TimeDelta::try_minutes(minute))
                .zip(TimeDelta::try_seconds(second))
                .and_then(|((h, m), s)| h.checked_add(&m)?.checked_add(&s))
                .and_then(|hms| hms.checked_add(&TimeDelta::nanoseconds(nanosecond)))
                .ok_or_else(out_of_range)?;
            let naive = dt
                .date_naive()
                .and_time(NaiveTime::MIN)
                .checked_add_signed(offset)
                .ok_or_else(out_of_range)?;
            localize(&dt.timezone(), naive)
        })
    }
}
