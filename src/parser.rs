use crate::{
    carbon::{localize, zero_instant, Carbon, Inner},
    config::Config,
    error::Error,
    format::format_to_layout,
};
use chrono::{
    format::{self, ParseErrorKind, ParseResult, Parsed, StrftimeItems},
    DateTime, Datelike, NaiveDate, NaiveDateTime, Utc,
};
use chrono_tz::Tz;
use std::str::FromStr;

/// Pseudo-layout for unix timestamps in seconds.
pub const TIMESTAMP_LAYOUT: &str = "unix";
/// Pseudo-layout for unix timestamps in milliseconds.
pub const TIMESTAMP_MILLI_LAYOUT: &str = "unixMilli";
/// Pseudo-layout for unix timestamps in microseconds.
pub const TIMESTAMP_MICRO_LAYOUT: &str = "unixMicro";
/// Pseudo-layout for unix timestamps in nanoseconds.
pub const TIMESTAMP_NANO_LAYOUT: &str = "unixNano";

const RFC3339_LAYOUT: &str = "%+";
const RFC2822_LAYOUT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Layouts tried by [`Config::parse`], in order.
static CANDIDATES: [&str; 21] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f %#z",
    "%Y-%m-%d %H:%M:%S%.f %z %Z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d",
    "%Y.%m.%d %H:%M:%S%.f",
    "%Y.%m.%d",
    "%Y-%m",
    "%H:%M:%S%.f",
    "%H:%M",
    "%d %B %Y",
    "%B %d, %Y",
    "%a %b %e %H:%M:%S %Y",
    "%a %b %e %H:%M:%S %Z %Y",
];

enum Resolved {
    Zoned(DateTime<Tz>),
    Naive(NaiveDateTime),
}

fn resolve(parsed: &Parsed, tz: &Tz) -> ParseResult<Resolved> {
    match parsed.to_datetime() {
        Ok(fixed) => return Ok(Resolved::Zoned(fixed.with_timezone(tz))),
        Err(err) if err.kind() != ParseErrorKind::NotEnough => return Err(err),
        Err(_) => {}
    }
    parsed.to_naive_datetime_with_offset(0).map(Resolved::Naive)
}

fn timestamp_parser(layout: &str) -> Option<fn(i64) -> Option<DateTime<Utc>>> {
    match layout {
        TIMESTAMP_LAYOUT => Some(|secs| DateTime::from_timestamp(secs, 0)),
        TIMESTAMP_MILLI_LAYOUT => Some(DateTime::from_timestamp_millis),
        TIMESTAMP_MICRO_LAYOUT => Some(DateTime::from_timestamp_micros),
        TIMESTAMP_NANO_LAYOUT => Some(|nanos| Some(DateTime::from_timestamp_nanos(nanos))),
        _ => None,
    }
}

/// Parses `value` with a single chrono layout (or timestamp pseudo-layout), in zone `tz`.
///
/// Values without an offset are read as wall clock time in `tz`; values with one are converted to
/// `tz`. Missing fields default to year 0, January 1st and midnight.
pub(crate) fn parse_layout(value: &str, layout: &str, tz: &Tz) -> Result<DateTime<Tz>, Error> {
    tracing::trace!(value, layout, "parsing");

    if let Some(from_timestamp) = timestamp_parser(layout) {
        return value
            .parse::<i64>()
            .ok()
            .and_then(from_timestamp)
            .map(|utc| utc.with_timezone(tz))
            .ok_or_else(|| Error::parse(value, layout, None));
    }

    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value, StrftimeItems::new(layout))
        .map_err(|err| Error::parse(value, layout, Some(err)))?;

    let resolved = match resolve(&parsed, tz) {
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            let missing = |result: ParseResult<_>| {
                result.is_err_and(|err: format::ParseError| err.kind() == ParseErrorKind::NotEnough)
            };
            // setters refuse to overwrite parsed fields, so only missing ones take a default
            if missing(parsed.to_naive_date().map(drop)) {
                let _ = parsed.set_year(0);
                let _ = parsed.set_month(1);
                let _ = parsed.set_day(1);
            }
            if missing(parsed.to_naive_time().map(drop)) {
                let _ = parsed.set_hour(0);
                let _ = parsed.set_minute(0);
            }
            resolve(&parsed, tz)
        }
        other => other,
    }
    .map_err(|err| Error::parse(value, layout, Some(err)))?;

    match resolved {
        Resolved::Zoned(dt) => Ok(dt),
        Resolved::Naive(naive) => localize(tz, naive),
    }
}

/// Constructors. Every value built here captures a copy of this config.
impl Config {
    fn parsed(&self, instant: DateTime<Tz>, layout: &str) -> Carbon {
        Carbon::with_instant(self.clone().with_layout(layout), instant)
    }

    /// The current instant from this config's clock.
    pub fn now(&self) -> Carbon {
        Carbon::with_instant(self.clone(), self.now_in_zone())
    }

    /// Now minus one day.
    pub fn yesterday(&self) -> Carbon {
        self.now().sub_day()
    }

    /// Now plus one day.
    pub fn tomorrow(&self) -> Carbon {
        self.now().add_day()
    }

    /// The zero instant, `0001-01-01T00:00:00Z`.
    pub fn zero(&self) -> Carbon {
        Carbon::with_instant(self.clone(), zero_instant().with_timezone(&self.timezone))
    }

    /// An empty value.
    pub fn empty(&self) -> Carbon {
        Carbon::from_parts(Inner::Empty, self.clone())
    }

    /// Wraps an instant, converting it to this config's zone.
    pub fn from_date_time(&self, instant: DateTime<Tz>) -> Carbon {
        Carbon::with_instant(self.clone(), instant)
    }

    /// Parses a value in one of the common notations.
    ///
    /// In order, this accepts:
    ///
    /// - `""`, giving an empty value;
    /// - `now`, `yesterday` and `tomorrow`;
    /// - all-digit strings: 8 digits as `YYYYMMDD`, 14 as `YYYYMMDDhhmmss`, any other length as
    ///   a unix timestamp in seconds;
    /// - RFC 3339 and RFC 2822;
    /// - date-times, dates and times with `-`, `/` or `.` separators, an optional `T`, optional
    ///   fractional seconds and an optional offset, such as `2020-08-05 13:14:15.999`,
    ///   `2020/08/05`, `2020-08-05T13:14:15+08:00`, `13:14:15` or `August 05, 2020`.
    ///
    /// Anything else gives an error value.
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// assert_eq!("2020-08-05 13:14:15", Carbon::parse("20200805131415").to_date_time_string());
    /// assert_eq!("2020-08-05 05:14:15", Carbon::parse("2020-08-05T13:14:15+08:00").to_date_time_string());
    /// assert!(Carbon::parse("").is_empty());
    /// assert!(Carbon::parse("xxx").has_error());
    /// ```
    pub fn parse(&self, value: &str) -> Carbon {
        match value {
            "" => return self.empty(),
            "now" => return self.now(),
            "yesterday" => return self.yesterday(),
            "tomorrow" => return self.tomorrow(),
            _ => {}
        }

        if value.bytes().all(|b| b.is_ascii_digit()) {
            let layout = match value.len() {
                8 => "%Y%m%d",
                14 => "%Y%m%d%H%M%S",
                _ => TIMESTAMP_LAYOUT,
            };
            return self.parse_by_layout(value, layout);
        }

        if let Ok(fixed) = DateTime::parse_from_rfc3339(value) {
            return self.parsed(fixed.with_timezone(&self.timezone), RFC3339_LAYOUT);
        }
        if let Ok(fixed) = DateTime::parse_from_rfc2822(value) {
            return self.parsed(fixed.with_timezone(&self.timezone), RFC2822_LAYOUT);
        }

        for layout in CANDIDATES {
            if let Ok(instant) = parse_layout(value, layout, &self.timezone) {
                return self.parsed(instant, layout);
            }
        }
        Carbon::with_error(self.clone(), Error::parse(value, &CANDIDATES.join(" | "), None))
    }

    /// Parses a value with a chrono strftime layout, or one of the timestamp pseudo-layouts
    /// ([`TIMESTAMP_LAYOUT`] and friends).
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let c = Carbon::parse_by_layout("05/08/2020 13h14", "%d/%m/%Y %Hh%M");
    /// assert_eq!("2020-08-05 13:14:00", c.to_date_time_string());
    /// assert_eq!("1596633255", Carbon::parse_by_layout("1596633255", "unix").layout("unix"));
    /// ```
    pub fn parse_by_layout(&self, value: &str, layout: &str) -> Carbon {
        if value.is_empty() {
            return self.empty();
        }
        if layout.is_empty() {
            return Carbon::with_error(self.clone(), Error::EmptyLayout);
        }
        match parse_layout(value, layout, &self.timezone) {
            Ok(instant) => self.parsed(instant, layout),
            Err(err) => Carbon::with_error(self.clone(), err),
        }
    }

    /// Parses a value with a format string in token notation. See the
    /// [token table](crate#format-tokens).
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let c = Carbon::parse_by_format("2020年08月05日 13时14分15秒", "Y年m月d日 H时i分s秒");
    /// assert_eq!("2020-08-05 13:14:15", c.to_date_time_string());
    /// ```
    pub fn parse_by_format(&self, value: &str, format: &str) -> Carbon {
        if value.is_empty() {
            return self.empty();
        }
        let layout = match format {
            "" => return Carbon::with_error(self.clone(), Error::EmptyLayout),
            "S" => TIMESTAMP_LAYOUT.to_owned(),
            "U" => TIMESTAMP_MILLI_LAYOUT.to_owned(),
            "V" => TIMESTAMP_MICRO_LAYOUT.to_owned(),
            "X" => TIMESTAMP_NANO_LAYOUT.to_owned(),
            _ => format_to_layout(format),
        };
        match parse_layout(value, &layout, &self.timezone) {
            Ok(instant) => self.parsed(instant, &layout),
            Err(Error::Parse { source, .. }) => {
                Carbon::with_error(self.clone(), Error::parse(value, format, source))
            }
            Err(err) => Carbon::with_error(self.clone(), err),
        }
    }

    /// Parses a value with the first of `layouts` that matches.
    pub fn parse_with_layouts(&self, value: &str, layouts: &[&str]) -> Carbon {
        if value.is_empty() {
            return self.empty();
        }
        if layouts.iter().all(|layout| layout.is_empty()) {
            return Carbon::with_error(self.clone(), Error::EmptyLayout);
        }
        for layout in layouts.iter().filter(|layout| !layout.is_empty()) {
            if let Ok(instant) = parse_layout(value, layout, &self.timezone) {
                return self.parsed(instant, layout);
            }
        }
        Carbon::with_error(self.clone(), Error::parse(value, &layouts.join(" | "), None))
    }

    fn from_timestamp_with(&self, utc: Option<DateTime<Utc>>, operation: &'static str) -> Carbon {
        match utc {
            Some(utc) => Carbon::with_instant(self.clone(), utc.with_timezone(&self.timezone)),
            None => Carbon::with_error(self.clone(), Error::OutOfRange { operation }),
        }
    }

    /// A value from a unix timestamp in seconds.
    pub fn create_from_timestamp(&self, seconds: i64) -> Carbon {
        let utc = DateTime::from_timestamp(seconds, 0);
        self.from_timestamp_with(utc, "create_from_timestamp")
    }

    /// A value from a unix timestamp in milliseconds.
    pub fn create_from_timestamp_milli(&self, millis: i64) -> Carbon {
        let utc = DateTime::from_timestamp_millis(millis);
        self.from_timestamp_with(utc, "create_from_timestamp_milli")
    }

    /// A value from a unix timestamp in microseconds.
    pub fn create_from_timestamp_micro(&self, micros: i64) -> Carbon {
        let utc = DateTime::from_timestamp_micros(micros);
        self.from_timestamp_with(utc, "create_from_timestamp_micro")
    }

    /// A value from a unix timestamp in nanoseconds.
    pub fn create_from_timestamp_nano(&self, nanos: i64) -> Carbon {
        let utc = Some(DateTime::from_timestamp_nanos(nanos));
        self.from_timestamp_with(utc, "create_from_timestamp_nano")
    }

    /// A value from date and time fields, read as wall clock time in this config's zone.
    ///
    /// Fields must make a real date and time; February 30th gives an error value holding
    /// [`Error::InvalidDateTime`].
    #[allow(clippy::too_many_arguments)]
    pub fn create_from_date_time_nano(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    ) -> Carbon {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanosecond));
        let Some(naive) = naive else {
            let err = Error::InvalidDateTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
                nanosecond,
            };
            return Carbon::with_error(self.clone(), err);
        };
        match localize(&self.timezone, naive) {
            Ok(instant) => Carbon::with_instant(self.clone(), instant),
            Err(err) => Carbon::with_error(self.clone(), err),
        }
    }

    /// Same as [`Config::create_from_date_time_nano`] with no fraction.
    pub fn create_from_date_time(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Carbon {
        self.create_from_date_time_nano(year, month, day, hour, minute, second, 0)
    }

    /// A value from date fields, at midnight.
    pub fn create_from_date(&self, year: i32, month: u32, day: u32) -> Carbon {
        self.create_from_date_time_nano(year, month, day, 0, 0, 0, 0)
    }

    /// A value from time fields, on today's date.
    pub fn create_from_time(&self, hour: u32, minute: u32, second: u32) -> Carbon {
        let today = self.now_in_zone().date_naive();
        self.create_from_date_time_nano(
            today.year(),
            today.month(),
            today.day(),
            hour,
            minute,
            second,
            0,
        )
    }
}

fn in_zone(timezone: &str, build: impl FnOnce(&Config) -> Carbon) -> Carbon {
    let config = Config::default();
    match config.clone().with_timezone_name(timezone) {
        Ok(config) => build(&config),
        Err(err) => Carbon::with_error(config, err),
    }
}

/// Shortcuts for the constructors on [`Config`], using [`Config::default`].
impl Carbon {
    /// See [`Config::now`].
    pub fn now() -> Carbon {
        Config::default().now()
    }

    /// [`Carbon::now`] in a named zone.
    pub fn now_in(timezone: &str) -> Carbon {
        in_zone(timezone, Config::now)
    }

    /// See [`Config::yesterday`].
    pub fn yesterday() -> Carbon {
        Config::default().yesterday()
    }

    /// See [`Config::tomorrow`].
    pub fn tomorrow() -> Carbon {
        Config::default().tomorrow()
    }

    /// See [`Config::parse`].
    pub fn parse(value: &str) -> Carbon {
        Config::default().parse(value)
    }

    /// [`Carbon::parse`] in a named zone.
    pub fn parse_in(value: &str, timezone: &str) -> Carbon {
        in_zone(timezone, |config| config.parse(value))
    }

    /// See [`Config::parse_by_layout`].
    pub fn parse_by_layout(value: &str, layout: &str) -> Carbon {
        Config::default().parse_by_layout(value, layout)
    }

    /// [`Carbon::parse_by_layout`] in a named zone.
    pub fn parse_by_layout_in(value: &str, layout: &str, timezone: &str) -> Carbon {
        in_zone(timezone, |config| config.parse_by_layout(value, layout))
    }

    /// See [`Config::parse_by_format`].
    pub fn parse_by_format(value: &str, format: &str) -> Carbon {
        Config::default().parse_by_format(value, format)
    }

    /// [`Carbon::parse_by_format`] in a named zone.
    pub fn parse_by_format_in(value: &str, format: &str, timezone: &str) -> Carbon {
        in_zone(timezone, |config| config.parse_by_format(value, format))
    }

    /// See [`Config::parse_with_layouts`].
    pub fn parse_with_layouts(value: &str, layouts: &[&str]) -> Carbon {
        Config::default().parse_with_layouts(value, layouts)
    }

    /// See [`Config::create_from_timestamp`].
    pub fn create_from_timestamp(seconds: i64) -> Carbon {
        Config::default().create_from_timestamp(seconds)
    }

    /// See [`Config::create_from_timestamp_milli`].
    pub fn create_from_timestamp_milli(millis: i64) -> Carbon {
        Config::default().create_from_timestamp_milli(millis)
    }

    /// See [`Config::create_from_timestamp_micro`].
    pub fn create_from_timestamp_micro(micros: i64) -> Carbon {
        Config::default().create_from_timestamp_micro(micros)
    }

    /// See [`Config::create_from_timestamp_nano`].
    pub fn create_from_timestamp_nano(nanos: i64) -> Carbon {
        Config::default().create_from_timestamp_nano(nanos)
    }

    /// See [`Config::create_from_date_time`].
    pub fn create_from_date_time(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Carbon {
        Config::default().create_from_date_time(year, month, day, hour, minute, second)
    }

    /// See [`Config::create_from_date`].
    pub fn create_from_date(year: i32, month: u32, day: u32) -> Carbon {
        Config::default().create_from_date(year, month, day)
    }

    /// See [`Config::create_from_time`].
    pub fn create_from_time(hour: u32, minute: u32, second: u32) -> Carbon {
        Config::default().create_from_time(hour, minute, second)
    }
}

impl FromStr for Carbon {
    type Err = Error;

    /// Parses like [`Carbon::parse`], returning the error instead of an error value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let carbon = Carbon::parse(s);
        match carbon.inner {
            Inner::Error(err) => Err(err),
            _ => Ok(carbon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Clock;
    use chrono::TimeZone;
    use rstest::*;

    #[fixture]
    fn frozen() -> Config {
        Config::default().with_clock(Clock::Frozen(
            Utc.with_ymd_and_hms(2020, 8, 5, 13, 14, 15).unwrap(),
        ))
    }

    #[rstest]
    #[case("2020-08-05 13:14:15", "2020-08-05 13:14:15.000000000")]
    #[case("2020-08-05 13:14:15.999999999", "2020-08-05 13:14:15.999999999")]
    #[case("2020-08-05 13:14:15.999", "2020-08-05 13:14:15.999000000")]
    #[case("2020-08-05 13:14:15 +08:00", "2020-08-05 05:14:15.000000000")]
    #[case("2020-08-05 13:14:15 +0000 UTC", "2020-08-05 13:14:15.000000000")]
    #[case("2020-08-05T13:14:15", "2020-08-05 13:14:15.000000000")]
    #[case("2020-08-05T13:14:15Z", "2020-08-05 13:14:15.000000000")]
    #[case("2020-08-05T13:14:15.999999999+00:00", "2020-08-05 13:14:15.999999999")]
    #[case("2020-08-05T13:14:15-07:00", "2020-08-05 20:14:15.000000000")]
    #[case("Wed, 05 Aug 2020 13:14:15 +0000", "2020-08-05 13:14:15.000000000")]
    #[case("2020-08-05 13:14", "2020-08-05 13:14:00.000000000")]
    #[case("2020-08-05", "2020-08-05 00:00:00.000000000")]
    #[case("2020-8-5", "2020-08-05 00:00:00.000000000")]
    #[case("2020/08/05 13:14:15", "2020-08-05 13:14:15.000000000")]
    #[case("2020/08/05", "2020-08-05 00:00:00.000000000")]
    #[case("2020.08.05", "2020-08-05 00:00:00.000000000")]
    #[case("2020-08", "2020-08-01 00:00:00.000000000")]
    #[case("20200805", "2020-08-05 00:00:00.000000000")]
    #[case("20200805131415", "2020-08-05 13:14:15.000000000")]
    #[case("1596633255", "2020-08-05 13:14:15.000000000")]
    #[case("13:14:15", "0000-01-01 13:14:15.000000000")]
    #[case("August 05, 2020", "2020-08-05 00:00:00.000000000")]
    #[case("Wed Aug  5 13:14:15 2020", "2020-08-05 13:14:15.000000000")]
    #[case("0001-01-01 00:00:00", "0001-01-01 00:00:00.000000000")]
    fn test_parse(#[case] value: &str, #[case] expected: &str) {
        let c = Carbon::parse(value);
        assert_eq!(expected, c.to_date_time_nano_string(), "{value}");
    }

    #[rstest]
    #[case("xxx")]
    #[case("2020-13-01")]
    #[case("2020-02-30")]
    #[case("2020-08-05 25:00:00")]
    #[case("-1")]
    fn test_parse_err(#[case] value: &str) {
        let c = Carbon::parse(value);
        assert!(matches!(c.error(), Some(Error::Parse { value: v, .. }) if v == value));
    }

    #[rstest]
    fn test_keywords(frozen: Config) {
        assert_eq!("2020-08-05 13:14:15", frozen.parse("now").to_date_time_string());
        assert_eq!("2020-08-04 13:14:15", frozen.parse("yesterday").to_date_time_string());
        assert_eq!("2020-08-06 13:14:15", frozen.parse("tomorrow").to_date_time_string());
    }

    #[test]
    fn test_parse_in_zone() {
        let c = Carbon::parse_in("2020-08-05 13:14:15", "PRC");
        assert_eq!("2020-08-05 13:14:15 +0800", c.layout("%Y-%m-%d %H:%M:%S %z"));
        assert_eq!(1_596_604_455, c.timestamp());

        let converted = Carbon::parse_in("2020-08-05T13:14:15Z", "PRC");
        assert_eq!("2020-08-05 21:14:15", converted.to_date_time_string());

        let bad = Carbon::parse_in("2020-08-05", "Mars/Olympus");
        assert!(matches!(bad.error(), Some(Error::InvalidTimezone { .. })));
        assert_eq!(Some(&Error::EmptyTimezone), Carbon::parse_in("2020-08-05", "").error());
    }

    #[test]
    fn test_parse_by_layout() {
        let args = [
            ("2020|08|05 13|14|15", "%Y|%m|%d %H|%M|%S", "2020-08-05 13:14:15"),
            ("It is 2020-08-05", "It is %Y-%m-%d", "2020-08-05 00:00:00"),
            ("05/08/20", "%d/%m/%y", "2020-08-05 00:00:00"),
            ("1596633255", TIMESTAMP_LAYOUT, "2020-08-05 13:14:15"),
            ("1596633255999", TIMESTAMP_MILLI_LAYOUT, "2020-08-05 13:14:15"),
            ("1596633255999999", TIMESTAMP_MICRO_LAYOUT, "2020-08-05 13:14:15"),
            ("1596633255999999999", TIMESTAMP_NANO_LAYOUT, "2020-08-05 13:14:15"),
        ];
        for (value, layout, expected) in args {
            let c = Carbon::parse_by_layout(value, layout);
            assert_eq!(expected, c.to_date_time_string());
            assert_eq!(layout, c.config().layout());
        }
    }

    #[test]
    fn test_parse_by_layout_err() {
        assert!(Carbon::parse_by_layout("", "%Y").is_empty());
        assert_eq!(
            Some(&Error::EmptyLayout),
            Carbon::parse_by_layout("2020", "").error()
        );
        let c = Carbon::parse_by_layout("2020-08-05", "%Y/%m/%d");
        assert!(matches!(
            c.error(),
            Some(Error::Parse { layout, source: Some(_), .. }) if layout == "%Y/%m/%d"
        ));
        assert!(Carbon::parse_by_layout("abc", TIMESTAMP_LAYOUT).has_error());
    }

    #[test]
    fn test_parse_by_format() {
        let args = [
            ("2020-08-05 13:14:15", "Y-m-d H:i:s", "2020-08-05 13:14:15"),
            ("2020年08月05日", "Y年m月d日", "2020-08-05 00:00:00"),
            ("It is 2020-08-05", r"I\t \i\s Y-m-d", "2020-08-05 00:00:00"),
            ("1596633255", "S", "2020-08-05 13:14:15"),
            ("1596633255999", "U", "2020-08-05 13:14:15"),
            ("1596633255999999", "V", "2020-08-05 13:14:15"),
            ("1596633255999999999", "X", "2020-08-05 13:14:15"),
        ];
        for (value, format, expected) in args {
            assert_eq!(
                expected,
                Carbon::parse_by_format(value, format).to_date_time_string()
            );
        }

        let c = Carbon::parse_by_format("2020-08-05", "Y/m/d");
        assert!(matches!(c.error(), Some(Error::Parse { layout, .. }) if layout == "Y/m/d"));
        assert_eq!(Some(&Error::EmptyLayout), Carbon::parse_by_format("2020", "").error());
        assert_eq!(
            "2020-08-05 13:14:15",
            Carbon::parse_by_format_in("2020-08-05 13:14:15", "Y-m-d H:i:s", "PRC")
                .to_date_time_string()
        );
    }

    #[test]
    fn test_parse_with_layouts() {
        let layouts = ["%Y|%m|%d", "%Y/%m/%d", "%Y.%m.%d"];
        let c = Carbon::parse_with_layouts("2020/08/05", &layouts);
        assert_eq!("2020-08-05", c.to_date_string());
        assert_eq!("%Y/%m/%d", c.config().layout());

        let c = Carbon::parse_with_layouts("2020-08-05", &layouts);
        assert!(matches!(
            c.error(),
            Some(Error::Parse { layout, .. }) if layout == "%Y|%m|%d | %Y/%m/%d | %Y.%m.%d"
        ));
        assert_eq!(Some(&Error::EmptyLayout), Carbon::parse_with_layouts("2020", &[]).error());
    }

    #[test]
    fn test_create_from() {
        let args = [
            (Carbon::create_from_timestamp(1_596_633_255), "2020-08-05 13:14:15.000000000"),
            (Carbon::create_from_timestamp_milli(1_596_633_255_999), "2020-08-05 13:14:15.999000000"),
            (Carbon::create_from_timestamp_micro(1_596_633_255_999_999), "2020-08-05 13:14:15.999999000"),
            (Carbon::create_from_timestamp_nano(1_596_633_255_999_999_999), "2020-08-05 13:14:15.999999999"),
            (Carbon::create_from_date_time(2020, 8, 5, 13, 14, 15), "2020-08-05 13:14:15.000000000"),
            (Config::default().create_from_date_time_nano(2020, 8, 5, 13, 14, 15, 1), "2020-08-05 13:14:15.000000001"),
            (Carbon::create_from_date(2020, 8, 5), "2020-08-05 00:00:00.000000000"),
            (Carbon::create_from_timestamp(-1), "1969-12-31 23:59:59.000000000"),
        ];
        for (actual, expected) in args {
            assert_eq!(expected, actual.to_date_time_nano_string());
        }
    }

    #[rstest]
    fn test_create_from_time(frozen: Config) {
        assert_eq!(
            "2020-08-05 01:02:03",
            frozen.create_from_time(1, 2, 3).to_date_time_string()
        );
        assert!(frozen.create_from_time(24, 0, 0).has_error());
    }

    #[test]
    fn test_create_from_err() {
        assert_eq!(
            Some(&Error::InvalidDateTime {
                year: 2020,
                month: 2,
                day: 30,
                hour: 0,
                minute: 0,
                second: 0,
                nanosecond: 0
            }),
            Carbon::create_from_date(2020, 2, 30).error()
        );
        assert_eq!(
            Some(&Error::OutOfRange {
                operation: "create_from_timestamp"
            }),
            Carbon::create_from_timestamp(i64::MAX).error()
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "2020-08-05",
            "2020-08-05".parse::<Carbon>().unwrap().to_date_string()
        );
        assert!("xxx".parse::<Carbon>().is_err());
        assert!("".parse::<Carbon>().unwrap().is_empty());
    }

    #[test]
    fn test_config_is_captured() {
        let config = Config::default().with_timezone_name("PRC").unwrap();
        let c = config.parse("2020-08-05 13:14:15");
        let _ = config.with_timezone(Tz::UTC);
        assert_eq!("PRC", c.timezone());
    }
}
