use crate::carbon::{is_leap_year, Carbon};
use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;

/// Comparisons.
///
/// All of these compare instants, so values in different zones compare by the moment they name.
/// Anything involving an empty or error value is `false`. They shadow the `PartialEq` methods of
/// the same name; use `==` for structural equality, which also compares the zone and config.
impl Carbon {
    fn both<'a>(&'a self, other: &'a Carbon) -> Option<(&'a DateTime<Tz>, &'a DateTime<Tz>)> {
        self.time().zip(other.time())
    }

    /// Whether both values name the same instant.
    pub fn eq(&self, other: &Carbon) -> bool {
        self.both(other).is_some_and(|(a, b)| a == b)
    }

    /// Whether the values name different instants.
    pub fn ne(&self, other: &Carbon) -> bool {
        self.both(other).is_some_and(|(a, b)| a != b)
    }

    /// Whether this value is after `other`.
    pub fn gt(&self, other: &Carbon) -> bool {
        self.both(other).is_some_and(|(a, b)| a > b)
    }

    /// Whether this value is after or at `other`.
    pub fn gte(&self, other: &Carbon) -> bool {
        self.both(other).is_some_and(|(a, b)| a >= b)
    }

    /// Whether this value is before `other`.
    pub fn lt(&self, other: &Carbon) -> bool {
        self.both(other).is_some_and(|(a, b)| a < b)
    }

    /// Whether this value is before or at `other`.
    pub fn lte(&self, other: &Carbon) -> bool {
        self.both(other).is_some_and(|(a, b)| a <= b)
    }

    /// Compares with an operator symbol: `=`, `<>`, `!=`, `>`, `>=`, `<` or `<=`. Any other
    /// symbol gives `false`.
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let a = Carbon::parse("2020-08-05");
    /// let b = Carbon::parse("2020-08-06");
    /// assert!(a.compare("<", &b));
    /// assert!(a.compare("<>", &b));
    /// assert!(!a.compare("~", &b));
    /// ```
    pub fn compare(&self, operator: &str, other: &Carbon) -> bool {
        match operator {
            "=" => self.eq(other),
            "<>" | "!=" => self.ne(other),
            ">" => self.gt(other),
            ">=" => self.gte(other),
            "<" => self.lt(other),
            "<=" => self.lte(other),
            _ => {
                tracing::trace!(operator, "unknown comparison operator");
                false
            }
        }
    }

    fn interval(
        &self,
        start: &Carbon,
        end: &Carbon,
        include_start: bool,
        include_end: bool,
    ) -> bool {
        let (Some(t), Some(s), Some(e)) = (self.time(), start.time(), end.time()) else {
            return false;
        };
        if s > e {
            return false;
        }
        let after_start = if include_start { t >= s } else { t > s };
        let before_end = if include_end { t <= e } else { t < e };
        after_start && before_end
    }

    /// Whether this value is strictly between `start` and `end`. `false` if `start` is after
    /// `end`.
    pub fn between(&self, start: &Carbon, end: &Carbon) -> bool {
        self.interval(start, end, false, false)
    }

    /// Like [`Carbon::between`], also true at `start`.
    pub fn between_included_start(&self, start: &Carbon, end: &Carbon) -> bool {
        self.interval(start, end, true, false)
    }

    /// Like [`Carbon::between`], also true at `end`.
    pub fn between_included_end(&self, start: &Carbon, end: &Carbon) -> bool {
        self.interval(start, end, false, true)
    }

    /// Like [`Carbon::between`], also true at `start` and at `end`.
    pub fn between_included_both(&self, start: &Carbon, end: &Carbon) -> bool {
        self.interval(start, end, true, true)
    }

    /// Compares both values truncated by `key`, with `other` moved into this value's zone.
    fn same_by<K: PartialEq>(&self, other: &Carbon, key: impl Fn(&DateTime<Tz>) -> K) -> bool {
        self.both(other)
            .is_some_and(|(a, b)| key(a) == key(&b.with_timezone(&a.timezone())))
    }

    /// Whether both values fall in the same century.
    pub fn is_same_century(&self, other: &Carbon) -> bool {
        self.same_by(other, |dt| dt.year().div_euclid(100))
    }

    /// Whether both values fall in the same decade.
    pub fn is_same_decade(&self, other: &Carbon) -> bool {
        self.same_by(other, |dt| dt.year().div_euclid(10))
    }

    /// Whether both values fall in the same year.
    pub fn is_same_year(&self, other: &Carbon) -> bool {
        self.same_by(other, Datelike::year)
    }

    /// Whether both values fall in the same quarter of the same year.
    pub fn is_same_quarter(&self, other: &Carbon) -> bool {
        self.same_by(other, |dt| (dt.year(), dt.month0() / 3))
    }

    /// Whether both values fall in the same month of the same year.
    pub fn is_same_month(&self, other: &Carbon) -> bool {
        self.same_by(other, |dt| (dt.year(), dt.month()))
    }

    /// Whether both values fall on the same calendar day.
    pub fn is_same_day(&self, other: &Carbon) -> bool {
        self.same_by(other, DateTime::date_naive)
    }

    /// Whether both values fall in the same hour of the same day.
    pub fn is_same_hour(&self, other: &Carbon) -> bool {
        self.same_by(other, |dt| (dt.date_naive(), dt.hour()))
    }

    /// Whether both values fall in the same minute of the same day.
    pub fn is_same_minute(&self, other: &Carbon) -> bool {
        self.same_by(other, |dt| (dt.date_naive(), dt.hour(), dt.minute()))
    }

    /// Whether both values fall in the same second. Sub-second precision is ignored.
    pub fn is_same_second(&self, other: &Carbon) -> bool {
        self.same_by(other, |dt| (dt.date_naive(), dt.hour(), dt.minute(), dt.second()))
    }

    /// Whether this value is after now.
    pub fn is_future(&self) -> bool {
        self.gt(&self.config.now())
    }

    /// Whether this value is before now.
    pub fn is_past(&self) -> bool {
        self.lt(&self.config.now())
    }

    /// Whether this value is now. Only meaningful with a frozen [`Clock`](crate::Clock).
    pub fn is_now(&self) -> bool {
        self.eq(&self.config.now())
    }

    /// Whether this value falls on today's date in its zone.
    pub fn is_today(&self) -> bool {
        self.is_same_day(&self.config.now())
    }

    /// Whether this value falls on one of its configured weekend days.
    pub fn is_weekend(&self) -> bool {
        self.time()
            .is_some_and(|dt| self.config.weekend_days.contains(&dt.weekday()))
    }

    /// Whether this value falls on a day that is not a configured weekend day.
    pub fn is_weekday(&self) -> bool {
        self.is_valid() && !self.is_weekend()
    }

    /// Whether this value's year is a leap year.
    pub fn is_leap_year(&self) -> bool {
        self.time().is_some_and(|dt| is_leap_year(dt.year()))
    }

    /// Whether this value is the unix epoch, `1970-01-01T00:00:00Z`.
    pub fn is_epoch(&self) -> bool {
        self.time()
            .is_some_and(|dt| dt.timestamp() == 0 && dt.nanosecond() == 0)
    }

    /// Whichever of `a` and `b` is closer to this value, `b` on a tie. If any of the three is not
    /// a valid value, this value is returned.
    pub fn closest(&self, a: &Carbon, b: &Carbon) -> Carbon {
        self.pick(a, b, |da, db| da < db)
    }

    /// Whichever of `a` and `b` is farther from this value, `b` on a tie. If any of the three is
    /// not a valid value, this value is returned.
    pub fn farthest(&self, a: &Carbon, b: &Carbon) -> Carbon {
        self.pick(a, b, |da, db| da > db)
    }

    fn pick(
        &self,
        a: &Carbon,
        b: &Carbon,
        prefer_a: impl Fn(chrono::TimeDelta, chrono::TimeDelta) -> bool,
    ) -> Carbon {
        let (Some(t), Some(ta), Some(tb)) = (self.time(), a.time(), b.time()) else {
            return self.clone();
        };
        let da = (*ta - *t).abs();
        let db = (*tb - *t).abs();
        if prefer_a(da, db) {
            a.clone()
        } else {
            b.clone()
        }
    }

    /// The latest valid value, or `None` if there is none.
    pub fn max<'a>(values: impl IntoIterator<Item = &'a Carbon>) -> Option<&'a Carbon> {
        values
            .into_iter()
            .filter_map(|c| c.time().map(|dt| (dt, c)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, c)| c)
    }

    /// The earliest valid value, or `None` if there is none.
    pub fn min<'a>(values: impl IntoIterator<Item = &'a Carbon>) -> Option<&'a Carbon> {
        values
            .into_iter()
            .filter_map(|c| c.time().map(|dt| (dt, c)))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, c)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Clock, Config};
    use chrono::{TimeZone, Utc, Weekday};
    use itertools::Itertools;
    use rstest::*;

    #[fixture]
    fn frozen() -> Config {
        Config::default().with_clock(Clock::Frozen(
            Utc.with_ymd_and_hms(2020, 8, 5, 13, 14, 15).unwrap(),
        ))
    }

    #[fixture]
    fn samples() -> Vec<Carbon> {
        [
            "2020-08-05 13:14:15",
            "2020-08-05 13:14:15.000000001",
            "2020-08-06",
            "2019-12-31 23:59:59",
            "0001-01-01 00:00:00",
        ]
        .iter()
        .map(|s| Carbon::parse(s))
        .collect()
    }

    #[rstest]
    fn test_antisymmetry(samples: Vec<Carbon>) {
        for (a, b) in samples.iter().cartesian_product(samples.iter()) {
            assert_eq!(a.gt(b), b.lt(a));
            assert_eq!(a.eq(b), b.eq(a));
            assert_eq!(a.gte(b), b.lte(a));
            assert_eq!(a.ne(b), !a.eq(b));
            let holding = [a.lt(b), a.eq(b), a.gt(b)].iter().filter(|x| **x).count();
            assert_eq!(1, holding);
        }
    }

    #[test]
    fn test_compare_across_zones() {
        let utc = Carbon::parse("2020-08-05 13:14:15");
        let prc = Carbon::parse_in("2020-08-05 21:14:15", "PRC");
        assert!(utc.eq(&prc));
        assert!(utc.is_same_day(&prc));
    }

    #[test]
    fn test_instant_equality_is_not_structural() {
        let utc = Carbon::parse("2020-08-05 13:14:15");
        let prc = utc.set_timezone(Tz::PRC);
        assert!(utc.eq(&prc));
        assert!(!utc.ne(&prc));
        assert!(utc != prc);
        assert!(PartialEq::ne(&utc, &prc));
        assert_eq!(utc, prc.set_timezone(Tz::UTC));

        let empty = Carbon::parse("");
        assert!(!empty.eq(&empty));
        assert_eq!(empty, Carbon::parse(""));
    }

    #[rstest]
    #[case("=", false)]
    #[case("<>", true)]
    #[case("!=", true)]
    #[case(">", false)]
    #[case(">=", false)]
    #[case("<", true)]
    #[case("<=", true)]
    #[case("==", false)]
    #[case("", false)]
    fn test_compare(#[case] operator: &str, #[case] expected: bool) {
        let a = Carbon::parse("2020-08-05");
        let b = Carbon::parse("2020-08-06");
        assert_eq!(expected, a.compare(operator, &b));
    }

    #[test]
    fn test_between() {
        let start = Carbon::parse("2020-08-05 21:00:00");
        let mid = Carbon::parse("2020-08-05 22:00:00");
        let end = Carbon::parse("2020-08-05 23:00:00");

        assert!(mid.between(&start, &end));
        assert!(mid.between_included_both(&start, &end));

        assert!(!start.between(&start, &end));
        assert!(start.between_included_start(&start, &end));
        assert!(!start.between_included_end(&start, &end));
        assert!(start.between_included_both(&start, &end));

        assert!(!end.between(&start, &end));
        assert!(!end.between_included_start(&start, &end));
        assert!(end.between_included_end(&start, &end));
        assert!(end.between_included_both(&start, &end));

        // no implicit swap
        assert!(!mid.between(&end, &start));
        assert!(!mid.between_included_both(&end, &start));
    }

    #[test]
    fn test_indeterminate() {
        let valid = Carbon::parse("2020-08-05");
        let invalid = [Carbon::parse(""), Carbon::parse("xxx")];
        for bad in &invalid {
            assert!(!valid.eq(bad) && !bad.eq(&valid));
            assert!(!valid.ne(bad));
            assert!(!valid.gt(bad) && !valid.lt(bad));
            assert!(!valid.compare("<>", bad));
            assert!(!valid.between_included_both(bad, &valid));
            assert!(!valid.between_included_both(&valid, bad));
            assert!(!bad.between_included_both(&valid, &valid));
            assert!(!valid.is_same_day(bad));
            assert!(!bad.is_weekend() && !bad.is_weekday() && !bad.is_leap_year());
            assert_eq!(bad, &bad.closest(&valid, &valid));
        }
    }

    #[rstest]
    #[case("is_same_century", "2020-08-05", "2099-12-31", true)]
    #[case("is_same_century", "2020-08-05", "2100-01-01", false)]
    #[case("is_same_decade", "2020-08-05", "2029-12-31", true)]
    #[case("is_same_decade", "2020-08-05", "2019-12-31", false)]
    #[case("is_same_year", "2020-08-05", "2020-12-31", true)]
    #[case("is_same_year", "2020-08-05", "2021-01-01", false)]
    #[case("is_same_quarter", "2020-08-05", "2020-09-30", true)]
    #[case("is_same_quarter", "2020-08-05", "2021-08-05", false)]
    #[case("is_same_month", "2020-08-05", "2020-08-31", true)]
    #[case("is_same_month", "2020-08-05", "2021-08-05", false)]
    #[case("is_same_day", "2020-08-05 00:00:00", "2020-08-05 23:59:59", true)]
    #[case("is_same_day", "2020-08-05", "2020-09-05", false)]
    #[case("is_same_hour", "2020-08-05 13:00:00", "2020-08-05 13:59:59", true)]
    #[case("is_same_hour", "2020-08-05 13:00:00", "2020-08-06 13:00:00", false)]
    #[case("is_same_minute", "2020-08-05 13:14:00", "2020-08-05 13:14:59", true)]
    #[case("is_same_minute", "2020-08-05 13:14:00", "2020-08-05 13:15:00", false)]
    #[case("is_same_second", "2020-08-05 13:14:15", "2020-08-05 13:14:15.999999999", true)]
    #[case("is_same_second", "2020-08-05 13:14:15", "2020-08-05 13:14:16", false)]
    fn test_is_same(
        #[case] which: &str,
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: bool,
    ) {
        let (a, b) = (Carbon::parse(a), Carbon::parse(b));
        let actual = match which {
            "is_same_century" => a.is_same_century(&b),
            "is_same_decade" => a.is_same_decade(&b),
            "is_same_year" => a.is_same_year(&b),
            "is_same_quarter" => a.is_same_quarter(&b),
            "is_same_month" => a.is_same_month(&b),
            "is_same_day" => a.is_same_day(&b),
            "is_same_hour" => a.is_same_hour(&b),
            "is_same_minute" => a.is_same_minute(&b),
            "is_same_second" => a.is_same_second(&b),
            _ => unreachable!(),
        };
        assert_eq!(expected, actual);
    }

    #[rstest]
    fn test_relative_to_now(frozen: Config) {
        assert!(frozen.parse("2020-08-05 13:14:16").is_future());
        assert!(frozen.parse("2020-08-05 13:14:14").is_past());
        assert!(frozen.parse("2020-08-05 13:14:15").is_now());
        assert!(frozen.parse("2020-08-05 00:00:00").is_today());
        assert!(!frozen.parse("2020-08-06 00:00:00").is_today());
    }

    #[test]
    fn test_calendar_predicates() {
        let saturday = Carbon::parse("2020-08-08");
        let wednesday = Carbon::parse("2020-08-05");
        assert!(saturday.is_weekend() && !saturday.is_weekday());
        assert!(wednesday.is_weekday());
        assert!(wednesday.set_weekend_days([Weekday::Wed]).is_weekend());
        assert!(wednesday.is_leap_year());
        assert!(!Carbon::parse("2100-01-01").is_leap_year());
        assert!(Carbon::parse("1970-01-01 00:00:00").is_epoch());
        assert!(!wednesday.is_epoch());
    }

    #[test]
    fn test_closest_farthest() {
        let c = Carbon::parse("2020-08-05");
        let near = Carbon::parse("2020-08-06");
        let far = Carbon::parse("2021-08-05");
        assert!(c.closest(&near, &far).eq(&near));
        assert!(c.closest(&far, &near).eq(&near));
        assert!(c.farthest(&near, &far).eq(&far));
    }

    #[test]
    fn test_max_min() {
        let values = [
            Carbon::parse("2020-08-05"),
            Carbon::parse("xxx"),
            Carbon::parse("2021-08-05"),
            Carbon::parse("2019-08-05"),
        ];
        assert_eq!("2021-08-05", Carbon::max(&values).unwrap().to_date_string());
        assert_eq!("2019-08-05", Carbon::min(&values).unwrap().to_date_string());
        assert_eq!(None, Carbon::max(&[Carbon::parse("")]));
    }
}
