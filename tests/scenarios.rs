use carbon::prelude::*;
use chrono::{TimeZone, Utc};
use itertools::Itertools;
use rstest::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn valid_values() -> Vec<Carbon> {
    [
        "2020-01-31 00:00:00",
        "2020-02-29 12:00:00",
        "2020-08-05 13:14:15",
        "2020-08-05 13:14:15.5",
        "2021-12-31 23:59:59",
        "1999-03-01",
        "0001-01-01 00:00:00",
    ]
    .iter()
    .map(|value| Carbon::parse(value))
    .collect()
}

/// One value per non-valid state: empty, error and an absent value turned into a `Carbon`.
fn invalid_values() -> Vec<Carbon> {
    vec![Carbon::parse(""), Carbon::parse("xxx"), Carbon::from(None)]
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn test_clamped_month() {
    assert_eq!(
        "2020-02-29",
        Carbon::parse("2020-01-31")
            .add_months_no_overflow(1)
            .to_date_string()
    );
    assert_eq!(
        "2020-03-02",
        Carbon::parse("2020-01-31").add_months(1).to_date_string()
    );
}

#[test]
fn test_between() {
    let c = Carbon::parse("2020-08-05 22:00:00");
    assert!(c.between(
        &Carbon::parse("2020-08-05 21:00:00"),
        &Carbon::parse("2020-08-05 23:00:00")
    ));
}

#[test]
fn test_error_chain() {
    let c = Carbon::parse("xxx").add_days(5);
    assert!(c.has_error());
    assert_eq!("", c.to_date_string());
}

#[test]
fn test_token_translation() {
    assert_eq!("%Y-%m-%d %H:%M:%S", format_to_layout("Y-m-d H:i:s"));
}

#[test]
fn test_diff_in_months() {
    let start = Carbon::parse("2020-08-05");
    let end = Carbon::parse("2020-10-05");
    assert_eq!(2, start.diff_in_months(Some(&end)));
    assert_eq!(-2, end.diff_in_months(Some(&start)));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_state_propagation() {
    let ops: [fn(&Carbon) -> Carbon; 10] = [
        |c| c.add_days(1),
        |c| c.sub_months_no_overflow(3),
        |c| c.add_year(),
        |c| c.add_duration("1h30m"),
        |c| c.set_month(2),
        |c| c.set_timezone_name("PRC"),
        |c| c.start_of_week(),
        |c| c.end_of_month(),
        |c| c.set_locale("zh-CN"),
        |c| c.add_nanoseconds(1),
    ];
    for (c, op) in invalid_values().iter().cartesian_product(ops) {
        let result = op(c);
        assert_eq!(c.status(), result.status());
        assert_eq!("", result.to_date_time_string());
        assert_eq!(0, result.year());
        assert!(!result.is_leap_year());
    }
}

#[test]
fn test_status_order() {
    assert_eq!(Status::Nil, Status::of(None));
    assert_eq!(Status::Empty, Carbon::parse("").status());
    assert_eq!(Status::Error, Carbon::parse("xxx").status());
    assert_eq!(Status::Zero, Carbon::zero().status());
    assert_eq!(Status::Valid, Carbon::parse("2020-08-05").status());
    assert!(Carbon::zero().is_valid());
}

#[test]
fn test_overflow_policies_agree_on_existing_days() {
    let days = ["2020-01-28", "2020-03-15", "2021-07-01", "2019-12-28"];
    for (day, months) in days.iter().cartesian_product(-14..=14) {
        let c = Carbon::parse(day);
        assert_eq!(
            c.add_months(months),
            c.add_months_no_overflow(months),
            "{day} + {months}"
        );
    }
}

#[test]
fn test_singular_plural() {
    for c in valid_values() {
        assert_eq!(c.add_years(1), c.add_year());
        assert_eq!(c.sub_decades(1), c.sub_decade());
        assert_eq!(c.add_quarters_no_overflow(1), c.add_quarter_no_overflow());
        assert_eq!(c.sub_weeks(1), c.sub_week());
        assert_eq!(c.add_seconds(1), c.add_second());
    }
}

#[test]
fn test_comparator_antisymmetry() {
    let values = valid_values();
    for (a, b) in values.iter().cartesian_product(values.iter()) {
        assert_eq!(a.gt(b), b.lt(a));
        assert_eq!(a.eq(b), b.eq(a));
        let holding = [a.lt(b), a.eq(b), a.gt(b)].iter().filter(|x| **x).count();
        assert_eq!(1, holding);
    }
}

#[test]
fn test_comparisons_with_invalid_are_false() {
    let valid = Carbon::parse("2020-08-05");
    for (a, b) in invalid_values()
        .iter()
        .cartesian_product([valid.clone(), Carbon::parse("xxx")])
    {
        assert!(!a.eq(&b));
        assert!(!a.lt(&b));
        assert!(!b.gte(a));
        assert!(!a.between_included_both(&valid, &valid));
        assert!(!valid.between_included_both(a, &b));
        assert_eq!(0, a.diff_in_days(Some(&b)));
        assert_eq!("", b.diff_for_humans(Some(a)));
    }
}

#[test]
fn test_interval_edges() {
    let start = Carbon::parse("2020-08-05 21:00:00");
    let mid = Carbon::parse("2020-08-05 22:00:00");
    let end = Carbon::parse("2020-08-05 23:00:00");

    assert!(mid.between(&start, &end));
    assert!(!start.between(&start, &end));
    assert!(start.between_included_start(&start, &end));
    assert!(!end.between_included_start(&start, &end));
    assert!(end.between_included_end(&start, &end));
    assert!(start.between_included_both(&start, &end));
    assert!(end.between_included_both(&start, &end));
    assert!(!mid.between(&end, &start));
}

#[test]
fn test_diff_sign() {
    let values = valid_values();
    for (a, b) in values.iter().cartesian_product(values.iter()) {
        assert_eq!(a.diff_in_days(Some(b)), -b.diff_in_days(Some(a)));
        assert_eq!(a.diff_in_seconds(Some(b)), -b.diff_in_seconds(Some(a)));
        assert_eq!(a.diff_abs_in_hours(Some(b)), b.diff_abs_in_hours(Some(a)));
    }
}

// ---------------------------------------------------------------------------
// Config threading
// ---------------------------------------------------------------------------

#[fixture]
fn config() -> Config {
    Config::default()
        .with_timezone_name("PRC")
        .unwrap()
        .with_locale("zh-CN")
        .unwrap()
        .with_week_starts_at(Weekday::Sun)
        .with_clock(Clock::Frozen(
            Utc.with_ymd_and_hms(2020, 8, 5, 13, 14, 15).unwrap(),
        ))
}

#[rstest]
fn test_config_flows_through_values(config: Config) {
    let c = config.now().add_days(2).start_of_week();
    assert_eq!("PRC", c.timezone());
    assert_eq!("zh-CN", c.locale());
    assert_eq!("2020-08-02 00:00:00", c.to_date_time_string());
    assert_eq!("星期日", c.to_week_string());
    assert_eq!("3 天前", c.diff_for_humans(None));
}

#[rstest]
fn test_values_keep_their_config(config: Config) {
    let c = config.parse("2020-08-05 13:14:15");
    let _changed = config.clone().with_timezone(Tz::UTC);
    assert_eq!("PRC", c.timezone());
    assert_eq!(1_596_604_455, c.timestamp());
}

#[rstest]
fn test_relative_keywords(config: Config) {
    assert!(config.parse("now").is_now());
    assert!(config.parse("yesterday").is_past());
    assert!(config.parse("tomorrow").is_future());
    assert!(config.parse("today 00:00").has_error());
}
