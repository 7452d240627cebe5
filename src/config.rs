use crate::{error::Error, language::Language, zone::load_timezone};
use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;

/// The layout used by [`Config::default`], in chrono's strftime syntax.
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Where "now" comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The system clock.
    #[default]
    System,

    /// A fixed instant. Every "relative to now" operation sees this value.
    Frozen(DateTime<Utc>),
}

impl Clock {
    /// The current instant according to this clock.
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Frozen(instant) => *instant,
        }
    }
}

/// Defaults captured by every [`Carbon`](crate::Carbon) at construction.
///
/// A `Config` is an immutable value: the `with_*` builders return a modified copy. Values built
/// from a config keep their own copy, so later changes to a config never leak into existing
/// values.
///
/// ```
/// use carbon::prelude::*;
///
/// let config = Config::default()
///     .with_timezone_name("PRC")
///     .unwrap()
///     .with_week_starts_at(Weekday::Sun);
/// let c = config.parse("2020-08-05 13:14:15");
/// assert_eq!("2020-08-02", c.start_of_week().to_date_string());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) layout: String,
    pub(crate) timezone: Tz,
    pub(crate) language: Language,
    pub(crate) week_starts_at: Weekday,
    pub(crate) weekend_days: Vec<Weekday>,
    pub(crate) clock: Clock,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_owned(),
            timezone: Tz::UTC,
            language: Language::default(),
            week_starts_at: Weekday::Mon,
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
            clock: Clock::System,
        }
    }
}

impl Config {
    /// Same as [`Config::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout (chrono strftime syntax) used by
    /// [`Carbon::to_layout_string`](crate::Carbon::to_layout_string).
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Sets the zone that naive inputs are interpreted in and values are displayed in.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Like [`Config::with_timezone`], resolving the zone by name first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTimezone`] or [`Error::InvalidTimezone`] if the name cannot be
    /// resolved.
    pub fn with_timezone_name(self, name: &str) -> Result<Self, Error> {
        Ok(self.with_timezone(load_timezone(name)?))
    }

    /// Switches to one of the bundled locales.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLocale`] if the locale is not bundled.
    pub fn with_locale(self, locale: &str) -> Result<Self, Error> {
        Ok(self.with_language(Language::new(locale)?))
    }

    /// Sets the language, possibly with custom resources.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the first day of the week used by the week boundaries.
    pub fn with_week_starts_at(mut self, weekday: Weekday) -> Self {
        self.week_starts_at = weekday;
        self
    }

    /// Sets which days count as weekend days. They are stored once each, Monday first.
    pub fn with_weekend_days(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekend_days = weekdays.into_iter().collect();
        self.weekend_days.sort_by_key(Weekday::num_days_from_monday);
        self.weekend_days.dedup();
        self
    }

    /// Sets the clock that "now" is read from.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Checks the config for values that cannot be attributed to any single value.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyLayout`] if the layout is empty.
    /// - [`Error::InvalidConfig`] if every day of the week is a weekend day.
    pub fn validate(&self) -> Result<(), Error> {
        if self.layout.is_empty() {
            return Err(Error::EmptyLayout);
        }
        if self.weekend_days.len() >= 7 {
            return Err(Error::InvalidConfig {
                reason: "every day of the week is a weekend day",
            });
        }
        Ok(())
    }

    /// The layout used by [`Carbon::to_layout_string`](crate::Carbon::to_layout_string).
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// The configured zone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The configured language.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// The first day of the week.
    pub fn week_starts_at(&self) -> Weekday {
        self.week_starts_at
    }

    /// The weekend days.
    pub fn weekend_days(&self) -> &[Weekday] {
        &self.weekend_days
    }

    /// The clock.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// The current instant in the configured zone.
    pub(crate) fn now_in_zone(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.timezone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(DEFAULT_LAYOUT, config.layout());
        assert_eq!(Tz::UTC, config.timezone());
        assert_eq!("en", config.language().locale());
        assert_eq!(Weekday::Mon, config.week_starts_at());
        assert_eq!(&[Weekday::Sat, Weekday::Sun], config.weekend_days());
        assert_eq!(Clock::System, config.clock());
        assert_eq!(Ok(()), config.validate());
    }

    #[test]
    fn test_builders() {
        let frozen = Utc.with_ymd_and_hms(2020, 8, 5, 13, 14, 15).unwrap();
        let config = Config::new()
            .with_layout("%Y")
            .with_timezone_name("PRC")
            .unwrap()
            .with_locale("zh-CN")
            .unwrap()
            .with_week_starts_at(Weekday::Sun)
            .with_weekend_days([Weekday::Fri])
            .with_clock(Clock::Frozen(frozen));

        assert_eq!("%Y", config.layout());
        assert_eq!(Tz::PRC, config.timezone());
        assert_eq!("zh-CN", config.language().locale());
        assert_eq!(Weekday::Sun, config.week_starts_at());
        assert_eq!(&[Weekday::Fri], config.weekend_days());
        assert_eq!(frozen, config.clock().now());
        assert_eq!("2020-08-05 21:14:15 CST", config.now_in_zone().format("%F %T %Z").to_string());
    }

    #[rstest]
    #[case(&[Weekday::Sat, Weekday::Sun, Weekday::Sat], &[Weekday::Sat, Weekday::Sun])]
    #[case(&[Weekday::Sun, Weekday::Sat, Weekday::Sun], &[Weekday::Sat, Weekday::Sun])]
    #[case(&[Weekday::Fri, Weekday::Mon, Weekday::Fri], &[Weekday::Mon, Weekday::Fri])]
    #[case(&[], &[])]
    fn test_weekend_days_deduplicated(#[case] given: &[Weekday], #[case] expected: &[Weekday]) {
        let config = Config::default().with_weekend_days(given.iter().copied());
        assert_eq!(expected, config.weekend_days());
    }

    #[rstest]
    #[case(Config::default().with_layout(""), Error::EmptyLayout)]
    #[case(
        Config::default().with_weekend_days([
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]),
        Error::InvalidConfig { reason: "every day of the week is a weekend day" }
    )]
    fn test_validate_err(#[case] config: Config, #[case] err: Error) {
        assert_eq!(Err(err), config.validate());
    }

    #[test]
    fn test_bad_builders() {
        assert_eq!(
            Err(Error::InvalidTimezone {
                timezone: "Mars/Olympus".to_string()
            }),
            Config::default().with_timezone_name("Mars/Olympus")
        );
        assert!(Config::default().with_locale("xx").is_err());
    }
}
