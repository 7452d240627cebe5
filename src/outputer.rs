use crate::{
    carbon::{Carbon, Inner},
    config::Config,
    error::Error,
    format::{render, render_layout},
    parser::{
        TIMESTAMP_LAYOUT, TIMESTAMP_MICRO_LAYOUT, TIMESTAMP_MILLI_LAYOUT, TIMESTAMP_NANO_LAYOUT,
    },
};
use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};
use std::fmt::{self, Display};

macro_rules! layout_outputs {
    ($($(#[$doc:meta])* $name:ident, $name_in:ident => $layout:expr;)*) => {
        impl Carbon {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> String {
                    self.layout($layout)
                }

                #[doc = concat!("[`Carbon::", stringify!($name), "`] in a named zone.")]
                pub fn $name_in(&self, timezone: &str) -> String {
                    self.set_timezone_name(timezone).$name()
                }
            )*
        }
    };
}

layout_outputs! {
    /// `2020-08-05`
    to_date_string, to_date_string_in => "%Y-%m-%d";
    /// `2020-08-05.999`
    to_date_milli_string, to_date_milli_string_in => "%Y-%m-%d%.3f";
    /// `2020-08-05.999999`
    to_date_micro_string, to_date_micro_string_in => "%Y-%m-%d%.6f";
    /// `2020-08-05.999999999`
    to_date_nano_string, to_date_nano_string_in => "%Y-%m-%d%.9f";
    /// `2020-08-05 13:14:15`
    to_date_time_string, to_date_time_string_in => "%Y-%m-%d %H:%M:%S";
    /// `2020-08-05 13:14:15.999`
    to_date_time_milli_string, to_date_time_milli_string_in => "%Y-%m-%d %H:%M:%S%.3f";
    /// `2020-08-05 13:14:15.999999`
    to_date_time_micro_string, to_date_time_micro_string_in => "%Y-%m-%d %H:%M:%S%.6f";
    /// `2020-08-05 13:14:15.999999999`
    to_date_time_nano_string, to_date_time_nano_string_in => "%Y-%m-%d %H:%M:%S%.9f";
    /// `13:14:15`
    to_time_string, to_time_string_in => "%H:%M:%S";
    /// `13:14:15.999`
    to_time_milli_string, to_time_milli_string_in => "%H:%M:%S%.3f";
    /// `13:14:15.999999`
    to_time_micro_string, to_time_micro_string_in => "%H:%M:%S%.6f";
    /// `13:14:15.999999999`
    to_time_nano_string, to_time_nano_string_in => "%H:%M:%S%.9f";
    /// `1:14PM`
    to_kitchen_string, to_kitchen_string_in => "%-I:%M%p";
    /// `2020-08-05T13:14:15+00:00`
    to_iso8601_string, to_iso8601_string_in => "%Y-%m-%dT%H:%M:%S%:z";
    /// `Wed, 05 Aug 2020 13:14:15 +0000`
    to_rfc2822_string, to_rfc2822_string_in => "%a, %d %b %Y %H:%M:%S %z";
    /// `Wed, 05 Aug 2020 13:14:15 UTC`
    to_rfc1123_string, to_rfc1123_string_in => "%a, %d %b %Y %H:%M:%S %Z";
}

/// Named outputs.
///
/// Every output of an empty or error value is `""`. The `*_in` variants first convert to a named
/// zone, and give `""` for an unknown one.
///
/// ```
/// use carbon::prelude::*;
///
/// let c = Carbon::parse("2020-08-05 13:14:15.999");
/// assert_eq!("2020-08-05 13:14:15.999 +0000 UTC", c.to_string());
/// assert_eq!("2020-08-05 21:14:15", c.to_date_time_string_in("PRC"));
/// assert_eq!("Aug 5th, 2020", c.format("M jK, Y"));
/// assert_eq!("", Carbon::parse("xxx").to_date_string());
/// ```
impl Carbon {
    /// Renders with a chrono strftime layout, or one of the timestamp pseudo-layouts.
    ///
    /// A layout chrono rejects gives `""`.
    pub fn layout(&self, layout: &str) -> String {
        let Some(dt) = self.time() else {
            return String::new();
        };
        match layout {
            TIMESTAMP_LAYOUT => dt.timestamp().to_string(),
            TIMESTAMP_MILLI_LAYOUT => dt.timestamp_millis().to_string(),
            TIMESTAMP_MICRO_LAYOUT => dt.timestamp_micros().to_string(),
            TIMESTAMP_NANO_LAYOUT => dt
                .timestamp_nanos_opt()
                .map(|nanos| nanos.to_string())
                .unwrap_or_default(),
            _ => render_layout(dt, layout),
        }
    }

    /// [`Carbon::layout`] in a named zone.
    pub fn layout_in(&self, layout: &str, timezone: &str) -> String {
        self.set_timezone_name(timezone).layout(layout)
    }

    /// Renders with a format string in token notation. See the
    /// [token table](crate#format-tokens).
    pub fn format(&self, format: &str) -> String {
        match self.time() {
            Some(dt) => render(dt, &self.config.language, format),
            None => String::new(),
        }
    }

    /// [`Carbon::format`] in a named zone.
    pub fn format_in(&self, format: &str, timezone: &str) -> String {
        self.set_timezone_name(timezone).format(format)
    }

    /// Renders with the layout this value was parsed with, or the configured one.
    pub fn to_layout_string(&self) -> String {
        self.layout(&self.config.layout)
    }

    /// `2020-08-05T13:14:15Z`, or with a numeric offset outside UTC.
    pub fn to_rfc3339_string(&self) -> String {
        self.time()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default()
    }

    /// [`Carbon::to_rfc3339_string`] in a named zone.
    pub fn to_rfc3339_string_in(&self, timezone: &str) -> String {
        self.set_timezone_name(timezone).to_rfc3339_string()
    }

    /// The month name in the configured language, e.g. `August`.
    pub fn to_month_string(&self) -> String {
        self.named(|c, dt| c.config.language.month(dt.month0(), false))
    }

    /// The abbreviated month name, e.g. `Aug`.
    pub fn to_short_month_string(&self) -> String {
        self.named(|c, dt| c.config.language.month(dt.month0(), true))
    }

    /// The weekday name in the configured language, e.g. `Wednesday`.
    pub fn to_week_string(&self) -> String {
        self.named(|c, dt| c.config.language.weekday(dt.weekday(), false))
    }

    /// The abbreviated weekday name, e.g. `Wed`.
    pub fn to_short_week_string(&self) -> String {
        self.named(|c, dt| c.config.language.weekday(dt.weekday(), true))
    }

    fn named<'c, F>(&'c self, name: F) -> String
    where
        F: FnOnce(&'c Carbon, &DateTime<chrono_tz::Tz>) -> Option<&'c str>,
    {
        self.time()
            .and_then(|dt| name(self, dt))
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// The instant in UTC as RFC 3339 with nanoseconds, `2020-08-05T13:14:15.000000000Z`.
    ///
    /// Empty values give `""`. Together with [`Carbon::from_canonical_str`], this is the form to
    /// store values in.
    pub fn to_canonical_string(&self) -> String {
        self.time()
            .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Nanos, true))
            .unwrap_or_default()
    }

    /// Reads the output of [`Carbon::to_canonical_string`] back, in UTC.
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let c = Carbon::parse_in("2020-08-05 13:14:15.5", "PRC");
    /// let stored = c.to_canonical_string();
    /// assert_eq!("2020-08-05T05:14:15.500000000Z", stored);
    /// assert!(Carbon::from_canonical_str(&stored).unwrap().eq(&c));
    /// assert!(Carbon::from_canonical_str("").unwrap().is_empty());
    /// ```
    pub fn from_canonical_str(value: &str) -> Result<Carbon, Error> {
        let config = Config::default();
        if value.is_empty() {
            return Ok(config.empty());
        }
        let fixed = DateTime::parse_from_rfc3339(value)
            .map_err(|err| Error::parse(value, "%+", Some(err)))?;
        Ok(config.from_date_time(fixed.with_timezone(&config.timezone)))
    }
}

/// `2020-08-05 13:14:15.999999999 +0000 UTC`, with trailing fraction zeros trimmed, and nothing
/// for an empty or error value.
impl Display for Carbon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Inner::Time(dt) = &self.inner else {
            return Ok(());
        };
        write!(f, "{}", render_layout(dt, "%Y-%m-%d %H:%M:%S"))?;
        let nanos = dt.nanosecond();
        if nanos > 0 {
            write!(f, "{}", format!(".{nanos:09}").trim_end_matches('0'))?;
        }
        write!(f, "{}", render_layout(dt, " %z %Z"))
    }
}
