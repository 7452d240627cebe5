/// Errors that can be captured inside a [`Carbon`](crate::Carbon) value or returned from
/// [`Config`](crate::Config) builders.
///
/// Operations on a value never return these directly. Instead, the value enters the error state and
/// the error can be retrieved with [`Carbon::error`](crate::Carbon::error).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The value did not match the layout (or any of the candidate layouts).
    #[error("cannot parse `{value}` as a time with layout `{layout}`")]
    Parse {
        /// The input string.
        value: String,
        /// The layout or token format attempted. Several layouts are joined with ` | `.
        layout: String,
        /// The underlying chrono error, if a single layout was attempted.
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// A layout or format string was empty.
    #[error("layout should not be empty")]
    EmptyLayout,

    /// A timezone name was empty.
    #[error("timezone should not be empty")]
    EmptyTimezone,

    /// A timezone name could not be resolved.
    #[error("invalid timezone `{timezone}`, see the IANA time zone database for valid names")]
    InvalidTimezone {
        /// The unresolved name.
        timezone: String,
    },

    /// A locale has no resource table.
    #[error("invalid locale `{locale}`, available locales: {available}")]
    InvalidLocale {
        /// The requested locale.
        locale: String,
        /// The locales that are bundled, comma separated.
        available: String,
    },

    /// A resource table entry is missing or malformed.
    #[error("resource `{key}` is missing or malformed in locale `{locale}`")]
    Resource {
        /// The locale of the resource table.
        locale: String,
        /// The resource key.
        key: String,
    },

    /// A free-form duration literal did not parse.
    #[error("invalid duration `{duration}`")]
    Duration {
        /// The literal.
        duration: String,
    },

    /// An arithmetic or construction result is outside the supported range of the instant type.
    #[error("result of `{operation}` is out of the supported date range")]
    OutOfRange {
        /// The operation that overflowed.
        operation: &'static str,
    },

    /// Explicit date/time fields do not make a valid date/time.
    #[error(
        "fields year ({year}), month ({month}), day ({day}), hour ({hour}), minute ({minute}), \
         second ({second}), nanosecond ({nanosecond}) do not make a valid date/time"
    )]
    InvalidDateTime {
        /// Year field.
        year: i32,
        /// Month field.
        month: u32,
        /// Day field.
        day: u32,
        /// Hour field.
        hour: u32,
        /// Minute field.
        minute: u32,
        /// Second field.
        second: u32,
        /// Nanosecond field.
        nanosecond: u32,
    },

    /// A configuration value is manifestly invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn parse(value: &str, layout: &str, source: Option<chrono::ParseError>) -> Self {
        Error::Parse {
            value: value.to_owned(),
            layout: layout.to_owned(),
            source,
        }
    }
}
