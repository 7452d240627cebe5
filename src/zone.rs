use crate::{cache::BoundedCache, error::Error};
use chrono_tz::Tz;

static ZONES: BoundedCache<Tz> = BoundedCache::new("zone", 64);

/// The name that resolves to the host's configured zone.
pub const LOCAL: &str = "Local";

/// Resolves an IANA zone name (or one of its legacy aliases like `PRC`) to a [`Tz`].
///
/// `"Local"` asks the host for its configured zone and falls back to UTC when the host cannot
/// answer. Successful lookups are memoized.
///
/// # Errors
///
/// - [`Error::EmptyTimezone`] if `name` is empty.
/// - [`Error::InvalidTimezone`] if `name` is not a known zone.
pub fn load_timezone(name: &str) -> Result<Tz, Error> {
    if name.is_empty() {
        return Err(Error::EmptyTimezone);
    }
    ZONES.get_or_try_insert_with(name, resolve)
}

fn resolve(name: &str) -> Result<Tz, Error> {
    if name == LOCAL {
        return Ok(local());
    }
    name.parse::<Tz>().map_err(|_| Error::InvalidTimezone {
        timezone: name.to_owned(),
    })
}

fn local() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(host) => host.parse::<Tz>().unwrap_or_else(|_| {
            tracing::debug!(%host, "host zone is unknown to the zone database, using UTC");
            Tz::UTC
        }),
        Err(err) => {
            tracing::debug!(%err, "host zone unavailable, using UTC");
            Tz::UTC
        }
    }
}
