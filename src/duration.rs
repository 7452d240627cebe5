use crate::{cache::BoundedCache, error::Error};
use chrono::TimeDelta;

static DURATIONS: BoundedCache<TimeDelta> = BoundedCache::new("duration", 32);

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

// fractions beyond this many digits cannot change a nanosecond count
const MAX_FRACTION_DIGITS: usize = 20;

static UNITS: [(&str, u128); 9] = [
    ("ns", 1),
    ("us", NANOS_PER_MICRO),
    ("µs", NANOS_PER_MICRO),
    ("μs", NANOS_PER_MICRO),
    ("ms", NANOS_PER_MILLI),
    ("s", NANOS_PER_SECOND),
    ("m", NANOS_PER_MINUTE),
    ("h", NANOS_PER_HOUR),
    ("d", 24 * NANOS_PER_HOUR),
];

/// Parses a free-form duration literal like `"1h30m"`, `"2.5h"`, `"-1.5m"` or `"300ms"`.
///
/// A literal is an optional sign followed by one or more `<number><unit>` pairs, where the number
/// may carry a decimal fraction and the unit is one of `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`
/// or `d`. The bare literal `"0"` is also accepted.
///
/// # Errors
///
/// Returns [`Error::Duration`] if the literal is empty, malformed, uses an unknown unit or does not
/// fit in the range of [`TimeDelta`].
pub fn parse_duration(literal: &str) -> Result<TimeDelta, Error> {
    DURATIONS.get_or_try_insert_with(literal, parse_uncached)
}

fn parse_uncached(literal: &str) -> Result<TimeDelta, Error> {
    let invalid = || Error::Duration {
        duration: literal.to_owned(),
    };

    let (negative, mut rest) = if let Some(rest) = literal.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = literal.strip_prefix('+') {
        (false, rest)
    } else {
        (false, literal)
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after) = rest.split_at(int_len);

        let (frac_part, after) = match after.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(invalid)?;

        let int: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let whole = int.checked_mul(scale).ok_or_else(invalid)?;

        let frac_digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
        let frac = if frac_digits.is_empty() {
            0
        } else {
            let numerator: u128 = frac_digits.parse().map_err(|_| invalid())?;
            numerator * scale / 10u128.pow(frac_digits.len() as u32)
        };

        total = total
            .checked_add(whole)
            .and_then(|t| t.checked_add(frac))
            .ok_or_else(invalid)?;
        rest = after;
    }

    let nanos = i64::try_from(total).map_err(|_| invalid())?;
    let delta = TimeDelta::nanoseconds(nanos);
    Ok(if negative { -delta } else { delta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("0", TimeDelta::zero())]
    #[case("1s", TimeDelta::seconds(1))]
    #[case("0.5s", TimeDelta::milliseconds(500))]
    #[case(".5s", TimeDelta::milliseconds(500))]
    #[case("1.5h", TimeDelta::minutes(90))]
    #[case("2h30m", TimeDelta::minutes(150))]
    #[case("-1.5m", TimeDelta::seconds(-90))]
    #[case("+10h", TimeDelta::hours(10))]
    #[case("1ms", TimeDelta::milliseconds(1))]
    #[case("1us", TimeDelta::microseconds(1))]
    #[case("1µs", TimeDelta::microseconds(1))]
    #[case("1ns", TimeDelta::nanoseconds(1))]
    #[case("1d2h", TimeDelta::hours(26))]
    #[case("1h0.000000001s", TimeDelta::hours(1) + TimeDelta::nanoseconds(1))]
    fn test_parse_ok(#[case] literal: &str, #[case] expected: TimeDelta) {
        assert_eq!(Ok(expected), parse_duration(literal));
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("xyz")]
    #[case("1")]
    #[case("1x")]
    #[case("1h2x")]
    #[case(".s")]
    #[case("h")]
    #[case("99999999999999999999h")]
    fn test_parse_err(#[case] literal: &str) {
        assert_eq!(
            Err(Error::Duration {
                duration: literal.to_string()
            }),
            parse_duration(literal)
        );
    }

    #[test]
    fn test_failure_not_cached() {
        let _ = parse_duration("3x");
        assert_eq!(None, DURATIONS.get("3x"));
    }
}
