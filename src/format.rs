use crate::{
    cache::BoundedCache,
    carbon::{days_in_month, is_leap_year},
    language::Language,
};
use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Datelike, Offset,
};
use chrono_tz::Tz;
use core::fmt::Write;

static LAYOUTS: BoundedCache<String> = BoundedCache::new("format", 50);

const ESCAPE: char = '\\';

/// A token of the format notation and the chrono layout it stands for.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Token {
    /// The characters that select this token in a format string.
    pub(crate) pattern: &'static str,

    /// The equivalent chrono strftime layout.
    pub(crate) layout: &'static str,
}

/// Tokens that have a chrono layout equivalent. Matching takes the first (longest) pattern that a
/// format string starts with, so longer patterns must come first if any are ever added.
pub(crate) static TOKENS: [Token; 27] = [
    Token { pattern: "d", layout: "%d" },
    Token { pattern: "D", layout: "%a" },
    Token { pattern: "j", layout: "%-d" },
    Token { pattern: "l", layout: "%A" },
    Token { pattern: "F", layout: "%B" },
    Token { pattern: "m", layout: "%m" },
    Token { pattern: "M", layout: "%b" },
    Token { pattern: "n", layout: "%-m" },
    Token { pattern: "Y", layout: "%Y" },
    Token { pattern: "y", layout: "%y" },
    Token { pattern: "a", layout: "%P" },
    Token { pattern: "A", layout: "%p" },
    Token { pattern: "g", layout: "%-I" },
    Token { pattern: "h", layout: "%I" },
    Token { pattern: "H", layout: "%H" },
    Token { pattern: "G", layout: "%-H" },
    Token { pattern: "i", layout: "%M" },
    Token { pattern: "s", layout: "%S" },
    Token { pattern: "O", layout: "%z" },
    Token { pattern: "P", layout: "%:z" },
    Token { pattern: "Z", layout: "%Z" },
    Token { pattern: "u", layout: "%3f" },
    Token { pattern: "v", layout: "%6f" },
    Token { pattern: "x", layout: "%9f" },
    Token { pattern: "S", layout: "%s" },
    Token { pattern: "N", layout: "%u" },
    Token { pattern: "W", layout: "%V" },
];

fn find_token(format: &str) -> Option<&'static Token> {
    TOKENS.iter().find(|token| format.starts_with(token.pattern))
}

/// Appends `text` to a layout so that it renders literally.
fn push_literal(layout: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            layout.push_str("%%");
        } else {
            layout.push(c);
        }
    }
}

/// Pieces of a format string, as the scanner sees them.
#[derive(Debug, PartialEq, Eq)]
enum Piece {
    Token(&'static Token),
    /// A character that is not a token.
    Char(char),
    /// A character that followed the escape.
    Escaped(char),
}

/// Splits a format string into pieces in one left-to-right pass.
fn scan(format: &str) -> impl Iterator<Item = Piece> + '_ {
    let mut rest = format;
    core::iter::from_fn(move || {
        let mut chars = rest.chars();
        let first = chars.next()?;
        if first == ESCAPE {
            // a trailing escape stands for itself
            let escaped = chars.next().unwrap_or(ESCAPE);
            rest = chars.as_str();
            return Some(Piece::Escaped(escaped));
        }
        if let Some(token) = find_token(rest) {
            rest = &rest[token.pattern.len()..];
            return Some(Piece::Token(token));
        }
        rest = chars.as_str();
        Some(Piece::Char(first))
    })
}

/// Translates a format string in token notation (`"Y-m-d H:i:s"`) to a chrono strftime layout
/// (`"%Y-%m-%d %H:%M:%S"`).
///
/// Characters that are not tokens are copied literally, and a backslash makes the next character
/// literal even if it is a token. See the [token table](crate#format-tokens). Translation is total:
/// an empty format gives an empty layout. Short formats are memoized.
///
/// ```
/// assert_eq!("%Y-%m-%d %H:%M:%S", carbon::format_to_layout("Y-m-d H:i:s"));
/// assert_eq!("It is %Y", carbon::format_to_layout(r"I\t \i\s Y"));
/// ```
pub fn format_to_layout(format: &str) -> String {
    LAYOUTS.get_or_insert_with(format, |format| {
        let mut layout = String::with_capacity(format.len() * 2);
        for piece in scan(format) {
            match piece {
                Piece::Token(token) => layout.push_str(token.layout),
                Piece::Char(c) | Piece::Escaped(c) => {
                    push_literal(&mut layout, c.encode_utf8(&mut [0; 4]))
                }
            }
        }
        layout
    })
}

/// Renders `dt` with a chrono layout, giving `""` for layouts chrono rejects.
pub(crate) fn render_layout(dt: &DateTime<Tz>, layout: &str) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(layout).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        tracing::debug!(layout, "invalid layout");
        return String::new();
    }
    let mut out = String::with_capacity(layout.len() * 2);
    match write!(out, "{}", dt.format_with_items(items.iter())) {
        Ok(()) => out,
        Err(_) => {
            tracing::debug!(layout, "layout cannot be rendered for this value");
            String::new()
        }
    }
}

fn offset(dt: &DateTime<Tz>, colon: bool) -> String {
    if dt.offset().fix().local_minus_utc() == 0 {
        return "Z".to_owned();
    }
    let layout = if colon { "%:z" } else { "%z" };
    render_layout(dt, layout)
}

/// The value for a token that has no chrono layout equivalent.
fn computed(dt: &DateTime<Tz>, language: &Language, c: char) -> Option<String> {
    let value = match c {
        'D' => language.weekday(dt.weekday(), true)?.to_owned(),
        'l' => language.weekday(dt.weekday(), false)?.to_owned(),
        'F' => language.month(dt.month0(), false)?.to_owned(),
        'M' => language.month(dt.month0(), true)?.to_owned(),
        'K' => language.ordinal_suffix(dt.day()).to_owned(),
        'w' => dt.weekday().num_days_from_monday().to_string(),
        'U' => dt.timestamp_millis().to_string(),
        'V' => dt.timestamp_micros().to_string(),
        'X' => dt.timestamp_nanos_opt()?.to_string(),
        'L' => u8::from(is_leap_year(dt.year())).to_string(),
        't' => days_in_month(dt.year(), dt.month()).to_string(),
        'q' => (dt.month0() / 3 + 1).to_string(),
        'c' => (dt.year().div_euclid(100) + 1).to_string(),
        'z' => dt.timezone().name().to_owned(),
        'o' => dt.offset().fix().local_minus_utc().to_string(),
        'Q' => offset(dt, false),
        'R' => offset(dt, true),
        _ => return None,
    };
    Some(value)
}

/// Renders `dt` with a format string in token notation.
///
/// Beyond [`format_to_layout`], this knows the tokens that have no layout equivalent, and takes
/// month and weekday names from `language`.
pub(crate) fn render(dt: &DateTime<Tz>, language: &Language, format: &str) -> String {
    let mut layout = String::with_capacity(format.len() * 2);
    for piece in scan(format) {
        match piece {
            Piece::Token(token) => {
                let c = token.pattern.chars().next().unwrap_or_default();
                match computed(dt, language, c) {
                    Some(value) => push_literal(&mut layout, &value),
                    None => layout.push_str(token.layout),
                }
            }
            Piece::Char(c) => match computed(dt, language, c) {
                Some(value) => push_literal(&mut layout, &value),
                None => push_literal(&mut layout, c.encode_utf8(&mut [0; 4])),
            },
            Piece::Escaped(c) => push_literal(&mut layout, c.encode_utf8(&mut [0; 4])),
        }
    }
    render_layout(dt, &layout)
}
