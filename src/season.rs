use crate::carbon::Carbon;
use chrono::Datelike;
use std::fmt::{self, Display};

/// A meteorological season of the northern hemisphere, three whole months each.
///
/// | Season | Months |
/// |---|---|
/// | Spring | March to May |
/// | Summer | June to August |
/// | Autumn | September to November |
/// | Winter | December to February |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// March, April and May.
    Spring = 0,
    /// June, July and August.
    Summer = 1,
    /// September, October and November.
    Autumn = 2,
    /// December, January and February.
    Winter = 3,
}

impl Season {
    /// The season a month (`1`-`12`) belongs to. Out of range months count as winter.
    pub fn from_month(month: u32) -> Season {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// The English name.
    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sign of the western zodiac, by its tropical date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constellation {
    /// March 21st to April 19th.
    Aries = 0,
    /// April 20th to May 20th.
    Taurus = 1,
    /// May 21st to June 21st.
    Gemini = 2,
    /// June 22nd to July 22nd.
    Cancer = 3,
    /// July 23rd to August 22nd.
    Leo = 4,
    /// August 23rd to September 22nd.
    Virgo = 5,
    /// September 23rd to October 23rd.
    Libra = 6,
    /// October 24th to November 22nd.
    Scorpio = 7,
    /// November 23rd to December 21st.
    Sagittarius = 8,
    /// December 22nd to January 19th.
    Capricorn = 9,
    /// January 20th to February 18th.
    Aquarius = 10,
    /// February 19th to March 20th.
    Pisces = 11,
}

/// The first day of each sign in calendar order. Dates before the first entry are Capricorn.
static SIGN_STARTS: [(u32, u32, Constellation); 12] = [
    (1, 20, Constellation::Aquarius),
    (2, 19, Constellation::Pisces),
    (3, 21, Constellation::Aries),
    (4, 20, Constellation::Taurus),
    (5, 21, Constellation::Gemini),
    (6, 22, Constellation::Cancer),
    (7, 23, Constellation::Leo),
    (8, 23, Constellation::Virgo),
    (9, 23, Constellation::Libra),
    (10, 24, Constellation::Scorpio),
    (11, 23, Constellation::Sagittarius),
    (12, 22, Constellation::Capricorn),
];

impl Constellation {
    /// The sign a month (`1`-`12`) and day of month fall in.
    pub fn from_month_day(month: u32, day: u32) -> Constellation {
        SIGN_STARTS
            .iter()
            .rev()
            .find(|(start_month, start_day, _)| (month, day) >= (*start_month, *start_day))
            .map_or(Constellation::Capricorn, |(_, _, sign)| *sign)
    }

    /// The English name.
    pub fn name(&self) -> &'static str {
        match self {
            Constellation::Aries => "Aries",
            Constellation::Taurus => "Taurus",
            Constellation::Gemini => "Gemini",
            Constellation::Cancer => "Cancer",
            Constellation::Leo => "Leo",
            Constellation::Virgo => "Virgo",
            Constellation::Libra => "Libra",
            Constellation::Scorpio => "Scorpio",
            Constellation::Sagittarius => "Sagittarius",
            Constellation::Capricorn => "Capricorn",
            Constellation::Aquarius => "Aquarius",
            Constellation::Pisces => "Pisces",
        }
    }
}

impl Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seasons and constellations. Empty and error values have neither.
impl Carbon {
    /// The season of this value's month. See [`Season`].
    pub fn season(&self) -> Option<Season> {
        self.time().map(|dt| Season::from_month(dt.month()))
    }

    /// The season name in the configured language, e.g. `Summer`.
    pub fn to_season_string(&self) -> String {
        self.season()
            .and_then(|season| self.config.language.season(season))
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Whether this value falls in spring.
    pub fn is_spring(&self) -> bool {
        self.season() == Some(Season::Spring)
    }

    /// Whether this value falls in summer.
    pub fn is_summer(&self) -> bool {
        self.season() == Some(Season::Summer)
    }

    /// Whether this value falls in autumn.
    pub fn is_autumn(&self) -> bool {
        self.season() == Some(Season::Autumn)
    }

    /// Whether this value falls in winter.
    pub fn is_winter(&self) -> bool {
        self.season() == Some(Season::Winter)
    }

    /// The zodiac sign of this value's date. See [`Constellation`].
    ///
    /// ```
    /// use carbon::prelude::*;
    ///
    /// let c = Carbon::parse("2020-08-05");
    /// assert_eq!(Some(Constellation::Leo), c.constellation());
    /// assert_eq!("Leo", c.to_constellation_string());
    /// assert_eq!("狮子座", c.set_locale("zh-CN").to_constellation_string());
    /// ```
    pub fn constellation(&self) -> Option<Constellation> {
        self.time()
            .map(|dt| Constellation::from_month_day(dt.month(), dt.day()))
    }

    /// The constellation name in the configured language.
    pub fn to_constellation_string(&self) -> String {
        self.constellation()
            .and_then(|sign| self.config.language.constellation(sign))
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

macro_rules! constellation_predicates {
    ($($name:ident => $sign:ident;)*) => {
        impl Carbon {
            $(
                #[doc = concat!("Whether this value's date falls in ", stringify!($sign), ".")]
                pub fn $name(&self) -> bool {
                    self.constellation() == Some(Constellation::$sign)
                }
            )*
        }
    };
}

constellation_predicates! {
    is_aries => Aries;
    is_taurus => Taurus;
    is_gemini => Gemini;
    is_cancer => Cancer;
    is_leo => Leo;
    is_virgo => Virgo;
    is_libra => Libra;
    is_scorpio => Scorpio;
    is_sagittarius => Sagittarius;
    is_capricorn => Capricorn;
    is_aquarius => Aquarius;
    is_pisces => Pisces;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("2020-01-05", Season::Winter)]
    #[case("2020-02-29", Season::Winter)]
    #[case("2020-03-01", Season::Spring)]
    #[case("2020-05-31", Season::Spring)]
    #[case("2020-06-05", Season::Summer)]
    #[case("2020-08-31", Season::Summer)]
    #[case("2020-09-05", Season::Autumn)]
    #[case("2020-11-30", Season::Autumn)]
    #[case("2020-12-01", Season::Winter)]
    #[case("0001-01-01", Season::Winter)]
    fn test_season(#[case] value: &str, #[case] expected: Season) {
        let c = Carbon::parse(value);
        assert_eq!(Some(expected), c.season());
        assert_eq!(expected.name(), c.to_season_string());
    }

    #[test]
    fn test_season_predicates() {
        let spring = Carbon::parse("2020-03-01");
        assert!(spring.is_spring());
        assert!(!spring.is_summer() && !spring.is_autumn() && !spring.is_winter());
        assert!(Carbon::parse("2020-07-01").is_summer());
        assert!(Carbon::parse("2020-10-01").is_autumn());
        assert!(Carbon::parse("2020-01-01").is_winter());
        assert!(Carbon::zero().is_winter());
    }

    #[rstest]
    #[case("2020-01-05", Constellation::Capricorn)]
    #[case("2020-02-05", Constellation::Aquarius)]
    #[case("2020-03-05", Constellation::Pisces)]
    #[case("2020-04-05", Constellation::Aries)]
    #[case("2020-05-05", Constellation::Taurus)]
    #[case("2020-06-05", Constellation::Gemini)]
    #[case("2020-07-05", Constellation::Cancer)]
    #[case("2020-08-05", Constellation::Leo)]
    #[case("2020-09-05", Constellation::Virgo)]
    #[case("2020-10-05", Constellation::Libra)]
    #[case("2020-11-05", Constellation::Scorpio)]
    #[case("2020-12-05", Constellation::Sagittarius)]
    #[case("2023-12-21", Constellation::Sagittarius)]
    #[case("2023-12-22", Constellation::Capricorn)]
    #[case("2023-12-31", Constellation::Capricorn)]
    #[case("2024-01-01", Constellation::Capricorn)]
    #[case("2024-01-19", Constellation::Capricorn)]
    #[case("2024-01-20", Constellation::Aquarius)]
    #[case("2024-02-18", Constellation::Aquarius)]
    #[case("2024-02-19", Constellation::Pisces)]
    #[case("2024-03-20", Constellation::Pisces)]
    #[case("2024-03-21", Constellation::Aries)]
    #[case("0001-01-01", Constellation::Capricorn)]
    fn test_constellation(#[case] value: &str, #[case] expected: Constellation) {
        let c = Carbon::parse(value);
        assert_eq!(Some(expected), c.constellation());
        assert_eq!(expected.name(), c.to_constellation_string());
    }

    #[test]
    fn test_localized_names() {
        let args = [
            ("2020-01-05", "冬季", "摩羯座"),
            ("2020-01-22", "冬季", "水瓶座"),
            ("2020-04-05", "春季", "白羊座"),
            ("2020-08-05", "夏季", "狮子座"),
            ("2020-10-05", "秋季", "天秤座"),
        ];
        for (value, season, sign) in args {
            let c = Carbon::parse(value).set_locale("zh-CN");
            assert_eq!(season, c.to_season_string());
            assert_eq!(sign, c.to_constellation_string());
        }
    }

    #[test]
    fn test_constellation_predicates() {
        let c = Carbon::parse("2020-08-05");
        assert!(c.is_leo());
        assert!(!c.is_virgo() && !c.is_cancer());
        assert!(Carbon::parse("2020-03-21").is_aries());
        assert!(Carbon::parse("2020-05-20").is_taurus());
        assert!(Carbon::parse("2020-06-21").is_gemini());
        assert!(Carbon::parse("2020-07-22").is_cancer());
        assert!(Carbon::parse("2020-09-22").is_virgo());
        assert!(Carbon::parse("2020-10-23").is_libra());
        assert!(Carbon::parse("2020-11-22").is_scorpio());
        assert!(Carbon::parse("2020-12-21").is_sagittarius());
        assert!(Carbon::parse("2020-12-22").is_capricorn());
        assert!(Carbon::parse("2020-02-18").is_aquarius());
        assert!(Carbon::parse("2020-03-20").is_pisces());
    }

    #[test]
    fn test_invalid_values() {
        for c in [Carbon::parse(""), Carbon::parse("xxx")] {
            assert_eq!(None, c.season());
            assert_eq!(None, c.constellation());
            assert_eq!("", c.to_season_string());
            assert_eq!("", c.to_constellation_string());
            assert!(!c.is_spring() && !c.is_winter());
            assert!(!c.is_aries() && !c.is_capricorn());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!("Autumn", Season::Autumn.to_string());
        assert_eq!("Sagittarius", Constellation::Sagittarius.to_string());
        assert_eq!(Season::Winter, Season::from_month(13));
    }
}
