use crate::{
    cache::BoundedCache,
    error::Error,
    season::{Constellation, Season},
};
use chrono::Weekday;
use std::{collections::HashMap, sync::Arc};

type Resources = Arc<HashMap<String, String>>;

static TABLES: BoundedCache<Resources> = BoundedCache::new("language", 16);

/// The locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

static EN: [(&str, &str); 19] = [
    ("months", "January|February|March|April|May|June|July|August|September|October|November|December"),
    ("short_months", "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec"),
    ("weeks", "Sunday|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday"),
    ("short_weeks", "Sun|Mon|Tue|Wed|Thu|Fri|Sat"),
    ("year", "1 year|%d years"),
    ("month", "1 month|%d months"),
    ("week", "1 week|%d weeks"),
    ("day", "1 day|%d days"),
    ("hour", "1 hour|%d hours"),
    ("minute", "1 minute|%d minutes"),
    ("second", "1 second|%d seconds"),
    ("now", "just now"),
    ("ago", "%s ago"),
    ("from_now", "%s from now"),
    ("before", "%s before"),
    ("after", "%s after"),
    ("ordinals", "st|nd|rd|th"),
    ("seasons", "Spring|Summer|Autumn|Winter"),
    (
        "constellations",
        "Aries|Taurus|Gemini|Cancer|Leo|Virgo|Libra|Scorpio|Sagittarius|Capricorn|Aquarius|Pisces",
    ),
];

static ZH_CN: [(&str, &str); 19] = [
    ("months", "一月|二月|三月|四月|五月|六月|七月|八月|九月|十月|十一月|十二月"),
    ("short_months", "1月|2月|3月|4月|5月|6月|7月|8月|9月|10月|11月|12月"),
    ("weeks", "星期日|星期一|星期二|星期三|星期四|星期五|星期六"),
    ("short_weeks", "周日|周一|周二|周三|周四|周五|周六"),
    ("year", "%d 年"),
    ("month", "%d 个月"),
    ("week", "%d 周"),
    ("day", "%d 天"),
    ("hour", "%d 小时"),
    ("minute", "%d 分钟"),
    ("second", "%d 秒"),
    ("now", "刚刚"),
    ("ago", "%s前"),
    ("from_now", "%s后"),
    ("before", "%s前"),
    ("after", "%s后"),
    ("ordinals", "|||"),
    ("seasons", "春季|夏季|秋季|冬季"),
    (
        "constellations",
        "白羊座|金牛座|双子座|巨蟹座|狮子座|处女座|天秤座|天蝎座|射手座|摩羯座|水瓶座|双鱼座",
    ),
];

static LOCALES: [(&str, &[(&str, &str)]); 2] = [("en", &EN), ("zh-CN", &ZH_CN)];

fn available_locales() -> String {
    LOCALES
        .iter()
        .map(|(locale, _)| *locale)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A locale's resource table: month, weekday, season and constellation names plus the phrases
/// used by human readable diffs.
///
/// Plural-aware entries are `|`-separated: the item at index `n - 1` is used for a count of `n`,
/// and the last item for any larger count. `%d` stands for the count and `%s` for the translated
/// phrase in the directional entries (`ago`, `from_now`, `before`, `after`).
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    locale: String,
    resources: Resources,
}

impl Language {
    /// Loads one of the bundled locales (`en`, `zh-CN`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLocale`] if no table is bundled for `locale`.
    pub fn new(locale: &str) -> Result<Self, Error> {
        let resources = TABLES.get_or_try_insert_with(locale, |locale| {
            LOCALES
                .iter()
                .find(|(name, _)| *name == locale)
                .map(|(_, table)| {
                    Arc::new(
                        table
                            .iter()
                            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                            .collect(),
                    )
                })
                .ok_or_else(|| Error::InvalidLocale {
                    locale: locale.to_owned(),
                    available: available_locales(),
                })
        })?;
        Ok(Self {
            locale: locale.to_owned(),
            resources,
        })
    }

    /// Overrides entries of this table. Keys that are not given keep their current value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resource`] if `resources` is empty or one of the name lists does not
    /// have the right number of items (12 months, 7 weekdays).
    pub fn with_resources<K, V>(
        self,
        resources: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, Error>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = (*self.resources).clone();
        let before = merged.len();
        let mut any = false;
        for (key, value) in resources {
            merged.insert(key.into(), value.into());
            any = true;
        }
        if !any {
            return Err(Error::Resource {
                locale: self.locale,
                key: String::new(),
            });
        }
        tracing::debug!(locale = %self.locale, added = merged.len() - before, "merged resources");

        let lists = [
            ("months", 12),
            ("short_months", 12),
            ("weeks", 7),
            ("short_weeks", 7),
            ("seasons", 4),
            ("constellations", 12),
        ];
        for (key, expected) in lists {
            if let Some(value) = merged.get(key) {
                if value.split('|').count() != expected {
                    return Err(Error::Resource {
                        locale: self.locale,
                        key: key.to_owned(),
                    });
                }
            }
        }

        Ok(Self {
            locale: self.locale,
            resources: Arc::new(merged),
        })
    }

    /// The locale identifier, such as `en`.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub(crate) fn resource(&self, key: &str) -> Option<&str> {
        self.resources.get(key).map(String::as_str)
    }

    fn item(&self, key: &str, index: usize) -> Option<&str> {
        self.resource(key)?.split('|').nth(index)
    }

    /// Month name for a 0-based month index.
    pub(crate) fn month(&self, month0: u32, short: bool) -> Option<&str> {
        let key = if short { "short_months" } else { "months" };
        self.item(key, month0 as usize)
    }

    pub(crate) fn weekday(&self, weekday: Weekday, short: bool) -> Option<&str> {
        let key = if short { "short_weeks" } else { "weeks" };
        self.item(key, weekday.num_days_from_sunday() as usize)
    }

    pub(crate) fn season(&self, season: Season) -> Option<&str> {
        self.item("seasons", season as usize)
    }

    pub(crate) fn constellation(&self, constellation: Constellation) -> Option<&str> {
        self.item("constellations", constellation as usize)
    }

    /// Ordinal suffix for a day of month. English-like rules: 1st, 2nd, 3rd, everything else
    /// (including 11th to 13th) takes the fourth item.
    pub(crate) fn ordinal_suffix(&self, day: u32) -> &str {
        let index = match day % 10 {
            1 if day % 100 != 11 => 0,
            2 if day % 100 != 12 => 1,
            3 if day % 100 != 13 => 2,
            _ => 3,
        };
        self.item("ordinals", index).unwrap_or_default()
    }

    /// Translates a count of `unit` (`year`, `month`, ..., `second`, or `now`) with plural
    /// selection. A negative count keeps its sign, even for entries without a `%d`.
    pub(crate) fn translate(&self, unit: &str, value: i64) -> String {
        let Some(resource) = self.resource(unit) else {
            tracing::debug!(locale = %self.locale, unit, "no resource for unit");
            return String::new();
        };
        let items: Vec<&str> = resource.split('|').collect();
        let number = value.unsigned_abs();
        let count = value.to_string();

        if items.len() == 1 {
            return items[0].replacen("%d", &count, 1);
        }
        let item = match usize::try_from(number) {
            Ok(n) if n >= 1 && n < items.len() => items[n - 1],
            _ => items[items.len() - 1],
        };
        if !item.contains("%d") && value < 0 {
            return format!("-{item}");
        }
        item.replacen("%d", &count, 1)
    }

    /// Wraps an already translated phrase with a directional entry like `ago`.
    pub(crate) fn direction(&self, key: &str, phrase: &str) -> String {
        self.resource(key)
            .map(|resource| resource.replacen("%s", phrase, 1))
            .unwrap_or_default()
    }
}

impl Default for Language {
    fn default() -> Self {
        let resources = TABLES.get_or_insert_with(DEFAULT_LOCALE, |_| {
            Arc::new(
                EN.iter()
                    .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                    .collect(),
            )
        });
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            resources,
        }
    }
}
