//! Calendar labels for forecast entries.
//!
//! English and Turkish go through chrono's locale data. Azerbaijani is always
//! rendered from a fixed table, independent of what the locale data offers.

use chrono::{DateTime, Datelike, Local, Locale as ChronoLocale, TimeZone};
use std::fmt::Display;

use crate::i18n::Locale;

/// Indexed by `month0()`.
const AZ_MONTHS: [&str; 12] = [
    "yanvar",
    "fevral",
    "mart",
    "aprel",
    "may",
    "iyun",
    "iyul",
    "avqust",
    "sentyabr",
    "oktyabr",
    "noyabr",
    "dekabr",
];

/// Indexed by `num_days_from_sunday()`: 0 is Sunday.
const AZ_WEEKDAYS: [&str; 7] = [
    "bazar",
    "bazar ertəsi",
    "çərşənbə axşamı",
    "çərşənbə",
    "cümə axşamı",
    "cümə",
    "şənbə",
];

/// `"<day> <month>, <weekday>"` from the Azerbaijani tables.
pub fn az_label(day: u32, month0: u32, weekday_from_sunday: u32) -> Option<String> {
    let month = AZ_MONTHS.get(month0 as usize)?;
    let weekday = AZ_WEEKDAYS.get(weekday_from_sunday as usize)?;
    Some(format!("{day} {month}, {weekday}"))
}

/// Long weekday, day and long month in the machine's local timezone.
pub fn format_local_date(timestamp: i64, locale: Locale) -> Option<String> {
    format_date_in(timestamp, locale, &Local)
}

/// Same as [`format_local_date`] but for an explicit timezone.
/// Returns `None` when the timestamp is outside chrono's range.
pub fn format_date_in<Tz>(timestamp: i64, locale: Locale, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = to_zoned(timestamp, tz)?;

    let label = match locale {
        Locale::En => local.format_localized("%A, %B %-d", ChronoLocale::en_US).to_string(),
        Locale::Tr => local.format_localized("%-d %B %A", ChronoLocale::tr_TR).to_string(),
        Locale::Az => az_label(
            local.day(),
            local.month0(),
            local.weekday().num_days_from_sunday(),
        )?,
    };

    Some(label)
}

/// `HH:MM`, 24-hour clock.
pub fn format_time<Tz>(timestamp: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    to_zoned(timestamp, tz).map(|local| local.format("%H:%M").to_string())
}

pub(crate) fn to_zoned<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz))
}
