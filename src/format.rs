//! Display helpers for the detail view.

use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::models::parse_timestamp;

/// Language of long-form dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    #[default]
    En,
    Ru,
}

impl std::str::FromStr for DateLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "ru" | "ru-ru" => Ok(Self::Ru),
            other => Err(format!("Unsupported date locale: {}", other)),
        }
    }
}

impl DateLocale {
    fn chrono_locale(self) -> Locale {
        match self {
            DateLocale::En => Locale::en_US,
            DateLocale::Ru => Locale::ru_RU,
        }
    }

    /// Day-month-year pattern; `%B` is the genitive month name in `ru_RU`
    fn long_pattern(self) -> &'static str {
        match self {
            DateLocale::En => "%B %-d, %Y",
            DateLocale::Ru => "%-d %B %Y г.",
        }
    }
}

/// Long-form creation date, e.g. `October 25, 2025` / `25 октября 2025 г.`
pub fn format_long_date(created_at: &str, locale: DateLocale) -> Option<String> {
    let date = parse_timestamp(created_at)?.date_naive();
    Some(
        date.format_localized(locale.long_pattern(), locale.chrono_locale())
            .to_string(),
    )
}

/// External link for a Telegram handle
pub fn telegram_link(handle: &str) -> Option<String> {
    let handle = handle.trim();
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    if handle.is_empty() {
        None
    } else {
        Some(format!("https://t.me/{}", handle))
    }
}
