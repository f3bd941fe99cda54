// SPDX-License-Identifier: MPL-2.0
//! Campaign date placeholders in promo terms text.
//!
//! Terms copy may reference the campaign window with `{{campaignStart}}`
//! style tokens. Values come from the page query and are rendered as dates
//! in the resolved locale's short format.

use chrono::{DateTime, NaiveDate};
use unic_langid::LanguageIdentifier;

use crate::domain::offer::QueryParams;

/// A query parameter and the token spellings it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub param: &'static str,
    /// Parameter consulted when `param` is absent.
    pub alias: &'static str,
    pub tokens: [&'static str; 4],
}

pub const PLACEHOLDERS: [Placeholder; 2] = [
    Placeholder {
        param: "campaignStart",
        alias: "startDate",
        tokens: [
            "{{campaignStart}}",
            "{{startDate}}",
            "{{ campaignStart }}",
            "{{ startDate }}",
        ],
    },
    Placeholder {
        param: "campaignEnd",
        alias: "endDate",
        tokens: [
            "{{campaignEnd}}",
            "{{endDate}}",
            "{{ campaignEnd }}",
            "{{ endDate }}",
        ],
    },
];

/// Replaces every campaign token whose parameter is present.
///
/// Tokens without a value are left in place.
#[must_use]
pub fn replace_placeholder_text(
    text: &str,
    params: &QueryParams,
    locale: Option<&LanguageIdentifier>,
) -> String {
    let mut text = text.to_owned();
    for placeholder in &PLACEHOLDERS {
        let Some(value) = params
            .get(placeholder.param)
            .or_else(|| params.get(placeholder.alias))
        else {
            continue;
        };
        let formatted = format_locale_date(value, locale);
        for token in placeholder.tokens {
            if text.contains(token) {
                text = text.replace(token, &formatted);
            }
        }
    }
    text
}

// =============================================================================
// Date formatting
// =============================================================================

/// Short numeric date layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateStyle {
    /// `1/15/2024`
    MonthDayYear,
    /// `15/01/2024`
    DaySlashPadded,
    /// `15/1/2024`
    DaySlash,
    /// `15.1.2024`
    DayDot,
    /// `15.01.2024`
    DayDotPadded,
    /// `15. 1. 2024`
    DayDotSpaced,
    /// `15-1-2024`
    DayDash,
    /// `2024/1/15`
    YearSlash,
    /// `2024. 1. 15.`
    YearDotSpaced,
    /// `2024. 01. 15.`
    YearDotPadded,
    /// `2024-01-15`
    Iso,
}

impl DateStyle {
    fn for_locale(locale: Option<&LanguageIdentifier>) -> Self {
        let Some(locale) = locale else {
            return Self::MonthDayYear;
        };
        let region = locale.region.as_ref().map(|r| r.as_str());
        match (locale.language.as_str(), region) {
            ("en", None | Some("US")) | ("fil", _) => Self::MonthDayYear,
            ("en" | "fr", Some("CA")) | ("sv" | "lt", _) => Self::Iso,
            ("de" | "fi" | "no" | "nb" | "nn" | "da", _) => Self::DayDot,
            ("ru" | "uk" | "pl" | "tr" | "ro" | "bg" | "et" | "lv", _) => Self::DayDotPadded,
            ("cs" | "sk" | "sl", _) => Self::DayDotSpaced,
            ("nl", _) => Self::DayDash,
            ("ja" | "zh", _) => Self::YearSlash,
            ("ko", _) => Self::YearDotSpaced,
            ("hu", _) => Self::YearDotPadded,
            ("hi" | "vi" | "el" | "id" | "ms" | "th" | "he" | "ar", _) => Self::DaySlash,
            _ => Self::DaySlashPadded,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::MonthDayYear => "%-m/%-d/%Y",
            Self::DaySlashPadded => "%d/%m/%Y",
            Self::DaySlash => "%-d/%-m/%Y",
            Self::DayDot => "%-d.%-m.%Y",
            Self::DayDotPadded => "%d.%m.%Y",
            Self::DayDotSpaced => "%-d. %-m. %Y",
            Self::DayDash => "%-d-%-m-%Y",
            Self::YearSlash => "%Y/%-m/%-d",
            Self::YearDotSpaced => "%Y. %-m. %-d.",
            Self::YearDotPadded => "%Y. %m. %d.",
            Self::Iso => "%Y-%m-%d",
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Formats a query date for a locale. Unparseable values are returned as-is.
#[must_use]
pub fn format_locale_date(value: &str, locale: Option<&LanguageIdentifier>) -> String {
    match parse_date(value.trim()) {
        Some(date) => date
            .format(DateStyle::for_locale(locale).pattern())
            .to_string(),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().expect("valid tag")
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn formats_by_locale() {
        let cases = [
            ("en-US", "1/15/2024"),
            ("de-DE", "15.1.2024"),
            ("en-GB", "15/01/2024"),
            ("fr-FR", "15/01/2024"),
            ("es-419", "15/01/2024"),
            ("it-IT", "15/01/2024"),
            ("ja-JP", "2024/1/15"),
            ("zh-Hans-CN", "2024/1/15"),
            ("ko-KR", "2024. 1. 15."),
            ("nl-NL", "15-1-2024"),
            ("ru-RU", "15.01.2024"),
            ("cs-CZ", "15. 1. 2024"),
            ("hu-HU", "2024. 01. 15."),
            ("sv-SE", "2024-01-15"),
            ("fr-CA", "2024-01-15"),
        ];
        for (tag, expected) in cases {
            assert_eq!(
                format_locale_date("2024-01-15", Some(&lang(tag))),
                expected,
                "locale {tag}"
            );
        }
    }

    #[test]
    fn missing_locale_formats_as_en_us() {
        assert_eq!(format_locale_date("2024-12-01", None), "12/1/2024");
    }

    #[test]
    fn rfc3339_keeps_calendar_date() {
        assert_eq!(
            format_locale_date("2024-03-05T23:30:00-08:00", Some(&lang("de"))),
            "5.3.2024"
        );
    }

    #[test]
    fn unparseable_value_is_used_verbatim() {
        assert_eq!(format_locale_date("next spring", Some(&lang("de"))), "next spring");
    }

    #[test]
    fn replaces_all_token_spellings() {
        let text = "From {{campaignStart}} / {{ startDate }} until {{campaignEnd}} or {{ endDate }}.";
        let params = params(&[("campaignStart", "2024-01-15"), ("campaignEnd", "2024-02-29")]);
        assert_eq!(
            replace_placeholder_text(text, &params, Some(&lang("en-US"))),
            "From 1/15/2024 / 1/15/2024 until 2/29/2024 or 2/29/2024."
        );
    }

    #[test]
    fn aliases_apply_when_primary_param_absent() {
        let params = params(&[("startDate", "2024-01-15"), ("campaignEnd", "")]);
        assert_eq!(
            replace_placeholder_text("{{startDate}}-{{campaignEnd}}", &params, Some(&lang("de"))),
            "15.1.2024-{{campaignEnd}}"
        );
    }

    #[test]
    fn text_without_params_is_unchanged() {
        let text = "Offer ends {{ campaignEnd }}.";
        assert_eq!(replace_placeholder_text(text, &QueryParams::default(), None), text);
    }
}
