// SPDX-License-Identifier: MPL-2.0
//! Locale resolution for page parameters.
//!
//! Pages receive locales as `lang_COUNTRY` (e.g. `de_DE`). Resolution maps
//! them onto the site locale table to find the canonical language tag and
//! the URL prefix of the matching site section.
//!
//! Resolution never fails: unknown locales are echoed back in IETF form
//! with an empty prefix.

use std::path::Path;
use std::sync::Arc;

use unic_langid::LanguageIdentifier;

use crate::config::{self, LocaleConfig, DEFAULT_IETF};
use crate::domain::locale::{LocaleEntry, LocaleTable, ResolvedLocale};
use crate::error::{Error, Result};

const LOCALES_FILE: &str = "locales.toml";

// =============================================================================
// Match rules
// =============================================================================

/// Lookup rules, tried in order against the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchRule {
    /// The entry tag equals the full input tag.
    ExactTag,
    /// The entry tag equals the input's language subtag (`he` for `he-IL`).
    LanguageOnly,
}

const MATCH_RULES: [MatchRule; 2] = [MatchRule::ExactTag, MatchRule::LanguageOnly];

impl MatchRule {
    fn matches(self, entry: &LocaleEntry, tag: &str) -> bool {
        let wanted = match self {
            MatchRule::ExactTag => tag,
            MatchRule::LanguageOnly => tag.split('-').next().unwrap_or(tag),
        };
        entry.ietf.eq_ignore_ascii_case(wanted)
    }
}

/// Converts `lang_COUNTRY` to `lang-COUNTRY`, preserving case.
#[must_use]
pub fn normalize_tag(locale_param: &str) -> String {
    locale_param.replacen('_', "-", 1)
}

/// Resolves a locale parameter against a locale table.
///
/// - No parameter: the configured default, or `en-US` at the root.
/// - No table: the normalized input with an empty prefix.
/// - Otherwise the first entry matching the full tag, then the first entry
///   matching the language subtag; the input is echoed when neither matches.
#[must_use]
pub fn resolve_locale(
    locale_param: Option<&str>,
    table: Option<&LocaleTable>,
    default: Option<&ResolvedLocale>,
) -> ResolvedLocale {
    let Some(param) = locale_param.filter(|p| !p.is_empty()) else {
        return default
            .cloned()
            .unwrap_or_else(|| ResolvedLocale::new(DEFAULT_IETF, ""));
    };

    let tag = normalize_tag(param);
    let Some(table) = table else {
        return ResolvedLocale::new(tag, "");
    };

    MATCH_RULES
        .iter()
        .find_map(|rule| table.iter().find(|entry| rule.matches(entry, &tag)))
        .map(ResolvedLocale::from_entry)
        .unwrap_or_else(|| ResolvedLocale::new(tag, ""))
}

/// Parses a resolved tag for formatting and translation lookups.
#[must_use]
pub fn language_identifier(locale: &ResolvedLocale) -> Option<LanguageIdentifier> {
    locale.ietf.parse().ok()
}

// =============================================================================
// Table loading
// =============================================================================

/// Returns the locale table embedded in the binary.
pub fn embedded_table() -> Result<LocaleTable> {
    let content = config::embedded_file(LOCALES_FILE)
        .ok_or_else(|| Error::Config(format!("embedded {LOCALES_FILE} is missing")))?;
    Ok(toml::from_str(&content)?)
}

/// Reads a locale table from a TOML file of `[[locale]]` entries.
pub fn load_table(path: &Path) -> Result<LocaleTable> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

// =============================================================================
// LocaleResolver
// =============================================================================

/// Locale table plus the configured default, shared read-only between
/// block instances.
#[derive(Debug, Clone, Default)]
pub struct LocaleResolver {
    table: Option<Arc<LocaleTable>>,
    default: Option<ResolvedLocale>,
}

impl LocaleResolver {
    #[must_use]
    pub fn new(table: Option<Arc<LocaleTable>>, default: Option<ResolvedLocale>) -> Self {
        Self { table, default }
    }

    /// Builds a resolver from the embedded table and the configured default.
    pub fn from_config(locale: &LocaleConfig) -> Result<Self> {
        Ok(Self::new(
            Some(Arc::new(embedded_table()?)),
            Some(ResolvedLocale::new(
                locale.default_ietf.clone(),
                locale.default_prefix.clone(),
            )),
        ))
    }

    #[must_use]
    pub fn resolve(&self, locale_param: Option<&str>) -> ResolvedLocale {
        resolve_locale(locale_param, self.table.as_deref(), self.default.as_ref())
    }

    #[must_use]
    pub fn table(&self) -> Option<&LocaleTable> {
        self.table.as_deref()
    }
}
