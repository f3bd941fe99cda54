// SPDX-License-Identifier: MPL-2.0
//! Locale table types.
//!
//! A site publishes one section per locale under a URL path segment (the
//! entry key). Each entry records the canonical language tag for that section.

use serde::{Deserialize, Serialize};

/// One row of the site locale table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleEntry {
    /// URL path segment, e.g. `de` or `ca_fr`. Empty for the root site.
    #[serde(default)]
    pub key: String,
    /// Canonical language tag, e.g. `de-DE`.
    pub ietf: String,
}

impl LocaleEntry {
    pub fn new(key: impl Into<String>, ietf: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ietf: ietf.into(),
        }
    }

    /// URL prefix for this entry: `"<key>/"`, or empty for the root site.
    #[must_use]
    pub fn prefix(&self) -> String {
        if self.key.is_empty() {
            String::new()
        } else {
            format!("{}/", self.key)
        }
    }
}

/// Ordered locale table.
///
/// Order is significant: lookups return the first matching entry, so the
/// table keeps the order of its source configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    #[serde(default, rename = "locale")]
    entries: Vec<LocaleEntry>,
}

impl LocaleTable {
    #[must_use]
    pub fn new(entries: Vec<LocaleEntry>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LocaleEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }
}

impl FromIterator<LocaleEntry> for LocaleTable {
    fn from_iter<I: IntoIterator<Item = LocaleEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Result of a locale lookup.
///
/// `ietf` is never empty after resolution. `prefix` is empty for the default
/// locale or when the table has no matching entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocale {
    pub ietf: String,
    pub prefix: String,
}

impl ResolvedLocale {
    pub fn new(ietf: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            ietf: ietf.into(),
            prefix: prefix.into(),
        }
    }

    /// Resolution for a matched table entry.
    #[must_use]
    pub fn from_entry(entry: &LocaleEntry) -> Self {
        Self::new(entry.ietf.clone(), entry.prefix())
    }
}
