// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) of block UI strings.
//!
//! Control labels (play/pause) are translated with Fluent. Translation files
//! are embedded from `assets/i18n/*.ftl`, one per locale.
//!
//! # Locale selection
//!
//! 1. The explicitly requested tag (e.g. the page locale)
//! 2. The OS locale
//! 3. `en-US`
//!
//! A tag matches a bundle exactly or by language (`de-AT` uses `de`).

use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

use crate::config::DEFAULT_IETF;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None)
    }
}

impl I18n {
    pub fn new(requested: Option<&str>) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale) = filename
                .strip_suffix(".ftl")
                .and_then(|tag| tag.parse::<LanguageIdentifier>().ok())
            else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((_, errors)) => {
                    log::warn!("skipping {filename}: {} parse errors", errors.len());
                    continue;
                }
            };
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            if bundle.add_resource(resource).is_err() {
                log::warn!("skipping {filename}: duplicate messages");
                continue;
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let default_locale = DEFAULT_IETF
            .parse()
            .unwrap_or_else(|_| LanguageIdentifier::default());
        let current_locale = resolve_locale(requested, &available_locales).unwrap_or(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Translates `key`, or `None` when the current bundle lacks it.
    pub fn try_tr(&self, key: &str) -> Option<String> {
        let bundle = self.bundles.get(&self.current_locale)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, None, &mut errors);
        errors.is_empty().then(|| value.to_string())
    }

    pub fn tr(&self, key: &str) -> String {
        self.try_tr(key)
            .unwrap_or_else(|| format!("MISSING: {}", key))
    }
}

fn match_available(tag: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = tag.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    available
        .iter()
        .find(|candidate| candidate.language == lang.language)
        .cloned()
}

fn resolve_locale(requested: Option<&str>, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    // 1. Explicit request
    if let Some(lang) = requested.and_then(|tag| match_available(tag, available)) {
        return Some(lang);
    }

    // 2. OS locale
    sys_locale::get_locale().and_then(|tag| match_available(&tag, available))
}
