// SPDX-License-Identifier: MPL-2.0
//! Page query parsing and offers API request URLs.

use reqwest::Url;

use crate::config::OffersConfig;
use crate::domain::offer::{Environment, OfferQuery, QueryParams};

/// Base used only to let `Url` decode a bare query string.
const QUERY_BASE: &str = "https://localhost/";

/// Parses a page search string (`?a=1&b=2`, leading `?` optional).
#[must_use]
pub fn parse_query(search: &str) -> OfferQuery {
    let query = search.strip_prefix('?').unwrap_or(search);
    let pairs = Url::parse(QUERY_BASE)
        .map(|mut url| {
            url.set_query(Some(query));
            url.query_pairs().into_owned().collect()
        })
        .unwrap_or_default();

    let search = if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    };
    OfferQuery::new(search, QueryParams::new(pairs))
}

/// Builds the offers API URL for a query.
///
/// The page search string is passed through as-is; `api_key` and
/// `service_providers` are appended only when the page did not supply them.
/// Returns `None` when the query names neither an offer nor a selector.
#[must_use]
pub fn build_request_url(query: &OfferQuery, env: Environment, offers: &OffersConfig) -> Option<String> {
    let mut url = match (query.selector_ids(), env) {
        (Some(_), Environment::Production) => offers.selector_api_base.clone(),
        (Some(_), Environment::Stage) => offers.stage_selector_api_base.clone(),
        (None, env) => {
            let offer_id = query.offer_id()?;
            let base = match env {
                Environment::Production => &offers.offer_api_base,
                Environment::Stage => &offers.stage_offer_api_base,
            };
            format!("{base}{offer_id}")
        }
    };
    url.push_str(&query.search);

    if query.api_key().is_none() {
        push_param(&mut url, "api_key", &offers.api_key);
    }
    if query.service_providers().is_none() {
        push_param(&mut url, "service_providers", &offers.service_providers);
    }
    Some(url)
}

fn push_param(url: &mut String, key: &str, value: &str) {
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(key);
    url.push('=');
    url.push_str(value);
}
