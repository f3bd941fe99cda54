// SPDX-License-Identifier: MPL-2.0
//! Offers API types: the page query, the offer payload and the static
//! fallback routes for offers without promo terms.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder in a fallback URL template replaced by the locale prefix.
pub const PREFIX_TOKEN: &str = "{{prefix}}";

// =============================================================================
// Environment
// =============================================================================

/// Offers API environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Stage,
}

impl Environment {
    /// Resolves the environment from the `env` parameter, or from the page
    /// hostname when the parameter is absent.
    ///
    /// Only `stage` selects stage explicitly; any other explicit value means
    /// production.
    #[must_use]
    pub fn resolve(env_param: Option<&str>, hostname: &str, production_hostname: &str) -> Self {
        match env_param {
            Some("stage") => Self::Stage,
            Some(_) => Self::Production,
            None if hostname == production_hostname => Self::Production,
            None => Self::Stage,
        }
    }

    #[must_use]
    pub fn is_stage(self) -> bool {
        matches!(self, Self::Stage)
    }
}

// =============================================================================
// OfferQuery
// =============================================================================

/// Page query parameters in their original order.
///
/// Lookups return the first value, and empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Returns the first non-empty value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Offer lookup request derived from the page query string.
///
/// When `selector_ids` is present the selector-search endpoint is used,
/// otherwise the single-offer endpoint keyed by `offer_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferQuery {
    /// The page search string as received (with or without the leading `?`).
    pub search: String,
    pub params: QueryParams,
}

impl OfferQuery {
    #[must_use]
    pub fn new(search: impl Into<String>, params: QueryParams) -> Self {
        Self {
            search: search.into(),
            params,
        }
    }

    #[must_use]
    pub fn offer_id(&self) -> Option<&str> {
        self.params.get("offer_id")
    }

    #[must_use]
    pub fn selector_ids(&self) -> Option<&str> {
        self.params.get("offer_selector_ids")
    }

    /// Locale in `lang_COUNTRY` form.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.params.get("locale")
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.params.get("api_key")
    }

    #[must_use]
    pub fn service_providers(&self) -> Option<&str> {
        self.params.get("service_providers")
    }

    #[must_use]
    pub fn env(&self) -> Option<&str> {
        self.params.get("env")
    }
}

// =============================================================================
// Offer payload
// =============================================================================

/// Legal copy attached to an offer. Either field may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoTerms {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl PromoTerms {
    /// Returns header and text when both are present and non-empty.
    #[must_use]
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (self.header.as_deref(), self.text.as_deref()) {
            (Some(header), Some(text)) if !header.is_empty() && !text.is_empty() => {
                Some((header, text))
            }
            _ => None,
        }
    }
}

/// One offer returned by the offers API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default)]
    pub promo_terms: Option<PromoTerms>,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub customer_segment: Option<String>,
    #[serde(default)]
    pub market_segments: Vec<String>,
}

impl Offer {
    #[must_use]
    pub fn market_segment(&self) -> Option<&str> {
        self.market_segments.first().map(String::as_str)
    }
}

// =============================================================================
// FallbackRoutes
// =============================================================================

/// Static terms pages keyed by product code, customer segment and market
/// segment. Templates may contain [`PREFIX_TOKEN`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackRoutes(HashMap<String, HashMap<String, HashMap<String, String>>>);

impl FallbackRoutes {
    pub fn insert(
        &mut self,
        product_code: impl Into<String>,
        customer_segment: impl Into<String>,
        market_segment: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.0
            .entry(product_code.into())
            .or_default()
            .entry(customer_segment.into())
            .or_default()
            .insert(market_segment.into(), template.into());
    }

    #[must_use]
    pub fn lookup(&self, product_code: &str, customer_segment: &str, market_segment: &str) -> Option<&str> {
        self.0
            .get(product_code)?
            .get(customer_segment)?
            .get(market_segment)
            .map(String::as_str)
    }

    /// Fallback URL for an offer, with the locale prefix substituted.
    ///
    /// Templates without the prefix token are single-locale pages and are
    /// not used as fallbacks.
    #[must_use]
    pub fn route_for(&self, offer: &Offer, prefix: &str) -> Option<String> {
        let template = self.lookup(
            offer.product_code.as_deref()?,
            offer.customer_segment.as_deref()?,
            offer.market_segment()?,
        )?;
        template
            .contains(PREFIX_TOKEN)
            .then(|| template.replacen(PREFIX_TOKEN, prefix, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> FallbackRoutes {
        let mut routes = FallbackRoutes::default();
        routes.insert(
            "CCSN",
            "INDIVIDUAL",
            "EDU",
            "https://www.adobe.com/{{prefix}}offer-terms/ccm-ste-introductory.html",
        );
        routes.insert(
            "STKS",
            "INDIVIDUAL",
            "COM",
            "https://www.adobe.com/products/special-offers/stock-cci-terms.html",
        );
        routes
    }

    fn offer(product: &str, customer: &str, market: &str) -> Offer {
        Offer {
            promo_terms: None,
            product_code: Some(product.into()),
            customer_segment: Some(customer.into()),
            market_segments: vec![market.into()],
        }
    }

    #[test]
    fn environment_from_param_and_hostname() {
        let prod = "www.adobe.com";
        assert_eq!(Environment::resolve(Some("stage"), prod, prod), Environment::Stage);
        assert_eq!(
            Environment::resolve(Some("prod"), "localhost", prod),
            Environment::Production
        );
        assert_eq!(Environment::resolve(None, prod, prod), Environment::Production);
        assert_eq!(Environment::resolve(None, "main--cc.hlx.page", prod), Environment::Stage);
    }

    #[test]
    fn query_params_first_non_empty_value() {
        let params = QueryParams::new(vec![
            ("locale".into(), String::new()),
            ("offer_id".into(), "ABC".into()),
            ("offer_id".into(), "DEF".into()),
        ]);
        assert_eq!(params.get("offer_id"), Some("ABC"));
        assert_eq!(params.get("locale"), None);
        assert!(!params.contains("api_key"));
    }

    #[test]
    fn promo_terms_requires_header_and_text() {
        let full = PromoTerms {
            header: Some("Terms".into()),
            text: Some("Body".into()),
        };
        let missing_text = PromoTerms {
            header: Some("Terms".into()),
            text: None,
        };
        assert_eq!(full.complete(), Some(("Terms", "Body")));
        assert_eq!(missing_text.complete(), None);
    }

    #[test]
    fn route_substitutes_prefix() {
        let url = routes().route_for(&offer("CCSN", "INDIVIDUAL", "EDU"), "de/");
        assert_eq!(
            url.as_deref(),
            Some("https://www.adobe.com/de/offer-terms/ccm-ste-introductory.html")
        );
    }

    #[test]
    fn route_without_prefix_token_is_ignored() {
        assert_eq!(routes().route_for(&offer("STKS", "INDIVIDUAL", "COM"), "de/"), None);
    }

    #[test]
    fn route_for_unknown_segments_is_none() {
        assert_eq!(routes().route_for(&offer("CCSN", "TEAM", "EDU"), ""), None);
        let mut no_market = offer("CCSN", "INDIVIDUAL", "EDU");
        no_market.market_segments.clear();
        assert_eq!(routes().route_for(&no_market, ""), None);
    }

    #[test]
    fn offer_deserializes_with_missing_fields() {
        let offers: Vec<Offer> = serde_json::from_str(
            r#"[{"product_code":"CCSN","market_segments":["EDU"],"offer_id":"X"}]"#,
        )
        .expect("payload should parse");
        assert_eq!(offers[0].market_segment(), Some("EDU"));
        assert!(offers[0].promo_terms.is_none());
        assert!(offers[0].customer_segment.is_none());
    }
}
