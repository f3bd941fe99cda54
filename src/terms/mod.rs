// SPDX-License-Identifier: MPL-2.0
//! Universal promo terms block.
//!
//! The page query names an offer (or an offer selector). The offer is
//! fetched from the offers API and its promo terms rendered into the block,
//! with campaign dates filled in. Offers without terms may redirect to a
//! static terms page; anything else is a not-found.
//!
//! Every failure collapses into [`TermsOutcome::NotFound`]. The reason is
//! recorded through diagnostics, never surfaced to the visitor.

mod placeholder;
mod policy;
mod request;
mod transport;

pub use placeholder::{format_locale_date, replace_placeholder_text, Placeholder, PLACEHOLDERS};
pub use policy::{apply_action, PageAction, TermsHost};
pub use request::{build_request_url, parse_query};
pub use transport::{HttpTransport, OffersTransport, TransportResponse};

use crate::config::{OffersConfig, SiteConfig};
use crate::diagnostics::{BlockTag, DiagnosticsHandle, ErrorType, WarningType};
use crate::domain::locale::ResolvedLocale;
use crate::domain::offer::{Environment, FallbackRoutes, Offer, OfferQuery};
use crate::locale::{language_identifier, LocaleResolver};

const TAG: BlockTag = BlockTag::UniversalPromoTerms;

/// Result of one terms lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermsOutcome {
    /// Rendered terms container.
    Html(String),
    /// Static terms page for offers without promo terms.
    Redirect(String),
    NotFound,
}

/// Wraps terms in the block container, after the block's existing markup.
#[must_use]
pub fn render_terms_html(existing_html: &str, header: &str, text: &str) -> String {
    format!("<div class=\"container\">{existing_html}<h1>{header}</h1><p>{text}</p></div>")
}

/// Fetches promo terms for one block.
pub struct TermsFetcher<T> {
    transport: T,
    offers: OffersConfig,
    routes: FallbackRoutes,
    resolver: LocaleResolver,
    diagnostics: DiagnosticsHandle,
}

impl<T: OffersTransport> TermsFetcher<T> {
    #[must_use]
    pub fn new(
        transport: T,
        offers: OffersConfig,
        routes: FallbackRoutes,
        resolver: LocaleResolver,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        Self {
            transport,
            offers,
            routes,
            resolver,
            diagnostics,
        }
    }

    /// Builds a fetcher from the site configuration.
    #[must_use]
    pub fn from_config(
        transport: T,
        config: &SiteConfig,
        resolver: LocaleResolver,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        Self::new(
            transport,
            config.offers.clone(),
            config.fallback_routes.clone(),
            resolver,
            diagnostics,
        )
    }

    /// Looks up the terms for `query`. Issues at most one request.
    pub async fn fetch_terms(
        &self,
        query: &OfferQuery,
        env: Environment,
        existing_html: &str,
    ) -> TermsOutcome {
        let Some(url) = build_request_url(query, env, &self.offers) else {
            self.diagnostics.log_warning(
                TAG,
                WarningType::ConfigurationIssue,
                "query has neither offer_id nor offer_selector_ids",
            );
            return TermsOutcome::NotFound;
        };

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(err) => {
                self.diagnostics.log_warning(
                    TAG,
                    WarningType::NetworkError,
                    format!("request to {url} failed: {err}"),
                );
                return TermsOutcome::NotFound;
            }
        };
        if !response.is_success() {
            self.diagnostics.log_warning(
                TAG,
                WarningType::NetworkError,
                format!("request to {url} returned HTTP {}", response.status),
            );
            return TermsOutcome::NotFound;
        }

        let offers: Vec<Offer> = match serde_json::from_str(&response.body) {
            Ok(offers) => offers,
            Err(err) => {
                self.diagnostics.log_error(
                    TAG,
                    ErrorType::PayloadError,
                    format!("offers payload is not an offer array: {err}"),
                );
                return TermsOutcome::NotFound;
            }
        };

        let locale = self.resolver.resolve(query.locale());
        let outcome = match offers.into_iter().next() {
            Some(offer) => self.outcome_for(&offer, query, &locale, existing_html),
            None => TermsOutcome::NotFound,
        };
        self.record(&outcome);
        outcome
    }

    fn outcome_for(
        &self,
        offer: &Offer,
        query: &OfferQuery,
        locale: &ResolvedLocale,
        existing_html: &str,
    ) -> TermsOutcome {
        let Some(terms) = offer.promo_terms.as_ref() else {
            return self
                .routes
                .route_for(offer, &locale.prefix)
                .map_or(TermsOutcome::NotFound, TermsOutcome::Redirect);
        };
        let Some((header, text)) = terms.complete() else {
            return TermsOutcome::NotFound;
        };

        let lang = language_identifier(locale);
        let text = replace_placeholder_text(text, &query.params, lang.as_ref());
        TermsOutcome::Html(render_terms_html(existing_html, header, &text))
    }

    fn record(&self, outcome: &TermsOutcome) {
        match outcome {
            TermsOutcome::Html(_) => self.diagnostics.log_state(TAG, "terms rendered"),
            TermsOutcome::Redirect(url) => self
                .diagnostics
                .log_state(TAG, format!("redirecting to {url}")),
            TermsOutcome::NotFound => self.diagnostics.log_warning(
                TAG,
                WarningType::MissingContent,
                "offer has no usable promo terms",
            ),
        }
    }
}

/// Runs the terms block on a page: resolves the environment, fetches the
/// terms, and applies the resulting action to the host.
pub async fn init<T, H>(fetcher: &TermsFetcher<T>, host: &mut H, search: &str) -> PageAction
where
    T: OffersTransport,
    H: TermsHost,
{
    let query = parse_query(search);
    let env = Environment::resolve(
        query.env(),
        host.hostname(),
        &fetcher.offers.production_hostname,
    );
    let existing_html = host.inner_html();
    let outcome = fetcher.fetch_terms(&query, env, &existing_html).await;

    let action = PageAction::for_outcome(outcome, env, &fetcher.offers.not_found_path);
    apply_action(&action, host);
    action
}
