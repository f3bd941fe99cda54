// SPDX-License-Identifier: MPL-2.0
//! Promo terms block end to end, with the offers API replaced by fixtures.

use std::sync::Mutex;

use cc_blocks::config::{self, SiteConfig};
use cc_blocks::diagnostics::{BlockTag, DiagnosticsCollector, DiagnosticsHandle};
use cc_blocks::error::{Error, Result};
use cc_blocks::locale::LocaleResolver;
use cc_blocks::terms::{self, OffersTransport, PageAction, TermsFetcher, TermsHost, TransportResponse};

const DE_OFFER: &str = r#"[{
    "offer_id": "1B365A793986BBEEE26F3E372BDAAB09",
    "product_code": "PHSP",
    "customer_segment": "INDIVIDUAL",
    "market_segments": ["COM"],
    "promo_terms": {
        "header": "Angebotsbedingungen",
        "text": "Gültig vom {{ campaignStart }} bis {{campaignEnd}}."
    }
}]"#;

const EDU_OFFER_WITHOUT_TERMS: &str = r#"[{
    "product_code": "CCSN",
    "customer_segment": "INDIVIDUAL",
    "market_segments": ["EDU"]
}]"#;

struct FixtureTransport {
    status: u16,
    body: &'static str,
    urls: Mutex<Vec<String>>,
}

impl FixtureTransport {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            urls: Mutex::new(Vec::new()),
        }
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl OffersTransport for &FixtureTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse> {
        self.urls.lock().unwrap().push(url.to_owned());
        if self.status == 0 {
            return Err(Error::Network("connection reset".into()));
        }
        Ok(TransportResponse::new(self.status, self.body))
    }
}

#[derive(Default)]
struct FakePage {
    hostname: String,
    existing: String,
    navigated_to: Option<String>,
    children: Option<String>,
}

impl FakePage {
    fn on(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_owned(),
            ..Self::default()
        }
    }
}

impl TermsHost for FakePage {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn inner_html(&self) -> String {
        self.existing.clone()
    }

    fn navigate(&mut self, url: &str) {
        self.navigated_to = Some(url.to_owned());
    }

    fn sanitize(&self, html: &str) -> String {
        html.replace("onerror", "")
    }

    fn replace_children(&mut self, html: String) {
        self.children = Some(html);
    }
}

fn site() -> SiteConfig {
    config::embedded().expect("embedded config")
}

fn fetcher<'a>(
    transport: &'a FixtureTransport,
    diagnostics: DiagnosticsHandle,
) -> TermsFetcher<&'a FixtureTransport> {
    let site = site();
    let resolver = LocaleResolver::from_config(&site.locale).expect("embedded locale table");
    TermsFetcher::from_config(transport, &site, resolver, diagnostics)
}

#[tokio::test]
async fn german_stage_offer_renders_localized_terms() {
    let transport = FixtureTransport::new(200, DE_OFFER);
    let fetcher = fetcher(&transport, DiagnosticsHandle::detached());
    let mut page = FakePage::on("www.adobe.com");
    page.existing = "<p class=\"intro\">Hinweis</p>".into();

    let search = "?offer_id=1B365A793986BBEEE26F3E372BDAAB09&locale=de_DE&promotion_code=fixed_dis_20&country=DE&env=stage&campaignStart=2024-01-15&campaignEnd=2024-02-29";
    let action = terms::init(&fetcher, &mut page, search).await;

    let expected = "<div class=\"container\"><p class=\"intro\">Hinweis</p>\
        <h1>Angebotsbedingungen</h1><p>Gültig vom 15.1.2024 bis 29.2.2024.</p></div>";
    assert_eq!(action, PageAction::Render(expected.into()));
    assert_eq!(page.children.as_deref(), Some(expected));
    assert!(page.navigated_to.is_none());

    let urls = transport.urls();
    assert_eq!(urls.len(), 1);
    assert_eq!(
        urls[0],
        format!(
            "https://aos-stage.adobe.io/offers/1B365A793986BBEEE26F3E372BDAAB09{search}&api_key=universalPromoTerm&service_providers=PROMO_TERMS"
        )
    );
}

#[tokio::test]
async fn offer_without_terms_redirects_to_localized_fallback() {
    let transport = FixtureTransport::new(200, EDU_OFFER_WITHOUT_TERMS);
    let fetcher = fetcher(&transport, DiagnosticsHandle::detached());
    let mut page = FakePage::on("www.adobe.com");

    let action = terms::init(&fetcher, &mut page, "?offer_id=X&locale=fr_CA").await;

    let url = "https://www.adobe.com/ca_fr/offer-terms/ccm-ste-introductory.html";
    assert_eq!(action, PageAction::Navigate(url.into()));
    assert_eq!(page.navigated_to.as_deref(), Some(url));
}

#[tokio::test]
async fn failed_request_sends_production_visitors_to_404() {
    let transport = FixtureTransport::new(0, "");
    let mut collector = DiagnosticsCollector::default();
    let fetcher = fetcher(&transport, collector.handle());
    let mut page = FakePage::on("www.adobe.com");

    let action = terms::init(&fetcher, &mut page, "?offer_id=X&api_key=secret").await;

    assert_eq!(action, PageAction::Navigate("/404.html".into()));
    assert_eq!(page.navigated_to.as_deref(), Some("/404.html"));

    collector.process_pending();
    let messages: Vec<&str> = collector
        .iter()
        .filter(|event| event.tag == BlockTag::UniversalPromoTerms)
        .map(|event| event.kind.message())
        .collect();
    assert!(!messages.is_empty());
    assert!(messages.iter().all(|message| !message.contains("secret")));
}

#[tokio::test]
async fn not_found_on_stage_host_leaves_page_alone() {
    let transport = FixtureTransport::new(404, "");
    let fetcher = fetcher(&transport, DiagnosticsHandle::detached());
    let mut page = FakePage::on("main--cc--adobecom.hlx.live");

    let action = terms::init(&fetcher, &mut page, "?offer_id=X").await;

    assert_eq!(action, PageAction::Nothing);
    assert!(page.navigated_to.is_none());
    assert!(page.children.is_none());
    assert!(transport.urls()[0].starts_with("https://aos-stage.adobe.io/offers/X"));
}

#[tokio::test]
async fn selector_queries_use_the_selector_endpoint() {
    let transport = FixtureTransport::new(200, DE_OFFER);
    let fetcher = fetcher(&transport, DiagnosticsHandle::detached());
    let mut page = FakePage::on("www.adobe.com");

    terms::init(&fetcher, &mut page, "?offer_selector_ids=SEL1&locale=en_US").await;

    assert_eq!(
        transport.urls(),
        vec![
            "https://aos.adobe.io/offers:search.selector?offer_selector_ids=SEL1&locale=en_US&api_key=universalPromoTerm&service_providers=PROMO_TERMS"
                .to_string()
        ]
    );
    let children = page.children.expect("terms rendered");
    assert!(children.contains("{{ campaignStart }}"));
}

#[tokio::test]
async fn rendered_markup_goes_through_host_sanitizer() {
    const UNSAFE: &str = r#"[{"promo_terms":{"header":"H","text":"<img src=x onerror=alert(1)>"}}]"#;
    let transport = FixtureTransport::new(200, UNSAFE);
    let fetcher = fetcher(&transport, DiagnosticsHandle::detached());
    let mut page = FakePage::on("www.adobe.com");

    let action = terms::init(&fetcher, &mut page, "?offer_id=X").await;

    let PageAction::Render(raw) = action else {
        panic!("expected render, got {action:?}");
    };
    assert!(raw.contains("onerror"));
    assert!(!page.children.expect("rendered").contains("onerror"));
}
