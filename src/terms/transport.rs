// SPDX-License-Identifier: MPL-2.0
//! Offers API transport.
//!
//! The fetcher only needs "GET this URL, give me status and body", so the
//! network is a trait and tests substitute a canned transport.

use std::future::Future;

use crate::error::Result;

/// User agent sent with offers requests.
const USER_AGENT: &str = concat!("cc-blocks/", env!("CARGO_PKG_VERSION"));

/// Status and body of an offers API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests against the offers API.
pub trait OffersTransport {
    /// Fetches `url`. Non-2xx statuses are returned, not raised; errors are
    /// reserved for requests that produced no response at all.
    fn get(&self, url: &str) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client with a bounded redirect policy.
    ///
    /// No request timeout is set: a slow offers API still yields its terms.
    pub fn new() -> Result<Self> {
        Self::from_builder(reqwest::Client::builder())
    }

    fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self> {
        let client = builder
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl OffersTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
