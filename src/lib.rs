// SPDX-License-Identifier: MPL-2.0
//! `cc_blocks` implements the behavior of two marketing page blocks.
//!
//! - [`terms`]: the universal promo terms block. It resolves the page
//!   locale, fetches promo terms from the offers API, fills in campaign
//!   dates, and decides whether the page renders, redirects or 404s.
//! - [`slot_text`]: the animated slot text block. It parses the authored
//!   table, renders accessible markup, and sequences the reel animation with
//!   play/pause, resize and reduced-motion handling.
//!
//! The host page is abstracted behind traits ([`terms::TermsHost`],
//! [`slot_text::ReelSurface`]) so the logic runs and is tested without a
//! browser.

#![doc(html_root_url = "https://docs.rs/cc_blocks/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod locale;
pub mod slot_text;
pub mod terms;

#[cfg(test)]
pub(crate) mod test_utils;
